use crate::parallel::ParallelError;
use morpho_image::ImageError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The padded border is too small for the structuring element.
    #[error("padded border ({0}) is smaller than the structuring element reach ({1})")]
    InsufficientPadding(usize, usize),

    /// The image shapes are not valid for the operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The row scheduler rejected the call.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
