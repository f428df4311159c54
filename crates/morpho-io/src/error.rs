/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error when the file length does not match the expected raw image size.
    #[error("File holds {actual} bytes but the image needs exactly {expected}")]
    UnexpectedFileLength {
        /// The number of bytes the image dimensions require.
        expected: usize,
        /// The number of bytes found in the file.
        actual: usize,
    },

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] morpho_image::ImageError),
}
