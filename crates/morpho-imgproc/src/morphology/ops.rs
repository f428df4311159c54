use morpho_image::{GrayImage, ImageError};

use super::error::MorphologyError;
use super::kernels;
use super::{BORDER_PAD, SE_RADIUS};
use crate::padding::PaddedImage;
use crate::parallel::{self, ExecutionStrategy};

fn check_shapes(src: &PaddedImage, dst: &GrayImage) -> Result<(), MorphologyError> {
    if src.pad() < SE_RADIUS {
        return Err(MorphologyError::InsufficientPadding(src.pad(), SE_RADIUS));
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.size().width,
            src.size().height,
        )
        .into());
    }
    Ok(())
}

/// Erode a padded image into `dst`.
///
/// Each output pixel is the minimum of the 5-point Von Neumann neighborhood
/// (center and the 4 axis-aligned neighbors) read from the padded buffer.
/// The padded input is not mutated; `dst` receives exactly
/// `width * height` samples.
///
/// # Arguments
///
/// * `src` - The replicate-padded source image, `pad >= SE_RADIUS`.
/// * `dst` - The destination image (will be overwritten), sized like the
///   interior of `src`.
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the shapes don't match.
///
/// # Example
///
/// ```rust
/// use morpho_image::{GrayImage, ImageSize};
/// use morpho_imgproc::morphology;
/// use morpho_imgproc::padding::PaddedImage;
///
/// let src = GrayImage::new(
///     ImageSize { width: 2, height: 2 },
///     vec![10, 20, 30, 40],
/// ).unwrap();
/// let padded = PaddedImage::from_image(&src, morphology::BORDER_PAD).unwrap();
///
/// let mut dst = GrayImage::from_size_val(src.size(), 0).unwrap();
/// morphology::erode(&padded, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), &[10, 10, 10, 20]);
/// ```
pub fn erode(src: &PaddedImage, dst: &mut GrayImage) -> Result<(), MorphologyError> {
    erode_with(src, dst, ExecutionStrategy::default())
}

/// Erode a padded image into `dst` with an explicit [`ExecutionStrategy`].
///
/// The output is independent of the chosen strategy.
pub fn erode_with(
    src: &PaddedImage,
    dst: &mut GrayImage,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError> {
    check_shapes(src, dst)?;

    let width = src.size().width;
    let stride = src.stride();
    let pad = src.pad();
    let padded = src.as_slice();

    parallel::for_each_row(dst.as_slice_mut(), width, strategy, |r, dst_row| {
        kernels::erode_row(padded, (r + pad) * stride + pad, stride, dst_row);
    })?;

    Ok(())
}

/// Dilate a padded image into `dst`.
///
/// Each output pixel is the maximum of the 5-point Von Neumann neighborhood
/// read from the padded buffer. The dual of [`erode`]; same contract.
pub fn dilate(src: &PaddedImage, dst: &mut GrayImage) -> Result<(), MorphologyError> {
    dilate_with(src, dst, ExecutionStrategy::default())
}

/// Dilate a padded image into `dst` with an explicit [`ExecutionStrategy`].
///
/// The output is independent of the chosen strategy.
pub fn dilate_with(
    src: &PaddedImage,
    dst: &mut GrayImage,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError> {
    check_shapes(src, dst)?;

    let width = src.size().width;
    let stride = src.stride();
    let pad = src.pad();
    let padded = src.as_slice();

    parallel::for_each_row(dst.as_slice_mut(), width, strategy, |r, dst_row| {
        kernels::dilate_row(padded, (r + pad) * stride + pad, stride, dst_row);
    })?;

    Ok(())
}

/// Opening: `levels` erosions followed by one dilation.
///
/// Removes bright features smaller than the structuring element. The input
/// is padded once with [`BORDER_PAD`]; each erosion reads the previous
/// iteration's result (the padded buffer is refilled from the output between
/// passes), so `levels` is cumulative. `levels = 0` degenerates to a single
/// dilation of the input.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten), same size as `src`.
/// * `levels` - Number of erosions before the final dilation.
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the shapes don't match.
pub fn open(src: &GrayImage, dst: &mut GrayImage, levels: usize) -> Result<(), MorphologyError> {
    open_with(src, dst, levels, ExecutionStrategy::default())
}

/// Opening with an explicit [`ExecutionStrategy`].
pub fn open_with(
    src: &GrayImage,
    dst: &mut GrayImage,
    levels: usize,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError> {
    let mut padded = PaddedImage::from_image(src, BORDER_PAD)?;

    for _ in 0..levels {
        erode_with(&padded, dst, strategy)?;
        padded.refill(dst)?;
    }

    dilate_with(&padded, dst, strategy)
}

/// Closing: `levels` dilations followed by one erosion.
///
/// Removes dark features smaller than the structuring element. The dual of
/// [`open`]; `levels = 0` degenerates to a single erosion of the input.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten), same size as `src`.
/// * `levels` - Number of dilations before the final erosion.
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the shapes don't match.
pub fn close(src: &GrayImage, dst: &mut GrayImage, levels: usize) -> Result<(), MorphologyError> {
    close_with(src, dst, levels, ExecutionStrategy::default())
}

/// Closing with an explicit [`ExecutionStrategy`].
pub fn close_with(
    src: &GrayImage,
    dst: &mut GrayImage,
    levels: usize,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError> {
    let mut padded = PaddedImage::from_image(src, BORDER_PAD)?;

    for _ in 0..levels {
        dilate_with(&padded, dst, strategy)?;
        padded.refill(dst)?;
    }

    erode_with(&padded, dst, strategy)
}
