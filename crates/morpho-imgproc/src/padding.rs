use morpho_image::{GrayImage, ImageError, ImageSize};
use rayon::prelude::*;

/// A replicate-padded working buffer for stencil operations.
///
/// The interior `width x height` rectangle holds the most recently filled
/// image; the surrounding border of `pad` pixels holds replicated edge
/// samples (clamp-to-edge). Stencil kernels can therefore read a fixed
/// window around every interior pixel with no boundary branches.
///
/// # Example
///
/// ```rust
/// use morpho_image::{GrayImage, ImageSize};
/// use morpho_imgproc::padding::PaddedImage;
///
/// let src = GrayImage::new(
///     ImageSize { width: 2, height: 2 },
///     vec![1, 2, 3, 4],
/// ).unwrap();
///
/// let padded = PaddedImage::from_image(&src, 2).unwrap();
///
/// assert_eq!(padded.stride(), 6);
/// assert_eq!(padded.as_slice().len(), 6 * 6);
/// // top-left corner replicates the first pixel
/// assert_eq!(padded.as_slice()[0], 1);
/// ```
pub struct PaddedImage {
    data: Vec<u8>,
    size: ImageSize,
    pad: usize,
}

impl PaddedImage {
    /// Allocate a padded buffer of size `(width + 2 * pad) x (height + 2 * pad)`
    /// and fill it from `src`.
    pub fn from_image(src: &GrayImage, pad: usize) -> Result<Self, ImageError> {
        let size = src.size();
        let data = vec![0u8; (size.width + 2 * pad) * (size.height + 2 * pad)];
        let mut padded = Self { data, size, pad };
        padded.refill(src)?;
        Ok(padded)
    }

    /// Re-fill the interior and border from `src` without reallocating.
    ///
    /// The open/close composers use this to re-derive the padded view from
    /// the previous iteration's output before the next pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the size of `src` does not match the interior
    /// size of this buffer.
    pub fn refill(&mut self, src: &GrayImage) -> Result<(), ImageError> {
        if src.size() != self.size {
            return Err(ImageError::InvalidImageSize(
                src.width(),
                src.height(),
                self.size.width,
                self.size.height,
            ));
        }

        let width = self.size.width;
        let height = self.size.height;
        let pad = self.pad;
        let stride = width + 2 * pad;

        // copy the image rows into the interior
        let row_offset = pad * stride + pad;
        for (src_row, dst_row) in src
            .as_slice()
            .chunks_exact(width)
            .zip(self.data[row_offset..].chunks_exact_mut(stride))
        {
            dst_row[..width].copy_from_slice(src_row);
        }

        // replicate the first/last sample of each interior row across the
        // left/right border columns
        let interior = &mut self.data[pad * stride..(pad + height) * stride];
        interior.par_chunks_exact_mut(stride).for_each(|row| {
            let first = row[pad];
            let last = row[pad + width - 1];
            row[..pad].fill(first);
            row[pad + width..].fill(last);
        });

        // the top/bottom borders replicate the already-padded first and last
        // interior rows, so the corners pick up the replicated samples too
        {
            let (top, rest) = self.data.split_at_mut(pad * stride);
            let first_row = &rest[..stride];
            top.par_chunks_exact_mut(stride)
                .for_each(|dst_row| dst_row.copy_from_slice(first_row));
        }
        {
            let split = (pad + height) * stride;
            let (rest, bottom) = self.data.split_at_mut(split);
            let last_row = &rest[split - stride..];
            bottom
                .par_chunks_exact_mut(stride)
                .for_each(|dst_row| dst_row.copy_from_slice(last_row));
        }

        Ok(())
    }

    /// Size of the interior image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Border width in pixels.
    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Row length of the padded buffer in samples.
    pub fn stride(&self) -> usize {
        self.size.width + 2 * self.pad
    }

    /// The padded samples as a flat row-major slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
