use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use morpho_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents a single-channel 8-bit grayscale image.
///
/// The pixel data is stored as a contiguous row-major buffer of
/// `width * height` unsigned bytes, with no header, stride padding or
/// alignment requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    size: ImageSize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row-major scanline order.
    ///
    /// # Errors
    ///
    /// If either dimension is zero or the length of the pixel data does not
    /// match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use morpho_image::{GrayImage, ImageSize};
    ///
    /// let image = GrayImage::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSizeImage(size.width, size.height));
        }

        // check if the data length matches the image size
        if data.len() != size.width * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use morpho_image::{GrayImage, ImageSize};
    ///
    /// let image = GrayImage::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     128,
    /// ).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 200);
    /// ```
    pub fn from_size_val(size: ImageSize, val: u8) -> Result<Self, ImageError> {
        let data = vec![val; size.width * size.height];
        Self::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the pixel data as a flat slice in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the pixel data as a mutable flat slice in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the pixel value at the given row and column.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.size.height || col >= self.size.width {
            return None;
        }
        Some(self.data[row * self.size.width + col])
    }

    /// Consume the image and return the pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(size.width, 10);
        assert_eq!(size.height, 20);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = GrayImage::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.cols(), 10);

        Ok(())
    }

    #[test]
    fn image_data_mismatch() {
        let res = GrayImage::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            vec![0u8; 15],
        );
        assert_eq!(res, Err(ImageError::InvalidDataLength(15, 16)));
    }

    #[test]
    fn image_zero_size() {
        let res = GrayImage::new(
            ImageSize {
                width: 0,
                height: 4,
            },
            vec![],
        );
        assert_eq!(res, Err(ImageError::ZeroSizeImage(0, 4)));
    }

    #[test]
    fn image_get() -> Result<(), ImageError> {
        let image = GrayImage::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )?;
        assert_eq!(image.get(0, 1), Some(2));
        assert_eq!(image.get(1, 0), Some(3));
        assert_eq!(image.get(2, 0), None);

        Ok(())
    }
}
