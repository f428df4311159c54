use std::path::Path;

use morpho_image::{GrayImage, ImageSize};

use crate::error::IoError;

/// Reads a raw headerless grayscale image from the given file path.
///
/// The file must hold exactly `size.width * size.height` bytes, 8 bits per
/// pixel in row-major scanline order; the dimensions are supplied out of
/// band since the format carries no header.
///
/// # Arguments
///
/// * `file_path` - The path to the raw image file.
/// * `size` - The image dimensions in pixels.
///
/// # Returns
///
/// An image containing the raw pixel data.
pub fn read_image_raw(file_path: impl AsRef<Path>, size: ImageSize) -> Result<GrayImage, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let data = std::fs::read(file_path)?;

    // a short or long file is rejected, never truncated
    let expected = size.width * size.height;
    if data.len() != expected {
        return Err(IoError::UnexpectedFileLength {
            expected,
            actual: data.len(),
        });
    }

    Ok(GrayImage::new(size, data)?)
}

/// Writes the given image to the given file path as raw bytes.
///
/// # Arguments
///
/// * `file_path` - The path to the output file.
/// * `image` - The image to write.
pub fn write_image_raw(file_path: impl AsRef<Path>, image: &GrayImage) -> Result<(), IoError> {
    std::fs::write(file_path, image.as_slice())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("image.raw");

        let size = ImageSize {
            width: 4,
            height: 2,
        };
        let image = GrayImage::new(size, vec![1, 2, 3, 4, 5, 6, 7, 8])?;

        write_image_raw(&file_path, &image)?;
        let read_back = read_image_raw(&file_path, size)?;

        assert_eq!(read_back, image);

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_raw(
            "missing.raw",
            ImageSize {
                width: 2,
                height: 2,
            },
        );
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_short_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("short.raw");
        std::fs::write(&file_path, [0u8; 3])?;

        let res = read_image_raw(
            &file_path,
            ImageSize {
                width: 2,
                height: 2,
            },
        );
        assert!(matches!(
            res,
            Err(IoError::UnexpectedFileLength {
                expected: 4,
                actual: 3,
            })
        ));

        Ok(())
    }
}
