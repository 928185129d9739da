//! Core types for decoded uploads.

use std::sync::Arc;

use image::{RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is empty.
    #[error("No image data supplied")]
    Empty,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has a zero dimension.
    #[error("Decoded image has zero size ({width}x{height})")]
    ZeroSized { width: u32, height: u32 },
}

/// Filter type for the resample step that scales the photo into its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Shared, immutable reference to a decoded RGBA image.
///
/// Handles are cheap to clone. Two handles compare equal only when they point
/// at the same decoded buffer, so replacing an upload with an identical file
/// still counts as a new image.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: Arc<RgbaImage>,
}

impl ImageHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Wrap raw RGBA bytes (row-major, 4 bytes per pixel).
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels).map(Self::new)
    }

    /// Wrap an RGB image, marking every pixel opaque.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self::new(image::DynamicImage::ImageRgb8(image).into_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Borrow the decoded pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    /// True when both handles share the same decoded buffer.
    pub fn same_image(&self, other: &ImageHandle) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_image(other)
    }
}

impl Eq for ImageHandle {}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_handle_identity() {
        let a = ImageHandle::new(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));
        let b = a.clone();
        let c = ImageHandle::new(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));

        assert_eq!(a, b);
        assert_ne!(a, c, "identical pixels in a separate upload are a different image");
    }

    #[test]
    fn test_from_rgb_is_opaque() {
        let handle = ImageHandle::from_rgb(RgbImage::from_pixel(2, 3, image::Rgb([9, 8, 7])));
        assert_eq!(handle.dimensions(), (2, 3));
        assert_eq!(handle.pixels().get_pixel(1, 2).0, [9, 8, 7, 255]);
    }

    #[test]
    fn test_from_rgba_checks_length() {
        let handle = ImageHandle::from_rgba(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(handle.pixels().get_pixel(1, 0).0, [5, 6, 7, 8]);
        assert!(ImageHandle::from_rgba(2, 2, vec![0; 8]).is_none());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ZeroSized { width: 0, height: 5 };
        assert_eq!(err.to_string(), "Decoded image has zero size (0x5)");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
