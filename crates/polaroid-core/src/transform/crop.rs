//! Pixel-space crop rectangles and the sub-image extraction that consumes
//! them.
//!
//! A [`CropRect`] is always expressed in the source image's native pixel
//! coordinates. Rectangles produced by the crop transform are square; the
//! same type is reused for the render-time center crop.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::decode::ImageHandle;

/// A rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle has equal sides.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Whether the rectangle lies entirely inside a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }

    /// Clamp the rectangle into a `width x height` image.
    ///
    /// The size is reduced only when it exceeds the image; otherwise the
    /// origin is shifted back inside the bounds. The result is at least 1x1.
    pub fn clamped_to(&self, width: u32, height: u32) -> CropRect {
        let w = self.width.clamp(1, width.max(1));
        let h = self.height.clamp(1, height.max(1));
        let x = self.x.min(width.saturating_sub(w));
        let y = self.y.min(height.saturating_sub(h));
        CropRect::new(x, y, w, h)
    }

    /// The largest square centered inside the rectangle.
    pub fn to_square(&self) -> CropRect {
        let side = self.width.min(self.height);
        CropRect::new(
            self.x + (self.width - side) / 2,
            self.y + (self.height - side) / 2,
            side,
            side,
        )
    }
}

/// The largest centered square inside a `width x height` image.
///
/// This is the default crop and the render-time policy for photos that have
/// not been cropped yet.
pub fn center_square(width: u32, height: u32) -> CropRect {
    let side = width.min(height).max(1);
    CropRect::new(
        width.saturating_sub(side) / 2,
        height.saturating_sub(side) / 2,
        side,
        side,
    )
}

/// Copy the pixels under `rect` into a new image.
///
/// The rectangle is clamped to the image first, so an out-of-range request
/// still yields a valid (smaller or shifted) sub-image of at least 1x1.
pub fn apply_crop(image: &ImageHandle, rect: CropRect) -> ImageHandle {
    let (width, height) = image.dimensions();
    let rect = rect.clamped_to(width, height);

    // Fast path: full-frame crop shares the existing buffer
    if rect == CropRect::new(0, 0, width, height) {
        return image.clone();
    }

    let sub = imageops::crop_imm(image.pixels(), rect.x, rect.y, rect.width, rect.height);
    ImageHandle::new(sub.to_image())
}
