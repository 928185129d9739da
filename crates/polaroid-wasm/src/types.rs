//! WASM-compatible wrapper types for images, frames and crop rectangles.
//!
//! These wrap the core types and handle the conversion between Rust and
//! JavaScript data representations.

use polaroid_core::decode::ImageHandle;
use polaroid_core::render::Bitmap;
use polaroid_core::transform::CropRect;
use wasm_bindgen::prelude::*;

/// A decoded photo, held in WASM memory.
///
/// Cloning the wrapper is cheap: the pixels are shared with the edit session
/// once uploaded.
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsImage {
    inner: ImageHandle,
}

#[wasm_bindgen]
impl JsImage {
    /// Wrap raw RGBA pixels (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Invalid pixel data: expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        let inner = ImageHandle::from_rgba(width, height, pixels)
            .ok_or_else(|| JsValue::from_str("Invalid pixel data"))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the RGBA pixel buffer.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().as_raw().len()
    }

    /// Returns RGBA pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().as_raw().clone()
    }
}

impl JsImage {
    pub(crate) fn from_handle(inner: ImageHandle) -> Self {
        Self { inner }
    }

    pub(crate) fn handle(&self) -> &ImageHandle {
        &self.inner
    }
}

/// A rendered polaroid frame, ready for `putImageData`.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns RGBA pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl From<Bitmap> for JsBitmap {
    fn from(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            pixels: bitmap.into_raw(),
        }
    }
}

/// A square crop in source pixels, as produced by the crop dialog.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(constructor)]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> JsCropRect {
        Self {
            inner: CropRect::new(x, y, width, height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<CropRect> for JsCropRect {
    fn from(inner: CropRect) -> Self {
        Self { inner }
    }
}

impl From<JsCropRect> for CropRect {
    fn from(rect: JsCropRect) -> Self {
        rect.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_js_image_creation() {
        let img = JsImage::new(4, 2, vec![7u8; 4 * 2 * 4]).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.byte_length(), 32);
        assert_eq!(img.pixels(), vec![7u8; 32]);
    }

    #[test]
    fn test_js_image_shares_handle() {
        let handle = ImageHandle::new(RgbaImage::new(3, 3));
        let img = JsImage::from_handle(handle.clone());
        assert!(img.handle().same_image(&handle));
    }

    #[test]
    fn test_js_bitmap_from_core() {
        let bitmap = RgbaImage::from_pixel(2, 3, Rgba([1, 2, 3, 255]));
        let js = JsBitmap::from(bitmap);
        assert_eq!((js.width(), js.height()), (2, 3));
        assert_eq!(js.pixels().len(), 24);
        assert_eq!(&js.pixels()[0..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_js_crop_rect_round_trip() {
        let rect = CropRect::new(50, 0, 300, 300);
        let js = JsCropRect::from(rect);
        assert_eq!((js.x(), js.y(), js.width(), js.height()), (50, 0, 300, 300));
        assert_eq!(CropRect::from(js), rect);
    }
}
