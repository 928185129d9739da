//! WASM bindings for the crop dialog geometry.
//!
//! The crop dialog lays the photo out in a viewport, lets the user pan and
//! zoom, and asks these functions where the square window lands in source
//! pixels.

use crate::types::JsCropRect;
use polaroid_core::transform::{clamp_zoom, CropState, CropTransform, Point, Size};
use wasm_bindgen::prelude::*;

/// Compute the source-pixel square visible through the crop window.
///
/// # Arguments
///
/// * `source_width`, `source_height` - Decoded photo size
/// * `viewport_width`, `viewport_height` - Crop dialog size in CSS pixels
/// * `offset_x`, `offset_y` - Pan offset in viewport pixels
/// * `zoom` - Zoom factor, clamped to 1..=3
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rect = compute_crop(img.width, img.height, 400, 400, pan.x, pan.y, zoom);
/// editor.apply_crop(rect);
/// ```
#[wasm_bindgen]
pub fn compute_crop(
    source_width: u32,
    source_height: u32,
    viewport_width: f64,
    viewport_height: f64,
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
) -> JsCropRect {
    let transform = CropTransform::new(
        source_width,
        source_height,
        Size::new(viewport_width, viewport_height),
    );
    let state = CropState {
        offset: Point::new(offset_x, offset_y),
        zoom,
    };
    transform.compute(&state).into()
}

/// Clamp a pan offset so the zoomed photo still covers the crop window.
///
/// Returns `[x, y]`.
#[wasm_bindgen]
pub fn restrict_offset(
    source_width: u32,
    source_height: u32,
    viewport_width: f64,
    viewport_height: f64,
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
) -> Vec<f64> {
    let transform = CropTransform::new(
        source_width,
        source_height,
        Size::new(viewport_width, viewport_height),
    );
    let offset = transform.restrict_offset(Point::new(offset_x, offset_y), zoom);
    vec![offset.x, offset.y]
}

/// Clamp a zoom factor to the supported range.
#[wasm_bindgen]
pub fn clamp_crop_zoom(zoom: f64) -> f64 {
    clamp_zoom(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_crop_default_centers() {
        let rect = compute_crop(400, 300, 400.0, 400.0, 0.0, 0.0, 1.0);
        assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (50, 0, 300, 300));
    }

    #[test]
    fn test_compute_crop_zoomed() {
        let rect = compute_crop(400, 300, 400.0, 400.0, 0.0, 0.0, 2.0);
        assert_eq!(rect.width(), 150);
        assert_eq!(rect.width(), rect.height());
    }

    #[test]
    fn test_restrict_offset_clamps() {
        // Media 400x300 in a 400x400 viewport, window 300: max_x = 50, max_y = 0
        let offset = restrict_offset(400, 300, 400.0, 400.0, 500.0, -40.0, 1.0);
        assert_eq!(offset, vec![50.0, 0.0]);
    }

    #[test]
    fn test_clamp_crop_zoom() {
        assert_eq!(clamp_crop_zoom(0.5), 1.0);
        assert_eq!(clamp_crop_zoom(10.0), 3.0);
        assert_eq!(clamp_crop_zoom(2.0), 2.0);
    }
}
