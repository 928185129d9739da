//! Crop geometry: from the interactive cropper to source pixels.
//!
//! Two pieces live here:
//! 1. [`CropTransform`] maps the cropper's pan/zoom state to a square
//!    [`CropRect`] in the source image's native pixels.
//! 2. [`apply_crop`] extracts that rectangle into a new image, and
//!    [`center_square`] provides the default (and render-time) crop.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixels, origin top-left
//! - Viewport offsets and sizes are in on-screen pixels
//! - The aspect ratio is fixed at 1:1, matching the polaroid photo area

mod crop;
mod viewport;

pub use crop::{apply_crop, center_square, CropRect};
pub use viewport::{
    clamp_zoom, compute_crop_rect, CropState, CropTransform, Point, Size, MAX_ZOOM, MIN_ZOOM,
};
