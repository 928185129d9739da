//! Mapping from the interactive crop viewport to source pixels.
//!
//! The crop dialog shows the source image fitted ("contain") inside a
//! viewport, with a square crop window as large as the fitted image allows.
//! The user pans the image under the window (`offset`, in viewport pixels,
//! measured from the centered position) and zooms it (`zoom >= 1`).
//!
//! [`CropTransform::compute`] turns that UI state into the [`CropRect`] of
//! source pixels currently visible through the window.
//!
//! # Coordinate System
//!
//! - Offsets are in viewport pixels, positive x moves the image right
//! - Zoom scales the fitted image around the window center
//! - Output coordinates are native source pixels, origin top-left

use serde::{Deserialize, Serialize};

use super::crop::CropRect;

/// Smallest zoom the cropper allows (fitted image fills the window).
pub const MIN_ZOOM: f64 = 1.0;
/// Largest zoom the cropper allows.
pub const MAX_ZOOM: f64 = 3.0;

/// A 2D offset in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pan and zoom state owned by the crop interaction surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropState {
    pub offset: Point,
    pub zoom: f64,
}

impl Default for CropState {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            zoom: MIN_ZOOM,
        }
    }
}

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`; non-finite values reset to
/// `MIN_ZOOM`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        MIN_ZOOM
    }
}

/// Crop geometry for one source image shown in one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropTransform {
    source_width: u32,
    source_height: u32,
    viewport: Size,
}

impl CropTransform {
    /// Create a transform for a `source_width x source_height` image.
    ///
    /// A degenerate viewport (zero, negative or non-finite) is replaced by
    /// the source size, which keeps the mapping well defined.
    pub fn new(source_width: u32, source_height: u32, viewport: Size) -> Self {
        let source_width = source_width.max(1);
        let source_height = source_height.max(1);
        let viewport = if viewport.is_usable() {
            viewport
        } else {
            Size::new(source_width as f64, source_height as f64)
        };
        Self {
            source_width,
            source_height,
            viewport,
        }
    }

    /// Size of the source once fitted inside the viewport.
    pub fn media_size(&self) -> Size {
        let aspect = self.source_width as f64 / self.source_height as f64;
        let viewport_aspect = self.viewport.width / self.viewport.height;
        if aspect > viewport_aspect {
            Size::new(self.viewport.width, self.viewport.width / aspect)
        } else {
            Size::new(self.viewport.height * aspect, self.viewport.height)
        }
    }

    /// Side of the square crop window, in viewport pixels.
    pub fn window_size(&self) -> f64 {
        let media = self.media_size();
        media.width.min(media.height)
    }

    /// Compute the source-pixel rectangle visible through the crop window.
    ///
    /// The result is always square and inside the source. Pans that would
    /// push the window past an edge are shifted back, never shrunk.
    pub fn compute(&self, state: &CropState) -> CropRect {
        let zoom = clamp_zoom(state.zoom);
        let offset = sanitize(state.offset);
        let media = self.media_size();
        let window = self.window_size();

        // Visible fraction of the source along each axis
        let frac_w = (window / media.width / zoom).min(1.0);
        let frac_h = (window / media.height / zoom).min(1.0);
        let frac_x = ((media.width - window / zoom) / 2.0 - offset.x / zoom) / media.width;
        let frac_y = ((media.height - window / zoom) / 2.0 - offset.y / zoom) / media.height;

        let src_w = self.source_width as f64;
        let src_h = self.source_height as f64;

        // The shorter source side determines the square's size
        let side = if src_w >= src_h {
            (src_h * frac_h).round()
        } else {
            (src_w * frac_w).round()
        };
        let side = side.clamp(1.0, src_w.min(src_h));

        let x = (src_w * frac_x.clamp(0.0, 1.0)).clamp(0.0, src_w - side).round();
        let y = (src_h * frac_y.clamp(0.0, 1.0)).clamp(0.0, src_h - side).round();

        CropRect::new(x as u32, y as u32, side as u32, side as u32)
    }

    /// Clamp a pan offset so the zoomed image always covers the crop window.
    pub fn restrict_offset(&self, offset: Point, zoom: f64) -> Point {
        let zoom = clamp_zoom(zoom);
        let offset = sanitize(offset);
        let media = self.media_size();
        let window = self.window_size();

        let max_x = (media.width * zoom / 2.0 - window / 2.0).max(0.0);
        let max_y = (media.height * zoom / 2.0 - window / 2.0).max(0.0);

        Point::new(offset.x.clamp(-max_x, max_x), offset.y.clamp(-max_y, max_y))
    }
}

/// Compute the crop rectangle for a source image, viewport and pan/zoom state.
///
/// Pure convenience wrapper around [`CropTransform::compute`].
pub fn compute_crop_rect(
    source_width: u32,
    source_height: u32,
    viewport: Size,
    state: &CropState,
) -> CropRect {
    CropTransform::new(source_width, source_height, viewport).compute(state)
}

fn sanitize(point: Point) -> Point {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    Point::new(finite(point.x), finite(point.y))
}
