//! Text rasterization for the caption and date lines.
//!
//! The renderer never touches font files directly. It talks to the
//! [`Typeface`] trait, which the font list supplies as opaque
//! [`FontHandle`]s. [`GlyphTypeface`] is the production implementation over
//! TrueType/OpenType outlines; hosts may plug in other rasterizers.

mod block;
mod date;
mod glyph;

use std::fmt;
use std::sync::Arc;

use image::{Rgba, RgbaImage};

pub use block::BlockTypeface;
pub use date::{format_date, DATE_PLACEHOLDER};
pub use glyph::{FontError, GlyphTypeface};

/// Shared reference to a typeface, as stored in the font list.
pub type FontHandle = Arc<dyn Typeface>;

/// Vertical metrics of a font at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of descenders (positive).
    pub descent: f32,
}

impl LineMetrics {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Axis-aligned clip rectangle in canvas pixels (`x1`/`y1` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl ClipRect {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// One line of text to draw.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Left edge of the first glyph's advance box.
    pub x: f32,
    /// Baseline position.
    pub baseline: f32,
    /// Font size in pixels.
    pub px: f32,
    pub color: Rgba<u8>,
    /// Pixels outside this rectangle must not be touched.
    pub clip: ClipRect,
}

/// A font the compositor can measure and draw with.
pub trait Typeface: fmt::Debug + Send + Sync {
    /// Human readable family name.
    fn family(&self) -> &str;

    /// Vertical metrics at `px` pixels.
    fn line_metrics(&self, px: f32) -> LineMetrics;

    /// Horizontal advance of `text` at `px` pixels.
    fn measure(&self, text: &str, px: f32) -> f32;

    /// Rasterize `run` onto `canvas`, blending with existing pixels.
    fn draw(&self, canvas: &mut RgbaImage, run: &TextRun<'_>);
}

/// Blend `color` into the canvas at `(x, y)` with the given coverage.
///
/// Pixels outside the canvas or `clip` are ignored. Typeface implementations
/// use this so every rasterizer composites text identically.
pub fn blend_pixel(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    color: Rgba<u8>,
    coverage: f32,
    clip: &ClipRect,
) {
    if !clip.contains(x, y) || x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }

    let alpha = coverage.clamp(0.0, 1.0) * (color.0[3] as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }

    let dst = canvas.get_pixel_mut(x, y);
    for i in 0..3 {
        let mixed = dst.0[i] as f32 * (1.0 - alpha) + color.0[i] as f32 * alpha;
        dst.0[i] = mixed.round() as u8;
    }
    let a = dst.0[3] as f32;
    dst.0[3] = (a + (255.0 - a) * alpha).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVERYTHING: ClipRect = ClipRect {
        x0: i64::MIN,
        y0: i64::MIN,
        x1: i64::MAX,
        y1: i64::MAX,
    };

    #[test]
    fn test_blend_full_coverage_replaces() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        blend_pixel(&mut canvas, 1, 1, Rgba([0, 0, 0, 255]), 1.0, &EVERYTHING);
        assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_blend_half_coverage_mixes() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 255]));
        blend_pixel(&mut canvas, 0, 0, Rgba([0, 0, 200, 255]), 0.5, &EVERYTHING);
        assert_eq!(canvas.get_pixel(0, 0).0, [100, 50, 100, 255]);
    }

    #[test]
    fn test_blend_respects_clip_and_bounds() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let clip = ClipRect {
            x0: 0,
            y0: 0,
            x1: 2,
            y1: 4,
        };
        blend_pixel(&mut canvas, 3, 0, Rgba([0, 0, 0, 255]), 1.0, &clip);
        blend_pixel(&mut canvas, -1, 0, Rgba([0, 0, 0, 255]), 1.0, &EVERYTHING);
        blend_pixel(&mut canvas, 0, 9, Rgba([0, 0, 0, 255]), 1.0, &EVERYTHING);
        assert!(canvas.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_line_metrics_height() {
        let m = LineMetrics {
            ascent: 14.0,
            descent: 4.0,
        };
        assert_eq!(m.height(), 18.0);
    }
}
