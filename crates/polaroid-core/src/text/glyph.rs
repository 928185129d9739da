//! Outline font rasterization via `ab_glyph`.

use std::fmt;

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::RgbaImage;
use thiserror::Error;

use super::{blend_pixel, LineMetrics, TextRun, Typeface};

/// Errors that can occur while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The bytes are not a TrueType/OpenType font.
    #[error("Invalid font data for {family:?}")]
    InvalidFont { family: String },
}

/// A TrueType/OpenType typeface.
#[derive(Clone)]
pub struct GlyphTypeface {
    family: String,
    font: FontArc,
}

impl GlyphTypeface {
    /// Load a typeface from font file bytes.
    pub fn from_bytes(family: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FontError> {
        let family = family.into();
        let font = FontArc::try_from_vec(bytes).map_err(|_| FontError::InvalidFont {
            family: family.clone(),
        })?;
        log::debug!("loaded typeface {family:?} ({} glyphs)", font.glyph_count());
        Ok(Self { family, font })
    }

    /// Walk the laid-out glyphs of `text`, yielding each glyph id and its pen
    /// position relative to the run origin.
    fn layout(&self, text: &str, px: f32, mut visit: impl FnMut(GlyphId, f32)) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            if c.is_control() {
                continue;
            }
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            visit(id, caret);
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        caret
    }
}

impl fmt::Debug for GlyphTypeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphTypeface")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl Typeface for GlyphTypeface {
    fn family(&self) -> &str {
        &self.family
    }

    fn line_metrics(&self, px: f32) -> LineMetrics {
        let scaled = self.font.as_scaled(PxScale::from(px));
        LineMetrics {
            ascent: scaled.ascent(),
            descent: -scaled.descent(),
        }
    }

    fn measure(&self, text: &str, px: f32) -> f32 {
        self.layout(text, px, |_, _| {})
    }

    fn draw(&self, canvas: &mut RgbaImage, run: &TextRun<'_>) {
        let scale = PxScale::from(run.px);
        let mut glyphs = Vec::new();
        self.layout(run.text, run.px, |id, caret| {
            glyphs.push(id.with_scale_and_position(scale, point(run.x + caret, run.baseline)));
        });

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
            outlined.draw(|gx, gy, coverage| {
                blend_pixel(
                    canvas,
                    left + gx as i64,
                    top + gy as i64,
                    run.color,
                    coverage,
                    &run.clip,
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ClipRect;
    use image::Rgba;

    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    fn system_font() -> Option<GlyphTypeface> {
        let bytes = std::fs::read(SYSTEM_FONT).ok()?;
        GlyphTypeface::from_bytes("DejaVu Sans", bytes).ok()
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = GlyphTypeface::from_bytes("Broken", vec![0u8; 16]);
        match result {
            Err(FontError::InvalidFont { family }) => assert_eq!(family, "Broken"),
            other => panic!("expected InvalidFont, got {other:?}"),
        }
    }

    #[test]
    fn test_system_font_measures_and_draws() {
        // Only runs where the DejaVu fonts are installed
        let Some(face) = system_font() else {
            return;
        };

        assert_eq!(face.family(), "DejaVu Sans");
        let metrics = face.line_metrics(18.0);
        assert!(metrics.ascent > 0.0 && metrics.descent > 0.0);
        assert!(face.measure("Hello", 18.0) > face.measure("Hi", 18.0));
        assert_eq!(face.measure("", 18.0), 0.0);

        let mut canvas = RgbaImage::from_pixel(120, 40, Rgba([255, 255, 255, 255]));
        face.draw(
            &mut canvas,
            &TextRun {
                text: "Hello",
                x: 4.0,
                baseline: 28.0,
                px: 18.0,
                color: Rgba([0, 0, 0, 255]),
                clip: ClipRect {
                    x0: 0,
                    y0: 0,
                    x1: 120,
                    y1: 40,
                },
            },
        );
        assert!(canvas.pixels().any(|p| p.0[0] < 128));
    }
}
