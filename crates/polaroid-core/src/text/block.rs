use image::RgbaImage;

use super::{blend_pixel, LineMetrics, TextRun, Typeface};

/// A fixed-metric typeface that draws every visible character as a solid
/// block.
///
/// Rendering is deterministic and needs no font file, so text placement can
/// be checked pixel by pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockTypeface;

impl BlockTypeface {
    /// Horizontal advance per character, in em.
    pub const ADVANCE: f32 = 0.6;
    /// Width of the drawn block, in em.
    pub const BLOCK: f32 = 0.5;
    pub const ASCENT: f32 = 0.8;
    pub const DESCENT: f32 = 0.2;
    /// Height of the drawn block above the baseline, in em.
    pub const CAP: f32 = 0.7;
}

impl Typeface for BlockTypeface {
    fn family(&self) -> &str {
        "Block"
    }

    fn line_metrics(&self, px: f32) -> LineMetrics {
        LineMetrics {
            ascent: px * Self::ASCENT,
            descent: px * Self::DESCENT,
        }
    }

    fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * px * Self::ADVANCE
    }

    fn draw(&self, canvas: &mut RgbaImage, run: &TextRun<'_>) {
        let top = (run.baseline - run.px * Self::CAP).round() as i64;
        let bottom = run.baseline.round() as i64;
        for (i, c) in run.text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let left = (run.x + i as f32 * run.px * Self::ADVANCE).round() as i64;
            let right = (left as f32 + run.px * Self::BLOCK).round() as i64;
            for y in top..bottom {
                for x in left..right {
                    blend_pixel(canvas, x, y, run.color, 1.0, &run.clip);
                }
            }
        }
    }
}
