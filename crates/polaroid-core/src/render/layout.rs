//! Frame geometry.
//!
//! The frame is a column: padding, a square photo as wide as the padded
//! content box, then the caption line and an optional date line. All
//! measurements derive from [`RenderConfig`], so the preview and the export
//! share one layout for a given output width.

use serde::{Deserialize, Serialize};

use super::config::RenderConfig;
use crate::text::{ClipRect, Typeface};

/// An integer pixel rectangle on the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }
}

/// Text for one line, and whether it is a preview-only placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineText {
    pub text: String,
    pub placeholder: bool,
}

impl LineText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: true,
        }
    }
}

/// A positioned line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub placeholder: bool,
    /// Left edge of the line.
    pub x: f32,
    /// Top of the line box.
    pub top: f32,
    /// Baseline, centered in the line box CSS-style (half leading).
    pub baseline: f32,
    /// Font size in pixels.
    pub px: f32,
    /// Height of the line box.
    pub line_height: f32,
}

/// Resolved geometry of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub width: u32,
    pub height: u32,
    pub photo: Region,
    pub caption: TextLine,
    pub date: Option<TextLine>,
}

impl FrameLayout {
    /// Lay out a frame for the given lines and fonts.
    ///
    /// `date` is `None` when the date is hidden; the caption then sits a
    /// little further from the photo. A shown but empty date still reserves
    /// its line.
    pub fn compute(
        config: &RenderConfig,
        caption: &LineText,
        caption_font: &dyn Typeface,
        date: Option<&LineText>,
        date_font: &dyn Typeface,
    ) -> Self {
        let width = config.output_width();
        let height = config.output_height();
        let scale = config.scale();

        let padding = ((config.padding * scale).round() as u32).min((width - 1) / 2);
        let side = width - 2 * padding;
        let photo = Region {
            x: padding,
            y: padding,
            width: side,
            height: side,
        };

        let gap = if date.is_some() {
            config.caption_gap
        } else {
            config.caption_gap_without_date
        };

        let caption_top = photo.bottom() as f32 + gap * scale;
        let caption = place_line(
            caption,
            caption_font,
            padding as f32,
            caption_top,
            config.caption_size * scale,
            config.line_height,
        );

        let date = date.map(|line| {
            place_line(
                line,
                date_font,
                padding as f32,
                caption.top + caption.line_height,
                config.date_size * scale,
                config.line_height,
            )
        });

        Self {
            width,
            height,
            photo,
            caption,
            date,
        }
    }

    /// Area text may paint into: the content box below the photo.
    pub fn text_clip(&self) -> ClipRect {
        ClipRect {
            x0: self.photo.x as i64,
            y0: self.photo.bottom() as i64,
            x1: self.photo.right() as i64,
            y1: self.height as i64,
        }
    }
}

fn place_line(
    line: &LineText,
    font: &dyn Typeface,
    x: f32,
    top: f32,
    px: f32,
    line_height_factor: f32,
) -> TextLine {
    let line_height = px * line_height_factor;
    let metrics = font.line_metrics(px);
    let half_leading = (line_height - metrics.height()) / 2.0;

    TextLine {
        text: line.text.clone(),
        placeholder: line.placeholder,
        x,
        top,
        baseline: top + half_leading + metrics.ascent,
        px,
        line_height,
    }
}
