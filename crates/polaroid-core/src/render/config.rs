//! Render configuration.
//!
//! Frame metrics are expressed in "reference pixels" of a frame that is
//! `reference_width` wide, then scaled to the output width. This keeps the
//! caption and padding proportions independent of the export resolution and
//! of the photo's own resolution.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Height of the frame relative to its width (1 : 1.2).
pub const FRAME_ASPECT: f64 = 1.2;

/// Geometry and quality settings for the compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels; the height follows from [`FRAME_ASPECT`].
    pub width: u32,
    /// Width of the reference frame the metrics below are measured against.
    pub reference_width: f32,
    /// Uniform padding around the photo, in reference pixels.
    pub padding: f32,
    /// Caption font size, in reference pixels.
    pub caption_size: f32,
    /// Date font size, in reference pixels.
    pub date_size: f32,
    /// Space between photo and caption when a date line follows.
    pub caption_gap: f32,
    /// Space between photo and caption when there is no date line.
    pub caption_gap_without_date: f32,
    /// Line box height as a multiple of the font size.
    pub line_height: f32,
    /// Resample filter used to scale the photo into its square.
    pub filter: FilterType,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960,
            reference_width: 320.0,
            padding: 18.0,
            caption_size: 18.0,
            date_size: 15.0,
            caption_gap: 5.0,
            caption_gap_without_date: 15.0,
            line_height: 1.2,
            filter: FilterType::Bilinear,
        }
    }
}

impl RenderConfig {
    /// Config for a given output width, other metrics at their defaults.
    pub fn with_width(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Output width, at least one pixel.
    pub fn output_width(&self) -> u32 {
        self.width.max(1)
    }

    /// Output height: `width * 1.2`, rounded.
    pub fn output_height(&self) -> u32 {
        ((self.output_width() as f64 * FRAME_ASPECT).round() as u32).max(1)
    }

    /// Output pixels per reference pixel.
    pub fn scale(&self) -> f32 {
        if self.reference_width > 0.0 {
            self.output_width() as f32 / self.reference_width
        } else {
            1.0
        }
    }
}
