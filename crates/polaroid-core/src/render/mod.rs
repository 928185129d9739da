//! The composite renderer.
//!
//! Turns a [`LiveView`] (photo, colors, fonts, caption and date) into a
//! polaroid frame bitmap with a 1 : 1.2 aspect ratio:
//!
//! 1. The whole canvas is filled with the frame color
//! 2. The photo is center-cropped to a square and drawn inside uniform padding
//! 3. The caption is drawn left-aligned below the photo
//! 4. An optional, smaller date line follows the caption
//!
//! Font sizes and padding scale with the canvas width, not with the photo's
//! resolution, so every export size has the same proportions.

mod composite;
mod config;
mod layout;

use thiserror::Error;

pub use composite::{Bitmap, Compositor, LiveView, PLACEHOLDER_ALPHA};
pub use config::{RenderConfig, FRAME_ASPECT};
pub use layout::{FrameLayout, LineText, Region, TextLine};

/// Errors that can occur while rendering a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// There is no photo to render.
    #[error("No image to render")]
    NoImage,

    /// The font list is empty.
    #[error("No font available for caption and date")]
    MissingFont,
}
