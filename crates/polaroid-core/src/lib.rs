//! Polaroid Core - photo framing library
//!
//! This crate holds everything behind the Polaroid editor that does not touch
//! the browser: decoding uploads, the square crop transform, the edit session
//! state machine, frame layout and compositing, and PNG export.
//!
//! The typical flow is:
//!
//! ```ignore
//! use polaroid_core::{decode_image, EditSession, Exporter, RenderPurpose};
//!
//! let mut session = EditSession::new();
//! session.upload_image(decode_image(&bytes)?);
//! session.apply_crop(crop)?;
//! session.set_caption("Summer");
//!
//! let preview = exporter.compositor().render(&session.live_view(&registry, RenderPurpose::Preview))?;
//! let file = exporter.export_file(&session, &registry)?;
//! ```

pub mod color;
pub mod decode;
pub mod export;
pub mod render;
pub mod session;
pub mod style;
pub mod text;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_support;

pub use color::{ColorError, HexColor};
pub use decode::{decode_image, DecodeError, ImageHandle};
pub use export::{
    encode_png, DirectorySink, ExportError, ExportOptions, ExportedFile, Exporter, SaveSink,
    ShareError, ShareSink,
};
pub use render::{Bitmap, Compositor, LiveView, RenderConfig, RenderError};
pub use session::{EditSession, RenderPurpose, SessionError};
pub use style::{ColorScheme, FontPair, FrameStyle, StyleRegistry, StyleSelection};
pub use text::{format_date, FontHandle, GlyphTypeface, Typeface};
pub use transform::{apply_crop, compute_crop_rect, CropRect, CropState, CropTransform, Point, Size};
