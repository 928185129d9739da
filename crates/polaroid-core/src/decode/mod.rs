//! Decoding of uploaded photos.
//!
//! The file picker hands over the raw bytes of a JPEG or PNG. This module
//! turns them into an [`ImageHandle`]: a shared RGBA buffer with EXIF
//! orientation already applied, so the crop dialog and the renderer agree on
//! the image's natural dimensions.
//!
//! Decoding finishes before the handle reaches the edit session, so a crop can
//! never be applied to an image that is still being decoded.
//!
//! # Examples
//!
//! ```ignore
//! use polaroid_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod types;
mod upload;

pub use types::{DecodeError, FilterType, ImageHandle, Orientation};
pub use upload::{decode_image, get_orientation};
