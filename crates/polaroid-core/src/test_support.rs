//! Shared fixtures for unit tests.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::decode::ImageHandle;
use crate::style::{FontPair, StyleRegistry};
use crate::text::BlockTypeface;

pub fn block_fonts() -> FontPair {
    FontPair::new("Block", Arc::new(BlockTypeface), Arc::new(BlockTypeface))
}

pub fn registry() -> StyleRegistry {
    StyleRegistry::with_default_frames(vec![block_fonts()])
}

/// A solid-color photo.
pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> ImageHandle {
    ImageHandle::new(RgbaImage::from_pixel(width, height, Rgba(color)))
}
