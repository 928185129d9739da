//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use polaroid_core::text::BlockTypeface;
use polaroid_core::{FontPair, StyleRegistry};

pub const BACKGROUND: Rgba<u8> = Rgba([30, 60, 90, 255]);
pub const SUBJECT: Rgba<u8> = Rgba([220, 40, 40, 255]);

pub fn registry() -> StyleRegistry {
    StyleRegistry::with_default_frames(vec![FontPair::new(
        "Block",
        Arc::new(BlockTypeface),
        Arc::new(BlockTypeface),
    )])
}

/// A photo with a centered square subject on a flat background.
pub fn subject_photo(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
    let side = width.min(height) / 2;
    let rect = Rect::at(((width - side) / 2) as i32, ((height - side) / 2) as i32)
        .of_size(side, side);
    draw_filled_rect_mut(&mut img, rect, SUBJECT);
    img
}

/// A photo with a filled circle at `center`, for checking where a crop lands.
pub fn marker_photo(width: u32, height: u32, center: (i32, i32), radius: i32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
    draw_filled_circle_mut(&mut img, center, radius, SUBJECT);
    img
}

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .unwrap();
    buffer.into_inner()
}
