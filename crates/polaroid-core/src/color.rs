//! Hex color values used for frame and text colors.
//!
//! Colors arrive as CSS-style hex strings from the style registry and the
//! custom color picker. They are parsed once into [`HexColor`] so the renderer
//! only ever deals with RGB triples.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string does not start with `#`.
    #[error("Color must start with '#': {0:?}")]
    MissingHash(String),

    /// The string has a length other than `#rgb` or `#rrggbb`.
    #[error("Color must be #rgb or #rrggbb, got {0:?}")]
    InvalidLength(String),

    /// A character is not a hex digit.
    #[error("Invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

/// An opaque RGB color parsed from `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    /// Plain white, the fallback frame color.
    pub const WHITE: HexColor = HexColor::rgb(0xFF, 0xFF, 0xFF);
    /// Plain black, the fallback text color and the text color used with
    /// custom frame colors.
    pub const BLACK: HexColor = HexColor::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rgb` or `#rrggbb` string (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(value.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(value.to_string()));
        }

        match digits.len() {
            3 => {
                let nibble = |i: usize| -> u8 {
                    let v = u8::from_str_radix(&digits[i..=i], 16).unwrap_or(0);
                    v * 17
                };
                Ok(Self::rgb(nibble(0), nibble(1), nibble(2)))
            }
            6 => {
                let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };
                Ok(Self::rgb(byte(0), byte(2), byte(4)))
            }
            _ => Err(ColorError::InvalidLength(value.to_string())),
        }
    }

    /// Convert to a fully opaque RGBA pixel.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(HexColor::parse("#112233").unwrap(), HexColor::rgb(0x11, 0x22, 0x33));
        assert_eq!(HexColor::parse("#FFaa00").unwrap(), HexColor::rgb(0xFF, 0xAA, 0x00));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(HexColor::parse("#fff").unwrap(), HexColor::WHITE);
        assert_eq!(HexColor::parse("#000").unwrap(), HexColor::BLACK);
        assert_eq!(HexColor::parse("#1a3").unwrap(), HexColor::rgb(0x11, 0xAA, 0x33));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(HexColor::parse("112233"), Err(ColorError::MissingHash(_))));
        assert!(matches!(HexColor::parse("#1122"), Err(ColorError::InvalidLength(_))));
        assert!(matches!(HexColor::parse("#11223g"), Err(ColorError::InvalidDigit(_))));
        assert!(matches!(HexColor::parse("#"), Err(ColorError::InvalidLength(_))));
    }

    #[test]
    fn test_display_is_lowercase_long_form() {
        assert_eq!(HexColor::parse("#ABC").unwrap().to_string(), "#aabbcc");
    }

    #[test]
    fn test_to_rgba_is_opaque() {
        assert_eq!(HexColor::rgb(1, 2, 3).to_rgba(), Rgba([1, 2, 3, 255]));
    }
}
