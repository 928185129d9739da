//! Frame color and font registries.
//!
//! The palette and the font list are supplied by the host and are static for
//! the lifetime of an edit session. The core only looks entries up by index
//! or name.

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::text::FontHandle;

/// A named frame color with its matching text color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub name: String,
    pub frame: HexColor,
    pub text: HexColor,
}

impl FrameStyle {
    pub fn new(name: impl Into<String>, frame: HexColor, text: HexColor) -> Self {
        Self {
            name: name.into(),
            frame,
            text,
        }
    }
}

/// A named font choice: one face for the caption, one for the date line.
#[derive(Debug, Clone)]
pub struct FontPair {
    pub name: String,
    pub caption: FontHandle,
    pub date: FontHandle,
}

impl FontPair {
    pub fn new(name: impl Into<String>, caption: FontHandle, date: FontHandle) -> Self {
        Self {
            name: name.into(),
            caption,
            date,
        }
    }
}

/// Resolved frame and text colors for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub frame: HexColor,
    pub text: HexColor,
}

impl Default for ColorScheme {
    /// White frame with black text, used when a style index is out of range.
    fn default() -> Self {
        Self {
            frame: HexColor::WHITE,
            text: HexColor::BLACK,
        }
    }
}

/// How the frame color is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleSelection {
    /// An entry of the frame palette, by index.
    Preset(usize),
    /// A user-picked frame color; text is drawn in black.
    Custom(HexColor),
}

impl Default for StyleSelection {
    fn default() -> Self {
        StyleSelection::Preset(0)
    }
}

/// Ordered frame palette and font list.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    frames: Vec<FrameStyle>,
    fonts: Vec<FontPair>,
}

impl StyleRegistry {
    pub fn new(frames: Vec<FrameStyle>, fonts: Vec<FontPair>) -> Self {
        Self { frames, fonts }
    }

    /// Registry with the built-in palette and the given fonts.
    pub fn with_default_frames(fonts: Vec<FontPair>) -> Self {
        Self::new(default_frames(), fonts)
    }

    pub fn frames(&self) -> &[FrameStyle] {
        &self.frames
    }

    pub fn fonts(&self) -> &[FontPair] {
        &self.fonts
    }

    pub fn frame(&self, index: usize) -> Option<&FrameStyle> {
        self.frames.get(index)
    }

    pub fn font(&self, index: usize) -> Option<&FontPair> {
        self.fonts.get(index)
    }

    /// Replace the frame palette.
    pub fn set_frames(&mut self, frames: Vec<FrameStyle>) {
        self.frames = frames;
    }

    /// Append a font choice, returning its index.
    pub fn push_font(&mut self, font: FontPair) -> usize {
        self.fonts.push(font);
        self.fonts.len() - 1
    }

    /// Index of the frame style with the given name.
    pub fn find_frame(&self, name: &str) -> Option<usize> {
        self.frames.iter().position(|f| f.name == name)
    }

    /// Index of the font choice with the given name.
    pub fn find_font(&self, name: &str) -> Option<usize> {
        self.fonts.iter().position(|f| f.name == name)
    }

    /// Resolve a style selection to concrete colors.
    ///
    /// Custom colors pair with black text. A preset index past the end of
    /// the palette falls back to [`ColorScheme::default`].
    pub fn color_scheme(&self, selection: StyleSelection) -> ColorScheme {
        match selection {
            StyleSelection::Custom(frame) => ColorScheme {
                frame,
                text: HexColor::BLACK,
            },
            StyleSelection::Preset(index) => self
                .frame(index)
                .map(|style| ColorScheme {
                    frame: style.frame,
                    text: style.text,
                })
                .unwrap_or_default(),
        }
    }

    /// Resolve a font index, falling back to the first font.
    pub fn font_pair(&self, index: usize) -> Option<&FontPair> {
        self.font(index).or_else(|| self.fonts.first())
    }
}

/// The built-in frame palette.
pub fn default_frames() -> Vec<FrameStyle> {
    [
        ("Classic", (0xFF, 0xFF, 0xFF), (0x00, 0x00, 0x00)),
        ("Cream", (0xF5, 0xF0, 0xE1), (0x3B, 0x30, 0x24)),
        ("Midnight", (0x1F, 0x29, 0x37), (0xF9, 0xFA, 0xFB)),
        ("Blush", (0xF8, 0xD7, 0xDA), (0x5A, 0x2A, 0x2F)),
        ("Sage", (0xD9, 0xE4, 0xD1), (0x2F, 0x3D, 0x2A)),
        ("Sky", (0xDB, 0xEA, 0xFE), (0x1E, 0x3A, 0x8A)),
        ("Sunflower", (0xFD, 0xE6, 0x8A), (0x78, 0x35, 0x0F)),
        ("Charcoal", (0x33, 0x33, 0x33), (0xFF, 0xFF, 0xFF)),
        ("Lavender", (0xE9, 0xD5, 0xFF), (0x4C, 0x1D, 0x95)),
    ]
    .into_iter()
    .map(|(name, (fr, fg, fb), (tr, tg, tb))| {
        FrameStyle::new(name, HexColor::rgb(fr, fg, fb), HexColor::rgb(tr, tg, tb))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_names_are_unique() {
        let frames = default_frames();
        assert!(!frames.is_empty());
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(
                frames.iter().position(|f| f.name == frame.name),
                Some(i),
                "duplicate name {}",
                frame.name
            );
        }
    }

    #[test]
    fn test_color_scheme_preset() {
        let registry = StyleRegistry::with_default_frames(Vec::new());
        let scheme = registry.color_scheme(StyleSelection::Preset(2));
        assert_eq!(scheme.frame, HexColor::rgb(0x1F, 0x29, 0x37));
        assert_eq!(scheme.text, HexColor::rgb(0xF9, 0xFA, 0xFB));
    }

    #[test]
    fn test_color_scheme_custom_uses_black_text() {
        let registry = StyleRegistry::with_default_frames(Vec::new());
        let custom = HexColor::rgb(0x11, 0x22, 0x33);
        let scheme = registry.color_scheme(StyleSelection::Custom(custom));
        assert_eq!(scheme.frame, custom);
        assert_eq!(scheme.text, HexColor::BLACK);
    }

    #[test]
    fn test_color_scheme_out_of_range_falls_back() {
        let registry = StyleRegistry::default();
        assert_eq!(
            registry.color_scheme(StyleSelection::Preset(7)),
            ColorScheme::default()
        );
    }

    #[test]
    fn test_find_frame_by_name() {
        let registry = StyleRegistry::with_default_frames(Vec::new());
        assert_eq!(registry.find_frame("Classic"), Some(0));
        assert_eq!(registry.find_frame("Sage"), Some(4));
        assert_eq!(registry.find_frame("Neon"), None);
    }

    #[test]
    fn test_font_pair_without_fonts() {
        let registry = StyleRegistry::default();
        assert!(registry.font_pair(0).is_none());
        assert!(registry.find_font("Anything").is_none());
    }
}
