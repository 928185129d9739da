//! The edit session: everything the user has chosen for one polaroid.
//!
//! The session is a plain state machine. The UI translates events into the
//! transition methods below and asks for a [`LiveView`] whenever it needs to
//! draw; there are no callbacks and no hidden state elsewhere.
//!
//! # Transitions
//!
//! | Transition | Effect |
//! |---|---|
//! | `upload_image` | new source, crop cleared, crop dialog requested |
//! | `apply_crop` | crop the source into a new displayed image |
//! | `cancel_crop` | close the dialog, keep whatever was displayed |
//! | `set_caption` / `set_date` / `toggle_show_date` / `set_font` | field updates |
//! | `set_style` / `set_custom_color` | mutually exclusive frame color choice |
//! | `reset` | back to construction defaults |

use thiserror::Error;

use crate::color::{ColorError, HexColor};
use crate::decode::ImageHandle;
use crate::render::{LineText, LiveView};
use crate::style::{StyleRegistry, StyleSelection};
use crate::text::{format_date, DATE_PLACEHOLDER};
use crate::transform::{apply_crop, CropRect};

/// Hint shown in the preview while the caption is empty.
pub const CAPTION_PLACEHOLDER: &str = "Your Caption";

/// Errors returned by session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The transition needs an uploaded image.
    #[error("No image has been uploaded")]
    NoImage,

    /// A custom frame color could not be parsed.
    #[error("Invalid custom color: {0}")]
    InvalidColor(#[from] ColorError),
}

/// What a live view is for.
///
/// Previews show placeholder hints for an empty caption or date; exports
/// never contain them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPurpose {
    Preview,
    Export,
}

/// Mutable editing state for one polaroid.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    caption: String,
    date_iso: String,
    show_date: bool,
    style: StyleSelection,
    font_index: usize,
    source_image: Option<ImageHandle>,
    cropped_image: Option<ImageHandle>,
    crop_pending: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            caption: String::new(),
            date_iso: String::new(),
            show_date: true,
            style: StyleSelection::default(),
            font_index: 0,
            source_image: None,
            cropped_image: None,
            crop_pending: false,
        }
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// The stored date, `YYYY-MM-DD` or empty.
    pub fn date_iso(&self) -> &str {
        &self.date_iso
    }

    pub fn show_date(&self) -> bool {
        self.show_date
    }

    pub fn style(&self) -> StyleSelection {
        self.style
    }

    /// Palette index of the frame style, or `-1` for a custom color.
    pub fn style_index(&self) -> i32 {
        match self.style {
            StyleSelection::Preset(index) => i32::try_from(index).unwrap_or(i32::MAX),
            StyleSelection::Custom(_) => -1,
        }
    }

    /// The custom frame color, set only when `style_index() == -1`.
    pub fn custom_color(&self) -> Option<HexColor> {
        match self.style {
            StyleSelection::Custom(color) => Some(color),
            StyleSelection::Preset(_) => None,
        }
    }

    pub fn font_index(&self) -> usize {
        self.font_index
    }

    pub fn source_image(&self) -> Option<&ImageHandle> {
        self.source_image.as_ref()
    }

    pub fn cropped_image(&self) -> Option<&ImageHandle> {
        self.cropped_image.as_ref()
    }

    /// The photo the frame shows: the crop result, else the raw upload.
    pub fn displayed_image(&self) -> Option<&ImageHandle> {
        self.cropped_image.as_ref().or(self.source_image.as_ref())
    }

    pub fn has_image(&self) -> bool {
        self.source_image.is_some()
    }

    /// Whether the crop dialog should currently be open.
    pub fn crop_pending(&self) -> bool {
        self.crop_pending
    }

    /// Replace the source photo.
    ///
    /// Any previous crop belongs to the old photo and is dropped. The crop
    /// dialog is requested for the new photo.
    pub fn upload_image(&mut self, image: ImageHandle) {
        log::info!("upload {}x{}", image.width(), image.height());
        self.source_image = Some(image);
        self.cropped_image = None;
        self.crop_pending = true;
    }

    /// Re-open the crop dialog for the current source photo.
    pub fn request_crop(&mut self) -> Result<&ImageHandle, SessionError> {
        let source = self.source_image.as_ref().ok_or(SessionError::NoImage)?;
        self.crop_pending = true;
        Ok(source)
    }

    /// Crop the source photo to `rect` and display the result.
    ///
    /// The rectangle is in source pixels. It is clamped to the image and then
    /// narrowed to its centered square.
    pub fn apply_crop(&mut self, rect: CropRect) -> Result<(), SessionError> {
        let source = self.source_image.as_ref().ok_or(SessionError::NoImage)?;
        let (width, height) = source.dimensions();
        let rect = rect.clamped_to(width, height).to_square();
        let cropped = apply_crop(source, rect);
        log::debug!(
            "crop {:?} -> {}x{}",
            rect,
            cropped.width(),
            cropped.height()
        );
        self.cropped_image = Some(cropped);
        self.crop_pending = false;
        Ok(())
    }

    /// Close the crop dialog without cropping.
    ///
    /// An earlier crop stays in place. A fresh upload keeps showing the
    /// uncropped source, which the renderer center-crops.
    pub fn cancel_crop(&mut self) {
        log::debug!("crop cancelled");
        self.crop_pending = false;
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Store a `YYYY-MM-DD` date (or empty to clear it).
    pub fn set_date(&mut self, iso: impl Into<String>) {
        self.date_iso = iso.into();
    }

    /// Flip date visibility. The stored date is kept either way.
    pub fn toggle_show_date(&mut self) {
        self.show_date = !self.show_date;
        log::debug!("show date: {}", self.show_date);
    }

    pub fn set_show_date(&mut self, show: bool) {
        self.show_date = show;
    }

    pub fn set_font(&mut self, index: usize) {
        self.font_index = index;
    }

    /// Pick a palette entry; clears any custom color.
    pub fn set_style(&mut self, index: usize) {
        self.style = StyleSelection::Preset(index);
    }

    /// Pick a custom frame color from a hex string; forces `style_index() == -1`.
    ///
    /// An unparseable color leaves the session untouched.
    pub fn set_custom_color(&mut self, hex: &str) -> Result<(), SessionError> {
        let color = HexColor::parse(hex)?;
        self.style = StyleSelection::Custom(color);
        Ok(())
    }

    /// Select a palette entry by name. Unknown names are ignored.
    pub fn select_style_by_name(&mut self, registry: &StyleRegistry, name: &str) -> bool {
        match registry.find_frame(name) {
            Some(index) => {
                self.set_style(index);
                true
            }
            None => false,
        }
    }

    /// Select a font by name. Unknown names are ignored.
    pub fn select_font_by_name(&mut self, registry: &StyleRegistry, name: &str) -> bool {
        match registry.find_font(name) {
            Some(index) => {
                self.set_font(index);
                true
            }
            None => false,
        }
    }

    /// Return every field to its construction default.
    pub fn reset(&mut self) {
        log::info!("session reset");
        *self = Self::default();
    }

    /// Snapshot the session into something the compositor can draw.
    pub fn live_view(&self, registry: &StyleRegistry, purpose: RenderPurpose) -> LiveView {
        let caption = match (self.caption.is_empty(), purpose) {
            (true, RenderPurpose::Preview) => LineText::placeholder(CAPTION_PLACEHOLDER),
            _ => LineText::new(self.caption.clone()),
        };

        let date = if self.show_date {
            match (format_date(&self.date_iso), purpose) {
                (Some(text), _) => Some(LineText::new(text)),
                (None, RenderPurpose::Preview) => Some(LineText::placeholder(DATE_PLACEHOLDER)),
                (None, RenderPurpose::Export) => Some(LineText::new("")),
            }
        } else {
            None
        };

        LiveView {
            image: self.displayed_image().cloned(),
            colors: registry.color_scheme(self.style),
            fonts: registry.font_pair(self.font_index).cloned(),
            caption,
            date,
        }
    }
}
