//! The editor object the browser UI drives.
//!
//! `PolaroidEditor` owns one edit session plus the style registry and the
//! exporter. The UI forwards every user event to a method here and redraws
//! from `render_preview()`.
//!
//! ```typescript
//! const editor = new PolaroidEditor(960);
//! editor.register_font("Caveat", captionBytes, dateBytes);
//! editor.upload(decode_image(bytes));
//! editor.apply_crop(compute_crop(w, h, 400, 400, pan.x, pan.y, zoom));
//! editor.caption = "Summer";
//! const frame = editor.render_preview();
//! ```

use std::sync::Arc;

use polaroid_core::export::{ExportOptions, Exporter, DOWNLOAD_NOTICE};
use polaroid_core::render::{Compositor, RenderConfig};
use polaroid_core::session::{EditSession, RenderPurpose};
use polaroid_core::style::{FontPair, FrameStyle, StyleRegistry};
use polaroid_core::text::GlyphTypeface;
use wasm_bindgen::prelude::*;

use crate::export::{share_promise, BrowserDownload};
use crate::transform::compute_crop;
use crate::types::{JsBitmap, JsCropRect, JsImage};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct PolaroidEditor {
    session: EditSession,
    registry: StyleRegistry,
    exporter: Exporter,
}

#[wasm_bindgen]
impl PolaroidEditor {
    /// Create an editor exporting frames `width` pixels wide (960 by default).
    #[wasm_bindgen(constructor)]
    pub fn new(width: Option<u32>) -> PolaroidEditor {
        let config = width.map(RenderConfig::with_width).unwrap_or_default();
        Self {
            session: EditSession::new(),
            registry: StyleRegistry::with_default_frames(Vec::new()),
            exporter: Exporter::new(Compositor::new(config), ExportOptions::default()),
        }
    }

    // ---- styles and fonts ----

    /// Replace the frame palette with `[{name, frame, text}, ...]`.
    pub fn set_frames(&mut self, frames: JsValue) -> Result<(), JsValue> {
        let frames: Vec<FrameStyle> = serde_wasm_bindgen::from_value(frames).map_err(to_js)?;
        log::debug!("palette replaced ({} styles)", frames.len());
        self.registry.set_frames(frames);
        Ok(())
    }

    /// The current frame palette as `[{name, frame, text}, ...]`.
    pub fn frames(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.registry.frames()).map_err(to_js)
    }

    /// Add a font choice from TrueType/OpenType bytes, returning its index.
    pub fn register_font(
        &mut self,
        name: &str,
        caption_font: Vec<u8>,
        date_font: Vec<u8>,
    ) -> Result<usize, JsValue> {
        let caption = GlyphTypeface::from_bytes(name, caption_font).map_err(to_js)?;
        let date = GlyphTypeface::from_bytes(name, date_font).map_err(to_js)?;
        Ok(self
            .registry
            .push_font(FontPair::new(name, Arc::new(caption), Arc::new(date))))
    }

    pub fn font_names(&self) -> Vec<String> {
        self.registry.fonts().iter().map(|f| f.name.clone()).collect()
    }

    // ---- upload and crop ----

    pub fn upload(&mut self, image: &JsImage) {
        self.session.upload_image(image.handle().clone());
    }

    /// Decode and upload in one step.
    pub fn upload_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let image = polaroid_core::decode_image(bytes).map_err(to_js)?;
        self.session.upload_image(image);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.session.has_image()
    }

    /// The uncropped upload, for the crop dialog.
    pub fn source_image(&self) -> Option<JsImage> {
        self.session.source_image().cloned().map(JsImage::from_handle)
    }

    /// Whether the crop dialog should be open.
    #[wasm_bindgen(getter)]
    pub fn crop_pending(&self) -> bool {
        self.session.crop_pending()
    }

    /// Re-open the crop dialog for the current upload.
    pub fn request_crop(&mut self) -> Result<JsImage, JsValue> {
        self.session
            .request_crop()
            .map(|image| JsImage::from_handle(image.clone()))
            .map_err(to_js)
    }

    pub fn apply_crop(&mut self, rect: &JsCropRect) -> Result<(), JsValue> {
        self.session.apply_crop((*rect).into()).map_err(to_js)
    }

    /// Compute the crop from the dialog's pan/zoom state and apply it.
    pub fn apply_crop_from_view(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        offset_x: f64,
        offset_y: f64,
        zoom: f64,
    ) -> Result<JsCropRect, JsValue> {
        let (width, height) = self
            .session
            .source_image()
            .map(|image| image.dimensions())
            .ok_or_else(|| JsValue::from_str("No image has been uploaded"))?;
        let rect = compute_crop(
            width,
            height,
            viewport_width,
            viewport_height,
            offset_x,
            offset_y,
            zoom,
        );
        self.apply_crop(&rect)?;
        Ok(rect)
    }

    pub fn cancel_crop(&mut self) {
        self.session.cancel_crop();
    }

    // ---- text ----

    #[wasm_bindgen(getter)]
    pub fn caption(&self) -> String {
        self.session.caption().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_caption(&mut self, caption: String) {
        self.session.set_caption(caption);
    }

    /// Stored date as `YYYY-MM-DD`, or empty.
    #[wasm_bindgen(getter)]
    pub fn date(&self) -> String {
        self.session.date_iso().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_date(&mut self, iso: String) {
        self.session.set_date(iso);
    }

    #[wasm_bindgen(getter)]
    pub fn show_date(&self) -> bool {
        self.session.show_date()
    }

    pub fn toggle_show_date(&mut self) {
        self.session.toggle_show_date();
    }

    // ---- style ----

    #[wasm_bindgen(getter)]
    pub fn font_index(&self) -> usize {
        self.session.font_index()
    }

    #[wasm_bindgen(setter)]
    pub fn set_font_index(&mut self, index: usize) {
        self.session.set_font(index);
    }

    /// Palette index, or -1 while a custom color is active.
    #[wasm_bindgen(getter)]
    pub fn style_index(&self) -> i32 {
        self.session.style_index()
    }

    pub fn set_style(&mut self, index: usize) {
        self.session.set_style(index);
    }

    /// The custom frame color as `#rrggbb`, if one is active.
    #[wasm_bindgen(getter)]
    pub fn custom_color(&self) -> Option<String> {
        self.session.custom_color().map(|c| c.to_string())
    }

    pub fn set_custom_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.session.set_custom_color(hex).map_err(to_js)
    }

    /// Returns false when no style has that name.
    pub fn select_style_by_name(&mut self, name: &str) -> bool {
        self.session.select_style_by_name(&self.registry, name)
    }

    /// Returns false when no font has that name.
    pub fn select_font_by_name(&mut self, name: &str) -> bool {
        self.session.select_font_by_name(&self.registry, name)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    // ---- output ----

    /// Render the live preview, placeholders included.
    pub fn render_preview(&self) -> Result<JsBitmap, JsValue> {
        let view = self.session.live_view(&self.registry, RenderPurpose::Preview);
        self.exporter
            .compositor()
            .render(&view)
            .map(JsBitmap::from)
            .map_err(to_js)
    }

    /// Render the frame as it will be exported and encode it as PNG.
    ///
    /// Errors carry the user-facing notice.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.exporter
            .export_file(&self.session, &self.registry)
            .map(|file| file.bytes)
            .map_err(|e| JsValue::from_str(e.notice()))
    }

    /// Export and download `polaroid.png`. Returns the success notice.
    pub fn download(&self) -> Result<String, JsValue> {
        self.exporter
            .download(&self.session, &self.registry, &mut BrowserDownload)
            .map_err(|e| JsValue::from_str(e.notice()))?;
        Ok(DOWNLOAD_NOTICE.to_string())
    }

    /// Export and open the platform share sheet.
    ///
    /// The PNG is encoded before the promise is created, so later edits do
    /// not affect what is shared.
    pub fn share(&self) -> js_sys::Promise {
        match self.exporter.export_file(&self.session, &self.registry) {
            Ok(file) => share_promise(file, self.exporter.options().share_title.clone()),
            Err(e) => {
                log::warn!("share failed: {}", e);
                js_sys::Promise::reject(&JsValue::from_str(e.notice()))
            }
        }
    }
}

impl Default for PolaroidEditor {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PolaroidEditor {
    /// Register an already constructed font pair.
    pub fn push_font(&mut self, font: FontPair) -> usize {
        self.registry.push_font(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use polaroid_core::text::{LineMetrics, TextRun, Typeface};

    #[derive(Debug)]
    struct NullTypeface;

    impl Typeface for NullTypeface {
        fn family(&self) -> &str {
            "Null"
        }

        fn line_metrics(&self, px: f32) -> LineMetrics {
            LineMetrics {
                ascent: px * 0.8,
                descent: px * 0.2,
            }
        }

        fn measure(&self, _text: &str, _px: f32) -> f32 {
            0.0
        }

        fn draw(&self, _canvas: &mut RgbaImage, _run: &TextRun<'_>) {}
    }

    fn editor() -> PolaroidEditor {
        let mut editor = PolaroidEditor::new(Some(100));
        editor.push_font(FontPair::new(
            "Null",
            Arc::new(NullTypeface),
            Arc::new(NullTypeface),
        ));
        editor
    }

    fn photo() -> JsImage {
        JsImage::new(40, 20, vec![90u8; 40 * 20 * 4]).unwrap()
    }

    #[test]
    fn test_new_editor_defaults() {
        let editor = PolaroidEditor::default();
        assert!(!editor.has_image());
        assert!(!editor.crop_pending());
        assert_eq!(editor.caption(), "");
        assert!(editor.show_date());
        assert_eq!(editor.style_index(), 0);
        assert_eq!(editor.custom_color(), None);
    }

    #[test]
    fn test_upload_requests_crop() {
        let mut editor = editor();
        editor.upload(&photo());
        assert!(editor.has_image());
        assert!(editor.crop_pending());
    }

    #[test]
    fn test_apply_crop_from_view() {
        let mut editor = editor();
        editor.upload(&photo());

        let rect = editor
            .apply_crop_from_view(200.0, 200.0, 0.0, 0.0, 1.0)
            .unwrap();

        assert_eq!((rect.x(), rect.y(), rect.width()), (10, 0, 20));
        assert!(!editor.crop_pending());
    }

    #[test]
    fn test_style_exclusivity() {
        let mut editor = editor();
        editor.set_custom_color("#112233").unwrap();
        assert_eq!(editor.style_index(), -1);
        assert_eq!(editor.custom_color().as_deref(), Some("#112233"));

        editor.set_style(2);
        assert_eq!(editor.custom_color(), None);
        assert_eq!(editor.style_index(), 2);
    }

    #[test]
    fn test_select_by_name() {
        let mut editor = editor();
        assert!(editor.select_style_by_name("Cream"));
        assert_eq!(editor.style_index(), 1);
        assert!(!editor.select_style_by_name("Nope"));
        assert!(editor.select_font_by_name("Null"));
        assert_eq!(editor.font_names(), vec!["Null".to_string()]);
    }

    #[test]
    fn test_render_preview_size() {
        let mut editor = editor();
        editor.upload(&photo());
        editor.cancel_crop();

        let frame = editor.render_preview().unwrap();

        assert_eq!((frame.width(), frame.height()), (100, 120));
        assert_eq!(&frame.pixels()[0..4], &Rgba([255, 255, 255, 255]).0);
    }

    #[test]
    fn test_export_png_bytes() {
        let mut editor = editor();
        editor.upload(&photo());
        editor.set_caption("Hi".to_string());

        let png = editor.export_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_reset() {
        let mut editor = editor();
        editor.upload(&photo());
        editor.set_caption("Trip".to_string());
        editor.set_date("2024-03-07".to_string());
        editor.toggle_show_date();

        editor.reset();

        assert!(!editor.has_image());
        assert_eq!(editor.caption(), "");
        assert_eq!(editor.date(), "");
        assert!(editor.show_date());
    }
}
