//! Frame compositing.
//!
//! [`Compositor::render`] is the single rasterization path: the preview and
//! the export both call it with a [`LiveView`] snapshot, so whatever the
//! preview shows is exactly what gets exported.

use image::{imageops, Rgba, RgbaImage};

use super::config::RenderConfig;
use super::layout::{FrameLayout, LineText, TextLine};
use super::RenderError;
use crate::decode::ImageHandle;
use crate::style::{ColorScheme, FontPair};
use crate::text::{blend_pixel, ClipRect, TextRun, Typeface};
use crate::transform::{apply_crop, center_square};

/// The composed frame, as RGBA pixels.
pub type Bitmap = RgbaImage;

/// Opacity applied to preview placeholders, mirroring a muted input hint.
pub const PLACEHOLDER_ALPHA: u8 = 128;

/// Everything the compositor needs to draw one frame.
///
/// A live view is a snapshot: it owns (shared) handles to the image and
/// fonts, so later session edits do not affect a render in progress.
#[derive(Debug, Clone)]
pub struct LiveView {
    /// The displayed photo: the crop result if any, else the source.
    pub image: Option<ImageHandle>,
    pub colors: ColorScheme,
    pub fonts: Option<FontPair>,
    pub caption: LineText,
    /// Formatted date line, `None` when the date is hidden. An empty line
    /// keeps the shown-date layout without drawing anything.
    pub date: Option<LineText>,
}

impl LiveView {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Draws frames at a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    config: RenderConfig,
}

impl Compositor {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Compute the frame layout for a view.
    pub fn layout(&self, view: &LiveView) -> Result<FrameLayout, RenderError> {
        let fonts = view.fonts.as_ref().ok_or(RenderError::MissingFont)?;
        Ok(FrameLayout::compute(
            &self.config,
            &view.caption,
            fonts.caption.as_ref(),
            view.date.as_ref(),
            fonts.date.as_ref(),
        ))
    }

    /// Rasterize a view into a frame bitmap.
    ///
    /// # Errors
    ///
    /// * `RenderError::NoImage` when the view has no photo
    /// * `RenderError::MissingFont` when the font list is empty
    pub fn render(&self, view: &LiveView) -> Result<Bitmap, RenderError> {
        let image = view.image.as_ref().ok_or(RenderError::NoImage)?;
        let fonts = view.fonts.as_ref().ok_or(RenderError::MissingFont)?;
        let layout = self.layout(view)?;

        let mut canvas =
            RgbaImage::from_pixel(layout.width, layout.height, view.colors.frame.to_rgba());

        let photo = self.fit_photo(image, layout.photo.width);
        paste_photo(&mut canvas, &photo, layout.photo.x, layout.photo.y);

        let clip = layout.text_clip();
        let text_color = view.colors.text.to_rgba();
        draw_line(&mut canvas, &layout.caption, fonts.caption.as_ref(), text_color, clip);
        if let Some(date) = &layout.date {
            draw_line(&mut canvas, date, fonts.date.as_ref(), text_color, clip);
        }

        log::debug!(
            "rendered {}x{} frame (date line: {})",
            layout.width,
            layout.height,
            layout.date.is_some()
        );
        Ok(canvas)
    }

    /// Center-crop the photo to a square and scale it to `side` pixels.
    ///
    /// Uncropped uploads go through the same path, so "no crop yet" always
    /// means "center square" in both preview and export.
    fn fit_photo(&self, image: &ImageHandle, side: u32) -> RgbaImage {
        let (width, height) = image.dimensions();
        let square = apply_crop(image, center_square(width, height));

        if square.width() == side {
            return square.pixels().clone();
        }
        imageops::resize(square.pixels(), side, side, self.config.filter.to_image_filter())
    }
}

/// Composite the photo onto the canvas, honoring per-pixel alpha.
fn paste_photo(canvas: &mut RgbaImage, photo: &RgbaImage, left: u32, top: u32) {
    let clip = ClipRect {
        x0: 0,
        y0: 0,
        x1: canvas.width() as i64,
        y1: canvas.height() as i64,
    };
    for (x, y, pixel) in photo.enumerate_pixels() {
        blend_pixel(
            canvas,
            (left + x) as i64,
            (top + y) as i64,
            *pixel,
            1.0,
            &clip,
        );
    }
}

fn draw_line(
    canvas: &mut RgbaImage,
    line: &TextLine,
    font: &dyn Typeface,
    color: Rgba<u8>,
    clip: ClipRect,
) {
    if line.text.is_empty() {
        return;
    }

    let mut color = color;
    if line.placeholder {
        color.0[3] = PLACEHOLDER_ALPHA;
    }

    font.draw(
        canvas,
        &TextRun {
            text: &line.text,
            x: line.x,
            baseline: line.baseline,
            px: line.px,
            color,
            clip,
        },
    );
}
