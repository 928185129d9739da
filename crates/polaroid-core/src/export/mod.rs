//! Export pipeline: snapshot the session, render, encode to PNG and hand the
//! bytes to a save or share sink.
//!
//! Every export takes its own [`LiveView`](crate::render::LiveView) snapshot
//! and owns the encoded bytes, so two exports never share state. Failures
//! never touch the session.
//!
//! # Examples
//!
//! ```ignore
//! use polaroid_core::export::{DirectorySink, Exporter};
//!
//! let exporter = Exporter::default();
//! let mut sink = DirectorySink::new("/tmp");
//! exporter.download(&session, &registry, &mut sink)?;
//! ```

mod png;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{Bitmap, Compositor, RenderError};
use crate::session::{EditSession, RenderPurpose};
use crate::style::StyleRegistry;

pub use png::{encode_bitmap, encode_png, EncodeError, PNG_SIGNATURE};

/// Shown after a successful download.
pub const DOWNLOAD_NOTICE: &str = "Polaroid created successfully!";
/// Shown after the platform share sheet accepted the file.
pub const SHARE_NOTICE: &str = "Share initiated!";

/// Errors raised by a share sink.
///
/// Both variants surface to the user with the same notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The platform has no share capability.
    #[error("Sharing is not available on this platform")]
    Unavailable,

    /// The user dismissed the share sheet, or the platform rejected it.
    #[error("Sharing was cancelled")]
    Cancelled,
}

impl ShareError {
    pub fn notice(&self) -> &'static str {
        "Sharing failed."
    }
}

/// Errors that can occur while exporting a frame.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing has been uploaded yet.
    #[error("No image to export")]
    NoImage,

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Rasterization failed: {0}")]
    Rasterization(#[from] EncodeError),

    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Share(#[from] ShareError),
}

impl ExportError {
    /// One-line message for a toast.
    pub fn notice(&self) -> &'static str {
        match self {
            ExportError::NoImage => "Please upload an image first!",
            ExportError::Render(RenderError::NoImage) => "Please upload an image first!",
            ExportError::Render(_) | ExportError::Rasterization(_) => {
                "Failed to prepare image for sharing."
            }
            ExportError::Save { .. } => "Failed to save image.",
            ExportError::Share(e) => e.notice(),
        }
    }
}

/// File naming for exported frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub filename: String,
    pub mime_type: String,
    pub share_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: "polaroid.png".to_string(),
            mime_type: "image/png".to_string(),
            share_title: "My Polaroid".to_string(),
        }
    }
}

/// An encoded frame ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

/// Destination for a downloaded file.
pub trait SaveSink {
    fn save(&mut self, file: &ExportedFile) -> Result<(), ExportError>;
}

/// Platform share capability.
pub trait ShareSink {
    fn share(&mut self, file: &ExportedFile, title: &str) -> Result<(), ShareError>;
}

/// Writes exported files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    last_saved: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_saved: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent successful save.
    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }
}

impl SaveSink for DirectorySink {
    fn save(&mut self, file: &ExportedFile) -> Result<(), ExportError> {
        let path = self.dir.join(&file.filename);
        fs::write(&path, &file.bytes).map_err(|source| ExportError::Save {
            path: path.clone(),
            source,
        })?;
        log::info!("saved {} bytes to {}", file.bytes.len(), path.display());
        self.last_saved = Some(path);
        Ok(())
    }
}

/// Renders sessions for download or sharing.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    compositor: Compositor,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(compositor: Compositor, options: ExportOptions) -> Self {
        Self {
            compositor,
            options,
        }
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Render the session as it will be exported: no placeholders.
    pub fn export_as_bitmap(
        &self,
        session: &EditSession,
        registry: &StyleRegistry,
    ) -> Result<Bitmap, ExportError> {
        let view = session.live_view(registry, RenderPurpose::Export);
        if !view.has_image() {
            return Err(ExportError::NoImage);
        }
        Ok(self.compositor.render(&view)?)
    }

    /// Render and encode the session into a PNG file.
    pub fn export_file(
        &self,
        session: &EditSession,
        registry: &StyleRegistry,
    ) -> Result<ExportedFile, ExportError> {
        let bitmap = self.export_as_bitmap(session, registry)?;
        let bytes = encode_bitmap(&bitmap)?;
        log::info!(
            "exported {}x{} frame ({} bytes)",
            bitmap.width(),
            bitmap.height(),
            bytes.len()
        );

        Ok(ExportedFile {
            bytes,
            filename: self.options.filename.clone(),
            mime_type: self.options.mime_type.clone(),
        })
    }

    /// Export and save through `sink`.
    ///
    /// The sink is not called when the export fails.
    pub fn download(
        &self,
        session: &EditSession,
        registry: &StyleRegistry,
        sink: &mut dyn SaveSink,
    ) -> Result<(), ExportError> {
        let file = self.export_file(session, registry).inspect_err(|e| {
            log::warn!("download failed: {}", e);
        })?;
        sink.save(&file)
    }

    /// Export and hand the file to the platform share sink.
    pub fn share(
        &self,
        session: &EditSession,
        registry: &StyleRegistry,
        sink: &mut dyn ShareSink,
    ) -> Result<(), ExportError> {
        let file = self.export_file(session, registry)?;
        sink.share(&file, &self.options.share_title).map_err(|e| {
            log::warn!("share failed: {}", e);
            ExportError::Share(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderConfig;
    use crate::test_support::{registry, solid_image};
    use crate::transform::CropRect;

    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<ExportedFile>,
    }

    impl SaveSink for RecordingSink {
        fn save(&mut self, file: &ExportedFile) -> Result<(), ExportError> {
            self.saved.push(file.clone());
            Ok(())
        }
    }

    struct FixedShare {
        result: Result<(), ShareError>,
        titles: Vec<String>,
    }

    impl ShareSink for FixedShare {
        fn share(&mut self, _file: &ExportedFile, title: &str) -> Result<(), ShareError> {
            self.titles.push(title.to_string());
            self.result.clone()
        }
    }

    fn small_exporter() -> Exporter {
        Exporter::new(
            Compositor::new(RenderConfig::with_width(100)),
            ExportOptions::default(),
        )
    }

    fn ready_session() -> EditSession {
        let mut session = EditSession::new();
        session.upload_image(solid_image(40, 40, [200, 0, 0, 255]));
        session.apply_crop(CropRect::new(0, 0, 40, 40)).unwrap();
        session.set_caption("Hi");
        session
    }

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert_eq!(options.filename, "polaroid.png");
        assert_eq!(options.mime_type, "image/png");
        assert_eq!(options.share_title, "My Polaroid");
    }

    #[test]
    fn test_export_without_image() {
        let exporter = small_exporter();
        let session = EditSession::new();
        let mut sink = RecordingSink::default();

        let result = exporter.download(&session, &registry(), &mut sink);

        assert!(matches!(result, Err(ExportError::NoImage)));
        assert!(sink.saved.is_empty());
        assert_eq!(
            result.unwrap_err().notice(),
            "Please upload an image first!"
        );
    }

    #[test]
    fn test_export_as_bitmap_dimensions() {
        let bitmap = small_exporter()
            .export_as_bitmap(&ready_session(), &registry())
            .unwrap();
        assert_eq!(bitmap.dimensions(), (100, 120));
    }

    #[test]
    fn test_download_saves_png() {
        let exporter = small_exporter();
        let mut sink = RecordingSink::default();

        exporter
            .download(&ready_session(), &registry(), &mut sink)
            .unwrap();

        assert_eq!(sink.saved.len(), 1);
        let file = &sink.saved[0];
        assert_eq!(file.filename, "polaroid.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(&file.bytes[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_export_without_fonts_is_render_error() {
        let exporter = small_exporter();
        let empty = StyleRegistry::with_default_frames(Vec::new());

        let result = exporter.export_file(&ready_session(), &empty);

        assert!(matches!(
            result,
            Err(ExportError::Render(RenderError::MissingFont))
        ));
    }

    #[test]
    fn test_share_passes_title() {
        let exporter = small_exporter();
        let mut sink = FixedShare {
            result: Ok(()),
            titles: Vec::new(),
        };

        exporter
            .share(&ready_session(), &registry(), &mut sink)
            .unwrap();

        assert_eq!(sink.titles, vec!["My Polaroid".to_string()]);
    }

    #[test]
    fn test_share_failures_share_a_notice() {
        let exporter = small_exporter();
        let mut notices = Vec::new();

        for failure in [ShareError::Unavailable, ShareError::Cancelled] {
            let mut sink = FixedShare {
                result: Err(failure),
                titles: Vec::new(),
            };
            let err = exporter
                .share(&ready_session(), &registry(), &mut sink)
                .unwrap_err();
            notices.push(err.notice());
        }

        assert_eq!(notices, vec!["Sharing failed.", "Sharing failed."]);
    }

    #[test]
    fn test_export_does_not_mutate_session() {
        let exporter = small_exporter();
        let session = ready_session();
        let before = session.clone();

        let _ = exporter.export_file(&session, &registry());
        let _ = exporter.export_file(&EditSession::new(), &registry());

        assert_eq!(session, before);
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("polaroid-export-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut sink = DirectorySink::new(&dir);
        small_exporter()
            .download(&ready_session(), &registry(), &mut sink)
            .unwrap();

        let path = sink.last_saved().unwrap().to_path_buf();
        assert_eq!(path, dir.join("polaroid.png"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_SIGNATURE);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directory_sink_missing_dir() {
        let mut sink = DirectorySink::new("/nonexistent/polaroid/out");
        let result = small_exporter().download(&ready_session(), &registry(), &mut sink);

        assert!(matches!(result, Err(ExportError::Save { .. })));
        assert!(sink.last_saved().is_none());
    }
}
