//! Polaroid WASM - WebAssembly bindings for the Polaroid editor
//!
//! This crate exposes the polaroid-core edit session, crop geometry and
//! frame renderer to the browser UI.
//!
//! # Module Structure
//!
//! - `editor` - `PolaroidEditor`, the session object the UI drives
//! - `types` - WASM-compatible wrapper types for images, frames and crops
//! - `decode` - Upload decoding bindings
//! - `transform` - Crop dialog geometry
//! - `export` - Browser download and Web Share sinks
//! - `logging` - `log` backend over the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { PolaroidEditor, decode_image } from '@polaroid/wasm';
//!
//! await init();
//!
//! const editor = new PolaroidEditor(960);
//! editor.upload(decode_image(new Uint8Array(await file.arrayBuffer())));
//! const notice = editor.download();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod export;
mod logging;
mod transform;
mod types;

pub use decode::{decode_image, image_orientation};
pub use editor::PolaroidEditor;
pub use export::{download_png, share_png};
pub use logging::set_log_level;
pub use transform::{clamp_crop_zoom, compute_crop, restrict_offset};
pub use types::{JsBitmap, JsCropRect, JsImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    log::info!("polaroid-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
