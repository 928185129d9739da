//! Browser save and share sinks.
//!
//! Downloads go through an object URL and a synthetic anchor click. Sharing
//! uses the Web Share API (`navigator.share`) when the browser has it; the
//! returned promise resolves once the share sheet is dismissed.

use std::io;
use std::path::PathBuf;

use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use polaroid_core::export::{
    ExportError, ExportedFile, SaveSink, ShareError, DOWNLOAD_NOTICE, SHARE_NOTICE,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Blob, BlobPropertyBag, File, FilePropertyBag, HtmlAnchorElement, Url, Window};

/// How long an object URL stays valid after its download click.
const REVOKE_DELAY_MS: i32 = 1000;

/// Saves files by clicking a temporary download link.
pub(crate) struct BrowserDownload;

impl SaveSink for BrowserDownload {
    fn save(&mut self, file: &ExportedFile) -> Result<(), ExportError> {
        trigger_download(file).map_err(|e| ExportError::Save {
            path: PathBuf::from(&file.filename),
            source: io::Error::other(format!("{e:?}")),
        })
    }
}

fn byte_parts(bytes: &[u8]) -> Array {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    parts
}

fn trigger_download(file: &ExportedFile) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&byte_parts(&file.bytes), &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();

    revoke_later(&window, url)?;
    log::info!("download triggered for {}", file.filename);
    Ok(())
}

/// Revoke `url` once the browser has had time to start the download.
///
/// Returns the timer handle.
fn revoke_later(window: &Window, url: String) -> Result<i32, JsValue> {
    let revoke = Closure::once_into_js(move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("failed to revoke {}: {:?}", url, e);
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        revoke.unchecked_ref(),
        REVOKE_DELAY_MS,
    )
}

/// Hand a file to `navigator.share`.
pub(crate) async fn share_file(file: ExportedFile, title: String) -> Result<(), ShareError> {
    let window = web_sys::window().ok_or(ShareError::Unavailable)?;
    let navigator = window.navigator();

    let share: Function = Reflect::get(&navigator, &JsValue::from_str("share"))
        .ok()
        .and_then(|value| value.dyn_into().ok())
        .ok_or(ShareError::Unavailable)?;

    let options = FilePropertyBag::new();
    options.set_type(&file.mime_type);
    let js_file = File::new_with_u8_array_sequence_and_options(
        &byte_parts(&file.bytes),
        &file.filename,
        &options,
    )
    .map_err(|_| ShareError::Unavailable)?;

    let data = Object::new();
    Reflect::set(&data, &JsValue::from_str("title"), &JsValue::from_str(&title))
        .map_err(|_| ShareError::Unavailable)?;
    Reflect::set(&data, &JsValue::from_str("files"), &Array::of1(&js_file))
        .map_err(|_| ShareError::Unavailable)?;

    let promise: Promise = share
        .call1(&navigator, &data)
        .and_then(|value| value.dyn_into())
        .map_err(|_| ShareError::Cancelled)?;
    JsFuture::from(promise)
        .await
        .map_err(|_| ShareError::Cancelled)?;

    log::info!("shared {}", file.filename);
    Ok(())
}

/// Wrap a share future as a promise resolving to the success notice.
pub(crate) fn share_promise(file: ExportedFile, title: String) -> Promise {
    future_to_promise(async move {
        match share_file(file, title).await {
            Ok(()) => Ok(JsValue::from_str(SHARE_NOTICE)),
            Err(e) => {
                log::warn!("share failed: {}", e);
                Err(JsValue::from_str(e.notice()))
            }
        }
    })
}

/// Download PNG bytes under `filename`.
///
/// Resolves to the success notice.
#[wasm_bindgen]
pub fn download_png(bytes: Vec<u8>, filename: &str) -> Result<String, JsValue> {
    let file = ExportedFile {
        bytes,
        filename: filename.to_string(),
        mime_type: "image/png".to_string(),
    };
    BrowserDownload
        .save(&file)
        .map_err(|e| JsValue::from_str(e.notice()))?;
    Ok(DOWNLOAD_NOTICE.to_string())
}

/// Share PNG bytes through the Web Share API.
///
/// Returns a promise that resolves to the success notice, or rejects with
/// the failure notice when sharing is unavailable or cancelled.
#[wasm_bindgen]
pub fn share_png(bytes: Vec<u8>, filename: &str, title: &str) -> Promise {
    let file = ExportedFile {
        bytes,
        filename: filename.to_string(),
        mime_type: "image/png".to_string(),
    };
    share_promise(file, title.to_string())
}
