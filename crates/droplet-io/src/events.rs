//! `upload-complete` DOM event emission.
//!
//! After a successful upload the hosting page gets a bubbling
//! `CustomEvent` on the widget's host element so it can react (refresh
//! a listing, close a panel) without a Rust-side callback. The event's
//! `detail` is `{ "files": [{ "name", "mimeType", "sizeBytes" }] }`.

use droplet_core::FileSummary;
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Name of the event dispatched after a successful upload.
pub const UPLOAD_COMPLETE_EVENT: &str = "upload-complete";

/// Errors that can occur when emitting the event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// The element that should receive the event does not exist.
    #[error("event target #{0} not found")]
    TargetNotFound(String),

    /// The event detail could not be serialized.
    #[error("failed to serialize event detail: {0}")]
    Serialize(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for EmitError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

#[derive(Serialize)]
struct UploadCompleteDetail<'a> {
    files: &'a [FileSummary],
}

/// JSON text of the event detail for `files`.
///
/// # Errors
///
/// Returns [`EmitError::Serialize`] if serialization fails.
pub fn detail_json(files: &[FileSummary]) -> Result<String, EmitError> {
    serde_json::to_string(&UploadCompleteDetail { files })
        .map_err(|e| EmitError::Serialize(e.to_string()))
}

/// Dispatch `upload-complete` on the element with id `target_id`.
///
/// # Errors
///
/// Returns [`EmitError::TargetNotFound`] if no such element exists,
/// [`EmitError::Serialize`] if the detail cannot be built, and
/// [`EmitError::JsError`] if the browser rejects the event.
pub fn emit_upload_complete(target_id: &str, files: &[FileSummary]) -> Result<(), EmitError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| EmitError::JsError("no document".into()))?;
    let target = document
        .get_element_by_id(target_id)
        .ok_or_else(|| EmitError::TargetNotFound(target_id.to_owned()))?;

    let detail = js_sys::JSON::parse(&detail_json(files)?)?;

    let init = web_sys::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_composed(true);
    init.set_detail(&detail);

    let event = web_sys::CustomEvent::new_with_event_init_dict(UPLOAD_COMPLETE_EVENT, &init)?;
    target.dispatch_event(&event)?;
    Ok(())
}
