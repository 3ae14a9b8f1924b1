//! Closing the host page's container after a successful upload.
//!
//! The uploader is often shown inside a modal. When `modal-id` is
//! configured, the element with that id is closed once the settle delay
//! has passed: `<dialog>` elements via `close()`, anything else by
//! setting the `hidden` attribute.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when dismissing the target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DismissError {
    /// No element with the configured id exists.
    #[error("dismiss target #{0} not found")]
    TargetNotFound(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DismissError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Close the element with id `target_id`.
///
/// # Errors
///
/// Returns [`DismissError::TargetNotFound`] if the element is missing
/// and [`DismissError::JsError`] if the document is unavailable or
/// hiding the element fails.
pub fn dismiss(target_id: &str) -> Result<(), DismissError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DismissError::JsError("no document".into()))?;
    let element = document
        .get_element_by_id(target_id)
        .ok_or_else(|| DismissError::TargetNotFound(target_id.to_owned()))?;

    if let Some(dialog) = element.dyn_ref::<web_sys::HtmlDialogElement>() {
        dialog.close();
    } else {
        element.set_attribute("hidden", "")?;
    }
    Ok(())
}
