//! Multipart upload over `XMLHttpRequest`.
//!
//! `fetch` has no upload progress events, so the transfer goes through
//! XHR: every staged file is appended to one `FormData` under the
//! configured field and posted in a single request. Files are handed
//! to the browser by reference and never copied into wasm memory. Upload progress is
//! forwarded to a callback; the returned future resolves once the
//! request finishes.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::html::FileData;
use dioxus::web::WebFileExt;
use droplet_core::SubmitRequest;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Errors that can occur while sending an upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),

    /// A staged file's contents could not be read.
    #[error("failed to read {name}: {message}")]
    ReadFailed {
        /// Name of the unreadable file.
        name: String,
        /// Reader error message.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The request errored or was aborted before a response arrived.
    #[error("network error")]
    Network,
}

impl From<JsValue> for TransportError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Returns `true` for HTTP statuses that count as a successful upload.
#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// `readyState` of a request that has finished, successfully or not.
const XHR_DONE: u16 = 4;

/// Send `request` as one multipart POST.
///
/// `on_progress` receives `(loaded, total)` byte counts for every
/// upload progress event the browser reports with a known length. It
/// may be called any number of times, including zero.
///
/// Dropping the returned future before it resolves aborts the request.
///
/// # Errors
///
/// Returns [`TransportError::ReadFailed`] if a staged file is not
/// backed by a browser `File`, [`TransportError::JsError`] if building
/// or sending the request fails, [`TransportError::Network`] if the
/// request errors or is aborted, and [`TransportError::Status`] for a
/// non-2xx response.
#[allow(clippy::future_not_send)] // WASM is single-threaded; FileData and XHR are !Send
pub async fn send(
    request: &SubmitRequest<FileData>,
    mut on_progress: impl FnMut(u64, u64) + 'static,
) -> Result<(), TransportError> {
    let form = build_form(request)?;

    let xhr = web_sys::XmlHttpRequest::new()?;
    xhr.open_with_async("POST", &request.endpoint, true)?;
    let upload = xhr.upload()?;

    let (promise, resolve, reject) = new_promise()?;

    let onprogress = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
        move |event: web_sys::ProgressEvent| {
            if event.length_computable() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                on_progress(event.loaded() as u64, event.total() as u64);
            }
        },
    );

    // Resolve with the status; the caller decides what counts as success.
    let onload = {
        let xhr = xhr.clone();
        Closure::<dyn FnMut()>::new(move || {
            let status = xhr.status().unwrap_or(0);
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from(status));
        })
    };

    let onerror = {
        let reject = reject.clone();
        Closure::<dyn FnMut()>::new(move || {
            let _ = reject.call0(&JsValue::NULL);
        })
    };

    let onabort = Closure::<dyn FnMut()>::new(move || {
        let _ = reject.call0(&JsValue::NULL);
    });

    upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    xhr.set_onabort(Some(onabort.as_ref().unchecked_ref()));

    // From here on the guard owns the handlers, whether the await below
    // completes or the future is dropped mid-flight.
    let in_flight = InFlight {
        xhr,
        upload,
        _onprogress: onprogress,
        _onload: onload,
        _onerror: onerror,
        _onabort: onabort,
    };

    in_flight.xhr.send_with_opt_form_data(Some(&form))?;

    let await_result = JsFuture::from(promise).await;
    drop(in_flight);

    let value = await_result.map_err(|_| TransportError::Network)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // XHR status is a u16
    let status = value.as_f64().map_or(0, |s| s as u16);

    if is_success_status(status) {
        Ok(())
    } else {
        Err(TransportError::Status(status))
    }
}

/// A sent request together with the callbacks registered on it.
///
/// Dropping it unregisters every handler before the closures are freed
/// and aborts the request if no response has arrived yet.
struct InFlight {
    xhr: web_sys::XmlHttpRequest,
    upload: web_sys::XmlHttpRequestUpload,
    _onprogress: Closure<dyn FnMut(web_sys::ProgressEvent)>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
    _onabort: Closure<dyn FnMut()>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.upload.set_onprogress(None);
        self.xhr.set_onload(None);
        self.xhr.set_onerror(None);
        self.xhr.set_onabort(None);

        if !is_finished(self.xhr.ready_state()) {
            let _ = self.xhr.abort();
        }
    }
}

/// Returns `true` once a request with this `readyState` needs no abort.
const fn is_finished(ready_state: u16) -> bool {
    ready_state == XHR_DONE
}

/// Append every staged file to a fresh `FormData`.
///
/// The browser `File` behind each handle is appended as-is, so the
/// browser streams its contents when the request is sent.
fn build_form(request: &SubmitRequest<FileData>) -> Result<web_sys::FormData, TransportError> {
    let form = web_sys::FormData::new()?;

    for file in &request.files {
        let web_file = require_browser_file(&file.name, file.handle.get_web_file())?;
        form.append_with_blob_and_filename(&request.field_name, &web_file, &file.name)?;
    }

    Ok(form)
}

/// The `File` behind a staged entry, or [`TransportError::ReadFailed`]
/// if the handle did not come from the browser.
fn require_browser_file(
    name: &str,
    file: Option<web_sys::File>,
) -> Result<web_sys::File, TransportError> {
    file.ok_or_else(|| TransportError::ReadFailed {
        name: name.to_owned(),
        message: "not a browser file".to_owned(),
    })
}

/// Create a JS Promise along with its resolve and reject functions.
fn new_promise() -> Result<(js_sys::Promise, js_sys::Function, js_sys::Function), TransportError>
{
    let resolve = Rc::new(RefCell::new(None::<js_sys::Function>));
    let reject = Rc::new(RefCell::new(None::<js_sys::Function>));
    let resolve_clone = Rc::clone(&resolve);
    let reject_clone = Rc::clone(&reject);

    let promise = js_sys::Promise::new(&mut move |res, rej| {
        *resolve_clone.borrow_mut() = Some(res);
        *reject_clone.borrow_mut() = Some(rej);
    });

    let resolve_fn = resolve
        .borrow_mut()
        .take()
        .ok_or_else(|| TransportError::JsError("promise resolve not captured".into()))?;
    let reject_fn = reject
        .borrow_mut()
        .take()
        .ok_or_else(|| TransportError::JsError("promise reject not captured".into()))?;

    Ok((promise, resolve_fn, reject_fn))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn two_hundreds_are_success() {
        assert!(is_success_status(200));
        assert!(is_success_status(201));
        assert!(is_success_status(204));
        assert!(is_success_status(299));
    }

    #[test]
    fn everything_else_is_failure() {
        for status in [0, 100, 199, 300, 302, 400, 413, 500, 503] {
            assert!(!is_success_status(status), "status {status} should fail");
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            TransportError::Status(413).to_string(),
            "server responded with status 413"
        );
        assert_eq!(
            TransportError::ReadFailed {
                name: "a.pdf".into(),
                message: "gone".into()
            }
            .to_string(),
            "failed to read a.pdf: gone"
        );
    }

    #[test]
    fn handle_without_browser_file_fails_to_read() {
        assert_eq!(
            require_browser_file("a.pdf", None).unwrap_err(),
            TransportError::ReadFailed {
                name: "a.pdf".into(),
                message: "not a browser file".into(),
            }
        );
    }

    #[test]
    fn only_a_done_request_skips_the_abort() {
        // UNSENT, OPENED, HEADERS_RECEIVED, LOADING
        for state in 0..XHR_DONE {
            assert!(!is_finished(state), "readyState {state} is still in flight");
        }
        assert!(is_finished(XHR_DONE));
    }
}
