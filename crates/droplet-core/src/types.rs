//! Shared file types for the uploader.

use serde::{Deserialize, Serialize};

/// A file staged in the uploader.
///
/// `handle` is an opaque reference to the payload owned by the host
/// environment (a browser `File`, a path, a test marker). The core only
/// ever reads the metadata fields; the handle is passed back to the
/// transport untouched at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<H> {
    /// File name as reported by the host, used as the selection key.
    pub name: String,
    /// Declared MIME type (may be empty when the host cannot tell).
    pub mime_type: String,
    /// Size of the payload in bytes.
    pub size_bytes: u64,
    /// Opaque reference to the payload.
    pub handle: H,
}

impl<H> SelectedFile<H> {
    /// Create a new selected file.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        handle: H,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            handle,
        }
    }

    /// Metadata-only view of this file, suitable for emitting to
    /// listeners outside the widget.
    #[must_use]
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.size_bytes,
        }
    }
}

/// Metadata of a submitted file, carried by the upload-complete signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// File name.
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
}
