//! Per-file validation against the widget configuration.

use crate::config::WidgetConfig;
use crate::size::format_size;
use crate::types::SelectedFile;

/// Result of validating one file.
///
/// Never stored: recomputed from the file's metadata and the
/// configuration on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the file may be uploaded.
    pub valid: bool,
    /// Why the file was rejected. `None` when `valid` is `true`.
    pub reason: Option<String>,
}

impl ValidationOutcome {
    /// An accepting outcome.
    #[must_use]
    pub const fn accepted() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// A rejecting outcome with a human-readable reason.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decide whether `file` is acceptable under `config`.
///
/// Rules run in order and the first failure wins:
///
/// 1. type: when an allow-list is configured, the MIME type must be on it
/// 2. size: when a maximum is configured, the file must not exceed it
///
/// Pure function of its inputs.
#[must_use]
pub fn validate<H>(file: &SelectedFile<H>, config: &WidgetConfig) -> ValidationOutcome {
    if let Some(ref allowed) = config.allowed_mime_types
        && !allowed.contains(&file.mime_type)
    {
        return ValidationOutcome::rejected(format!(
            "File type {} is not allowed.",
            file.mime_type
        ));
    }

    if let Some(max) = config.max_file_size_bytes
        && file.size_bytes > max
    {
        return ValidationOutcome::rejected(format!(
            "File size {} exceeds maximum size of {}",
            format_size(file.size_bytes),
            format_size(max)
        ));
    }

    ValidationOutcome::accepted()
}
