//! Presentation model: what the file list and submit button should show.
//!
//! [`render`] projects the current selection and each file's
//! [`ValidationOutcome`](crate::validate::ValidationOutcome) into plain
//! display data. Hosts draw from the [`RenderedList`]; they never read
//! state back out of their own display tree.

use serde::Serialize;

use crate::config::WidgetConfig;
use crate::size::format_size;
use crate::types::SelectedFile;
use crate::validate::validate;

/// One row of the rendered file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRow {
    /// File name.
    pub name: String,
    /// Human-readable size, e.g. `"1.5 KB"`.
    pub size_label: String,
    /// Rejection reason, shown inline under the row.
    pub error: Option<String>,
    /// Key the row's remove control passes back to
    /// [`UploadWidget::on_file_removed`](crate::UploadWidget::on_file_removed).
    pub remove_key: String,
}

impl FileRow {
    /// Row label in the `name (size)` form.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.size_label)
    }

    /// Returns `true` if this row carries a validation error.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// The rendered file list and the submit control's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedList {
    /// Rows in selection order.
    pub rows: Vec<FileRow>,
    /// Whether the submit control accepts clicks.
    pub submit_enabled: bool,
}

impl RenderedList {
    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with a validation error.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_rejected()).count()
    }
}

/// Render `selection` under `config`.
///
/// The submit control is enabled iff the selection is non-empty and
/// every file validates. Idempotent: the same selection and config
/// always produce an equal [`RenderedList`].
#[must_use]
pub fn render<H>(selection: &[SelectedFile<H>], config: &WidgetConfig) -> RenderedList {
    let rows: Vec<FileRow> = selection
        .iter()
        .map(|file| FileRow {
            name: file.name.clone(),
            size_label: format_size(file.size_bytes),
            error: validate(file, config).reason,
            remove_key: file.name.clone(),
        })
        .collect();

    let submit_enabled = !rows.is_empty() && rows.iter().all(|r| !r.is_rejected());

    RenderedList {
        rows,
        submit_enabled,
    }
}
