//! droplet-core: Pure uploader widget state (sans-IO).
//!
//! Models a drag-and-drop file uploader as four separable pieces:
//! selection store -> validator -> presentation model -> transfer
//! reporter, tied together by [`UploadWidget`].
//!
//! This crate has **no I/O dependencies** -- it never touches the DOM,
//! the network, or file contents. Hosts feed it file metadata and
//! transport notifications and render what it returns. All browser
//! interaction lives in `droplet-io`.

pub mod config;
pub mod log;
pub mod render;
pub mod selection;
pub mod size;
pub mod transfer;
pub mod types;
pub mod validate;
pub mod widget;

pub use config::{ConfigError, WidgetConfig};
pub use log::{Logger, NoopLogger, TracingLogger};
pub use render::{FileRow, RenderedList, render};
pub use selection::SelectionSet;
pub use size::format_size;
pub use transfer::{Notice, ProgressIndicator, SETTLE_DELAY, TransferReporter, TransferState};
pub use types::{FileSummary, SelectedFile};
pub use validate::{ValidationOutcome, validate};
pub use widget::{Completion, SubmitError, SubmitRequest, UploadWidget};
