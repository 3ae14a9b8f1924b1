//! Dioxus UI components for droplet.
//!
//! Provides the drop zone with its hidden file picker, the rendered
//! file list with per-row remove buttons, and the upload progress bar.

mod file_list;
mod progress;
mod uploader;

pub use file_list::FileList;
pub use progress::ProgressBar;
pub use uploader::FileUploader;
