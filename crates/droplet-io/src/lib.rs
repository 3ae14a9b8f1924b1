//! droplet-io: Browser I/O and Dioxus component library.
//!
//! Handles the multipart upload transport, host-page integration
//! (mount attributes, `upload-complete` DOM events, dismissing a
//! container after success), and provides the uploader UI components
//! that drive a [`droplet_core::UploadWidget`].

pub mod components;
pub mod dismiss;
pub mod events;
pub mod mount;
pub mod transport;

pub use components::{FileList, FileUploader, ProgressBar};
pub use mount::MountError;
pub use transport::TransportError;
