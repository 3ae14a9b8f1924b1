//! Reading the uploader's configuration from its host element.
//!
//! The hosting page declares the widget as an element carrying the
//! configuration as attributes:
//!
//! ```html
//! <div id="droplet"
//!      upload-url="/api/upload"
//!      allowed-types="application/pdf,image/png"
//!      max-file-size="5242880"
//!      modal-id="upload-modal"></div>
//! ```
//!
//! Attributes are read once. A missing element or a bad attribute is a
//! hard error rather than a silently inert widget.

use droplet_core::config::ATTRIBUTES;
use droplet_core::{ConfigError, WidgetConfig};

/// Errors that can occur when reading the mount configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// No browser document is available.
    #[error("no document available")]
    NoDocument,

    /// The host element does not exist.
    #[error("mount element #{0} not found")]
    ElementNotFound(String),

    /// The host element's attributes are not a valid configuration.
    #[error("invalid uploader configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Collect every known configuration attribute that `lookup` returns.
///
/// Absent attributes are skipped so defaults apply.
pub fn collect_attributes(
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(&'static str, String)> {
    ATTRIBUTES
        .iter()
        .filter_map(|&name| lookup(name).map(|value| (name, value)))
        .collect()
}

/// Read the configuration from the element with id `element_id`.
///
/// # Errors
///
/// Returns [`MountError::NoDocument`] outside a browser,
/// [`MountError::ElementNotFound`] if the element is missing, and
/// [`MountError::Config`] if its attributes are invalid.
pub fn read_config(element_id: &str) -> Result<WidgetConfig, MountError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MountError::NoDocument)?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| MountError::ElementNotFound(element_id.to_owned()))?;

    let attributes = collect_attributes(|name| element.get_attribute(name));
    Ok(WidgetConfig::from_attributes(attributes)?)
}
