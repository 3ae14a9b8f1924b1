//! Widget configuration captured once at mount time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Attribute naming the comma-separated list of accepted MIME types.
pub const ATTR_ALLOWED_TYPES: &str = "allowed-types";
/// Attribute naming the maximum accepted file size in bytes.
pub const ATTR_MAX_FILE_SIZE: &str = "max-file-size";
/// Attribute naming the endpoint that receives the multipart POST.
pub const ATTR_UPLOAD_URL: &str = "upload-url";
/// Attribute naming the multipart field the files are sent under.
pub const ATTR_FILE_FIELD_NAME: &str = "file-field-name";
/// Attribute naming the dismissible container closed after success.
pub const ATTR_MODAL_ID: &str = "modal-id";
/// Attribute switching on widget logging.
pub const ATTR_LOGGING: &str = "logging";

/// Every attribute [`WidgetConfig::from_attributes`] understands.
pub const ATTRIBUTES: [&str; 6] = [
    ATTR_ALLOWED_TYPES,
    ATTR_MAX_FILE_SIZE,
    ATTR_UPLOAD_URL,
    ATTR_FILE_FIELD_NAME,
    ATTR_MODAL_ID,
    ATTR_LOGGING,
];

/// Multipart field name used when `file-field-name` is absent.
pub const DEFAULT_FILE_FIELD_NAME: &str = "files";

/// Errors raised while building a [`WidgetConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required attribute was not supplied.
    #[error("missing required attribute `{0}`")]
    MissingAttribute(&'static str),

    /// An attribute that must carry a value was present but blank.
    #[error("attribute `{0}` must not be empty")]
    EmptyAttribute(&'static str),

    /// `max-file-size` was not a non-negative integer byte count.
    #[error("`max-file-size` must be a whole number of bytes, got {value:?}")]
    InvalidMaxFileSize {
        /// The raw attribute value.
        value: String,
    },
}

/// Immutable uploader configuration.
///
/// Read once when the widget is constructed. Changing the host's
/// attributes afterwards has no effect on a running widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Accepted MIME types. `None` accepts any type.
    #[serde(default)]
    pub allowed_mime_types: Option<BTreeSet<String>>,

    /// Largest accepted file in bytes. `None` accepts any size.
    #[serde(default)]
    pub max_file_size_bytes: Option<u64>,

    /// Endpoint receiving the multipart form submission.
    pub upload_url: String,

    /// Multipart field name every file is appended under.
    #[serde(default = "default_file_field_name")]
    pub file_field_name: String,

    /// Id of a dismissible container (e.g. a `<dialog>`) to close after
    /// a successful upload.
    #[serde(default)]
    pub dismiss_target_id: Option<String>,

    /// Whether the widget should log through `tracing`.
    #[serde(default)]
    pub logging_enabled: bool,
}

fn default_file_field_name() -> String {
    DEFAULT_FILE_FIELD_NAME.to_owned()
}

impl WidgetConfig {
    /// Create a configuration that accepts any file and posts to
    /// `upload_url` under the default field name.
    #[must_use]
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            allowed_mime_types: None,
            max_file_size_bytes: None,
            upload_url: upload_url.into(),
            file_field_name: default_file_field_name(),
            dismiss_target_id: None,
            logging_enabled: false,
        }
    }

    /// Restrict accepted files to the given MIME types.
    #[must_use]
    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mime_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Reject files larger than `bytes`.
    #[must_use]
    pub const fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = Some(bytes);
        self
    }

    /// Send files under `name` instead of the default field.
    #[must_use]
    pub fn with_file_field_name(mut self, name: impl Into<String>) -> Self {
        self.file_field_name = name.into();
        self
    }

    /// Close the element with id `id` after a successful upload.
    #[must_use]
    pub fn with_dismiss_target(mut self, id: impl Into<String>) -> Self {
        self.dismiss_target_id = Some(id.into());
        self
    }

    /// Enable or disable widget logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Build a configuration from mount attributes.
    ///
    /// Unknown attribute names are ignored. `allowed-types` is split on
    /// commas with blanks dropped; an empty list means unrestricted.
    /// A blank or zero `max-file-size` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAttribute`] if `upload-url` is absent,
    /// [`ConfigError::EmptyAttribute`] if `upload-url` or
    /// `file-field-name` is blank, and [`ConfigError::InvalidMaxFileSize`]
    /// if `max-file-size` is not a whole number of bytes.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut allowed = None;
        let mut max_size = None;
        let mut url = None;
        let mut field = None;
        let mut dismiss = None;
        let mut logging = false;

        for (key, value) in attributes {
            let value = value.as_ref().trim();
            match key.as_ref() {
                ATTR_ALLOWED_TYPES => allowed = parse_allowed_types(value),
                ATTR_MAX_FILE_SIZE => max_size = parse_max_file_size(value)?,
                ATTR_UPLOAD_URL => url = Some(value.to_owned()),
                ATTR_FILE_FIELD_NAME => field = Some(value.to_owned()),
                ATTR_MODAL_ID => dismiss = (!value.is_empty()).then(|| value.to_owned()),
                ATTR_LOGGING => logging = !value.eq_ignore_ascii_case("false"),
                _ => {}
            }
        }

        let upload_url = url.ok_or(ConfigError::MissingAttribute(ATTR_UPLOAD_URL))?;
        if upload_url.is_empty() {
            return Err(ConfigError::EmptyAttribute(ATTR_UPLOAD_URL));
        }
        let file_field_name = field.unwrap_or_else(default_file_field_name);
        if file_field_name.is_empty() {
            return Err(ConfigError::EmptyAttribute(ATTR_FILE_FIELD_NAME));
        }

        Ok(Self {
            allowed_mime_types: allowed,
            max_file_size_bytes: max_size,
            upload_url,
            file_field_name,
            dismiss_target_id: dismiss,
            logging_enabled: logging,
        })
    }
}

fn parse_allowed_types(value: &str) -> Option<BTreeSet<String>> {
    let types: BTreeSet<String> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();
    (!types.is_empty()).then_some(types)
}

/// Zero is no limit rather than a limit that rejects every file.
fn parse_max_file_size(value: &str) -> Result<Option<u64>, ConfigError> {
    if value.is_empty() {
        return Ok(None);
    }
    let bytes = value
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidMaxFileSize {
            value: value.to_owned(),
        })?;
    Ok((bytes > 0).then_some(bytes))
}
