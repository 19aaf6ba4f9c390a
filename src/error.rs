//! Error types for the Matjip client
//!
//! Two layers live here:
//!
//! - [`ApiError`]: the tagged taxonomy every backend failure is classified
//!   into, exactly once, where the HTTP response is first parsed.
//! - [`Error`]: the crate-wide error returned by all public APIs. It wraps
//!   `ApiError` together with local failures (config, IO, manifests).

use crate::forms::FormErrors;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-level validation messages as sent by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field (e.g. `nickname`)
    pub field: String,
    /// Messages for this field, most relevant first
    #[serde(default)]
    pub messages: Vec<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            messages: vec![message.into()],
        }
    }
}

/// Classified backend failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a usable response
    #[error("Network error: {message}")]
    Transport { message: String },

    /// 401/403: the session is missing, expired, or lacks permission
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Structured input errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unexpected error: {message}")]
    Unknown { status: Option<u16>, message: String },
}

const TRANSPORT_MESSAGE: &str = "Could not reach the server. Check your connection and try again.";
const UNAUTHORIZED_MESSAGE: &str = "Your session has expired. Please log in again.";
const VALIDATION_MESSAGE: &str = "Please check the highlighted fields.";
const NOT_FOUND_MESSAGE: &str = "The requested item could not be found.";
const UNKNOWN_MESSAGE: &str = "Something went wrong. Please try again later.";

impl ApiError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a validation error without field details
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Text suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => TRANSPORT_MESSAGE.to_string(),
            Self::Unauthorized { message, .. } => non_empty_or(message, UNAUTHORIZED_MESSAGE),
            Self::Validation { message, .. } => non_empty_or(message, VALIDATION_MESSAGE),
            Self::NotFound { message } => non_empty_or(message, NOT_FOUND_MESSAGE),
            Self::Unknown { .. } => UNKNOWN_MESSAGE.to_string(),
        }
    }

    /// Whether the caller should send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status that produced this error, when known
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } | Self::Validation { .. } => None,
            Self::Unauthorized { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Unknown { status, .. } => *status,
        }
    }
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

/// The main error type for the Matjip client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP / API Errors
    // ============================================================================
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(FormErrors),

    #[error("Upload of '{file}' failed: {message}")]
    Upload { file: String, message: String },

    #[error("Seed error: {message}")]
    Seed { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an upload error
    pub fn upload(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upload {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a seed error
    pub fn seed(message: impl Into<String>) -> Self {
        Self::Seed {
            message: message.into(),
        }
    }

    /// Classify this error into the backend taxonomy
    pub fn to_api_error(&self) -> ApiError {
        match self {
            Error::Api(e) => e.clone(),
            Error::Http(e) => ApiError::transport(e.to_string()),
            Error::InvalidInput(errors) => ApiError::Validation {
                message: errors.global_error.clone().unwrap_or_default(),
                fields: errors
                    .field_errors
                    .iter()
                    .map(|(field, message)| FieldError::new(field, message))
                    .collect(),
            },
            other => ApiError::Unknown {
                status: None,
                message: other.to_string(),
            },
        }
    }

    /// Text suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(_) | Error::Http(_) | Error::InvalidInput(_) => {
                self.to_api_error().user_message()
            }
            other => other.to_string(),
        }
    }

    /// Whether the caller should send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        matches!(self, Error::Api(e) if e.requires_login())
    }
}

/// Result type alias for the Matjip client
pub type Result<T> = std::result::Result<T, Error>;
