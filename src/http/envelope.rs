//! Response envelope decoding
//!
//! Every backend response is wrapped as `{ success, data, error? }`.
//! This is the one place where loosely-typed error payloads are turned
//! into [`ApiError`] variants.

use crate::error::{ApiError, FieldError};
use serde::Deserialize;

/// The uniform `{ success, data, error }` wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Missing means "trust the HTTP status"
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// Error payload inside an envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable code (e.g. `NOT_FOUND`)
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message, shown as a global banner
    #[serde(default)]
    pub message: Option<String>,
    /// Per-field validation messages
    #[serde(default)]
    pub fields: Vec<FieldError>,
}

impl<T> Envelope<T> {
    /// Resolve the envelope against the HTTP status it arrived with
    pub fn into_result(self, status: u16) -> Result<Option<T>, ApiError> {
        let http_ok = (200..300).contains(&status);
        if http_ok && self.success.unwrap_or(true) {
            return Ok(self.data);
        }
        Err(classify(status, self.error))
    }
}

/// Map an HTTP status plus optional error body onto the taxonomy
pub fn classify(status: u16, body: Option<ErrorBody>) -> ApiError {
    let body = body.unwrap_or_default();
    let message = body.message.unwrap_or_default();

    match status {
        401 | 403 => ApiError::Unauthorized { status, message },
        404 => ApiError::NotFound { message },
        _ if !body.fields.is_empty() => ApiError::Validation {
            message,
            fields: body.fields,
        },
        400 | 422 => ApiError::Validation {
            message,
            fields: Vec::new(),
        },
        _ => classify_code(status, body.code.as_deref(), message),
    }
}

/// Fallback for `success: false` on a 2xx, or unusual statuses
fn classify_code(status: u16, code: Option<&str>, message: String) -> ApiError {
    match code.map(str::to_ascii_uppercase).as_deref() {
        Some("UNAUTHORIZED" | "FORBIDDEN") => ApiError::Unauthorized {
            status: if status == 403 { 403 } else { 401 },
            message,
        },
        Some("NOT_FOUND") => ApiError::NotFound { message },
        Some("VALIDATION_ERROR" | "BAD_REQUEST" | "INVALID_INPUT") => ApiError::Validation {
            message,
            fields: Vec::new(),
        },
        _ => ApiError::Unknown {
            status: Some(status),
            message,
        },
    }
}
