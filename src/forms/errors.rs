//! Per-field and global form error messages

use crate::error::{ApiError, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Messages a form displays after validation or submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    /// Field wire name → first message for that field
    #[serde(default)]
    pub field_errors: BTreeMap<String, String>,
    /// Banner message not tied to a field
    #[serde(default)]
    pub global_error: Option<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.global_error.is_none()
    }

    /// Message for one field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    /// Record a field message; the first message for a field wins
    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    pub fn set_global(&mut self, message: impl Into<String>) {
        self.global_error = Some(message.into());
    }

    /// Translate a classified backend error into form messages
    ///
    /// Validation errors fill per-field messages plus the server's banner
    /// message; every other class becomes a global message only.
    pub fn from_api_error(error: &ApiError) -> Self {
        let mut errors = Self::new();
        match error {
            ApiError::Validation { message, fields } => {
                for field in fields {
                    if let Some(first) = field.messages.first() {
                        errors.add_field(&field.field, first);
                    }
                }
                if !message.trim().is_empty() || errors.field_errors.is_empty() {
                    errors.set_global(error.user_message());
                }
            }
            other => errors.set_global(other.user_message()),
        }
        errors
    }

    /// Translate any crate error into form messages
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::InvalidInput(errors) => errors.clone(),
            other => Self::from_api_error(&other.to_api_error()),
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(global) = &self.global_error {
            parts.push(global.clone());
        }
        parts.extend(
            self.field_errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}")),
        );
        f.write_str(&parts.join("; "))
    }
}
