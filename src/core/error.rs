//! Typed error handling for form processing
//!
//! Two kinds of failure come out of a form submission:
//!
//! - [`FieldError`]: a validator rejected a field value. These are expected
//!   outcomes of user input and are collected per field into [`FieldErrors`].
//! - [`FormError`]: the form itself is misconfigured (unknown validator name,
//!   unreadable configuration). These abort processing.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A failed validation, keyed by field name (or validator group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name, or the group name when the failing rule belongs to a group
    pub key: String,

    /// Name of the validator that failed (e.g. `required`, `date-month`)
    #[serde(rename = "type")]
    pub error_type: String,

    /// Arguments the validator was called with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl FieldError {
    pub fn new(key: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            error_type: error_type.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' failed '{}' validation", self.key, self.error_type)
    }
}

impl std::error::Error for FieldError {}

/// Validation failures of one submission, in field declaration order
pub type FieldErrors = IndexMap<String, FieldError>;

/// Errors that abort form processing
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A field references a validator that is not registered
    #[error("Undefined validator '{validator}' on field '{field}'")]
    UnknownValidator { field: String, validator: String },

    /// The form configuration could not be loaded
    #[error("Invalid form configuration: {message}")]
    Config { message: String },
}

impl FormError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormError::UnknownValidator { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            FormError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FormError::UnknownValidator { .. } => "UNKNOWN_VALIDATOR",
            FormError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<anyhow::Error> for FormError {
    fn from(err: anyhow::Error) -> Self {
        FormError::Config {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "code": self.error_code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
