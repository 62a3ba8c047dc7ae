//! Error types for trackd.
//!
//! Query misses are not errors: store lookups return `Ok(None)` and
//! the GraphQL layer surfaces them as `null`.

use thiserror::Error;

/// Primary error type for trackd operations.
#[derive(Error, Debug)]
pub enum TrackError {
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<FieldError> },

    /// Identifier is malformed for the store's id format.
    #[error("Invalid issue ID format: {id}")]
    InvalidId { id: String },

    /// Store connectivity or persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a driver error, keeping its message.
    #[must_use]
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// Collapse a validator result into a single error value.
    #[must_use]
    pub fn from_field_errors(mut errors: Vec<FieldError>) -> Self {
        if errors.len() == 1 {
            let err = errors.remove(0);
            Self::Validation {
                field: err.field,
                reason: err.message,
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for the validation variants.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::ValidationErrors { .. })
    }
}

/// A single field validation error.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Result type using `TrackError`.
pub type Result<T> = std::result::Result<T, TrackError>;
