//! Validation errors for incoming messages.

use thiserror::Error;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised when an append request is incomplete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are absent or empty.
    #[error("missing fields")]
    MissingFields {
        /// Names of the offending wire fields, in declaration order.
        fields: Vec<&'static str>,
    },
}

impl ValidationError {
    /// Returns the wire field names that failed validation.
    pub fn fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields { fields } => fields,
        }
    }
}
