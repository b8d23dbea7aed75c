//! Error types for the relay server.

use duet_protocol::{ErrorBody, ValidationError};
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the relay server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Append request is missing required fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body is not a JSON object.
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Unknown path or method.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::Validation(_) | ServerError::InvalidJson(_) | ServerError::NotFound(_)
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, ServerError::Internal(_) | ServerError::Io(_))
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::Validation(_) | ServerError::InvalidJson(_) => 400,
            ServerError::NotFound(_) => 404,
            ServerError::Internal(_) | ServerError::Io(_) => 500,
        }
    }

    /// Body sent to the client for this error.
    pub fn error_body(&self) -> ErrorBody {
        match self {
            ServerError::Validation(_) => ErrorBody::missing_fields(),
            ServerError::InvalidJson(_) => ErrorBody::invalid_json(),
            ServerError::NotFound(_) => ErrorBody::not_found(),
            ServerError::Internal(_) | ServerError::Io(_) => ErrorBody::new("internal error"),
        }
    }
}
