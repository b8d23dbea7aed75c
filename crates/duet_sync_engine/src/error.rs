//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while talking to the relay.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network failure or timeout.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The relay answered with a non-2xx status.
    #[error("server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configured server URL is unusable.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The poller thread could not be spawned.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns true if a later attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Transport { .. } | SyncError::Status { .. })
    }

    /// Returns the HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure inside a consumer callback.
///
/// Sink errors are reported and counted by the poller but never stop it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The receiving side of a channel is gone.
    #[error("consumer disconnected")]
    Disconnected,

    /// The consumer reported a failure.
    #[error("consumer failed: {0}")]
    Failed(String),

    /// The consumer panicked.
    #[error("consumer panicked: {0}")]
    Panicked(String),
}
