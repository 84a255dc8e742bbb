//! Error types for salesboard-source

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("Connection to {url} failed: {message}")]
    ConnectionFailed { url: String, message: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid dataset payload: {message}")]
    InvalidPayload { message: String },

    #[error("Request error: {message}")]
    Request { message: String },
}

impl SourceError {
    /// Whether the remote was never reached
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            SourceError::Timeout { .. } | SourceError::ConnectionFailed { .. }
        )
    }
}
