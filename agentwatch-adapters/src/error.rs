//! Error types for backend fetches.

use thiserror::Error;

/// Errors that can occur when fetching from the reporting backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Connection failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The backend answered with a non-200 status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP 200, but the envelope's status was not "success".
    #[error("API returned unsuccessful status: {0}")]
    Unsuccessful(String),

    /// The body was not a JSON envelope.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The envelope succeeded but `data` did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Shape(String),
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error, timeout or non-200 status.
    Transport,
    /// A 200 response that failed envelope or shape validation.
    Protocol,
}

impl FetchError {
    /// Whether this failure happened on the wire or in the payload.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Timeout
            | FetchError::Connection(_)
            | FetchError::Http(_)
            | FetchError::Status { .. } => FailureKind::Transport,
            FetchError::Unsuccessful(_) | FetchError::Parse(_) | FetchError::Shape(_) => {
                FailureKind::Protocol
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}
