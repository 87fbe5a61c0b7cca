//! Error types surfaced to callers of the dashboard handle.

use agentwatch_adapters::FetchError;
use agentwatch_types::AlertKind;
use thiserror::Error;

/// A submitted credential was not accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Nothing but whitespace was submitted.
    #[error("Please enter a token")]
    Empty,

    /// The backend did not accept the credential.
    #[error("Token rejected: {0}")]
    Rejected(#[from] FetchError),
}

/// A threshold update was refused; the current set is unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThresholdError {
    /// The label does not name an alert kind.
    #[error("Unknown alert kind '{0}'")]
    UnknownKind(String),

    /// The value is not a whole number.
    #[error("'{kind}' must be a whole number of minutes, got '{value}'")]
    NotANumber { kind: AlertKind, value: String },

    /// The value is below zero.
    #[error("'{kind}' must not be negative, got {value}")]
    Negative { kind: AlertKind, value: i64 },

    /// The value does not fit in a threshold.
    #[error("'{kind}' is too large: {value}")]
    TooLarge { kind: AlertKind, value: i64 },
}
