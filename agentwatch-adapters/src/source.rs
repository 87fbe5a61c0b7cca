//! The fetch seam between the refresh engine and the backend.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use agentwatch_types::{Credential, Source};

use crate::FetchError;

/// Something that can fetch raw payloads from the reporting backend.
///
/// Implementations return the envelope's `data` value only after both the
/// HTTP status and the envelope status have been checked. Every failure is
/// returned as a [`FetchError`]; nothing panics across this boundary.
#[async_trait]
pub trait ReportingSource: Send + Sync + Debug {
    /// Fetch one source and return its `data` value.
    async fn fetch(&self, source: Source, credential: &Credential) -> Result<Value, FetchError>;

    /// Check that a credential is accepted by the backend.
    ///
    /// Fetches the roster and requires a `RowValues` listing. The rows
    /// themselves are not inspected.
    async fn verify(&self, credential: &Credential) -> Result<(), FetchError> {
        let data = self.fetch(Source::Roster, credential).await?;
        if data.get("RowValues").is_some_and(Value::is_array) {
            Ok(())
        } else {
            Err(FetchError::Unsuccessful(
                "Invalid token response. Please try again.".to_string(),
            ))
        }
    }
}
