//! # agentwatch-adapters
//!
//! Client for the contact-center reporting backend.
//!
//! The backend exposes five fixed dashboard modules on one host. Each answers
//! a GET carrying the access token with a JSON envelope:
//!
//! ```json
//! { "status": "success", "message": "...", "data": { ... } }
//! ```
//!
//! [`ReportingClient`] checks the HTTP status and the envelope status and hands
//! back `data`; [`payload`] decodes it into typed rows and counters.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agentwatch_adapters::{ReportingClient, ReportingSource};
//! use agentwatch_types::{Credential, Source};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReportingClient::builder().build()?;
//!     let credential = Credential::new("my-access-token").ok_or("empty token")?;
//!
//!     client.verify(&credential).await?;
//!     let roster = client.fetch(Source::Roster, &credential).await?;
//!     println!("{}", roster);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod payload;
pub mod source;

pub use client::{ReportingClient, ReportingClientBuilder};
pub use endpoint::Endpoints;
pub use error::{FailureKind, FetchError};
pub use source::ReportingSource;

// Re-export types for convenience
pub use agentwatch_types::{Credential, Source};
