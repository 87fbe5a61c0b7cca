//! # agentwatch-engine
//!
//! Refresh and classification engine for live contact-center monitoring.
//!
//! The engine polls the reporting backend on a fixed cadence, turns the raw
//! agent roster into display buckets and alerts, projects the queue, agent
//! counter and KPI payloads, and publishes the result as one immutable
//! [`Snapshot`] that any number of readers can share.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentwatch_adapters::ReportingClient;
//! use agentwatch_engine::Refresher;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let refresher = Refresher::builder(Arc::new(ReportingClient::builder().build()?)).build();
//!     let handle = refresher.handle();
//!
//!     // Nothing is fetched until a credential is accepted.
//!     let _task = refresher.start();
//!     handle.submit_credential("access-token").await?;
//!
//!     let mut updates = handle.subscribe();
//!     while updates.changed().await.is_ok() {
//!         let snapshot = updates.borrow_and_update().clone();
//!         println!("cycle {}: {} alerts", snapshot.cycle, snapshot.alerts.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`classify`]: ordered alert rules and bucket assignment for the roster
//! - [`project`]: queue and agent-counter summaries
//! - [`kpi`]: the fixed KPI metric table
//! - [`ThresholdRegistry`]: runtime-adjustable alert thresholds
//! - [`Refresher`]: the periodic fetch/publish loop
//! - [`DashboardHandle`]: what a presentation layer talks to

pub mod classify;
mod error;
mod handle;
pub mod kpi;
pub mod project;
mod refresher;
mod registry;
mod state;

#[cfg(test)]
mod testing;

pub use error::{CredentialError, ThresholdError};
pub use handle::DashboardHandle;
pub use refresher::{RefreshTask, Refresher, RefresherBuilder, DEFAULT_INTERVAL};
pub use registry::{parse_minutes, ThresholdRegistry};

// Re-export types for convenience
pub use agentwatch_types::{
    AgentCounterSummary, AgentRecord, AlertKind, AlertRecord, KpiEntry, QueueSummary, Snapshot,
    Source, SourceStatus, ThresholdSet,
};
