//! # agentwatch-types
//!
//! Core types for contact-center agent monitoring. This crate defines the
//! data model shared by the fetcher, the classification engine and whatever
//! presentation layer reads the published [`Snapshot`].
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to export snapshots as JSON
//! - **Rebuilt, never patched**: Every derived record is rebuilt each refresh cycle
//! - **Always complete thresholds**: A [`ThresholdSet`] holds a value for every [`AlertKind`]
//!
//! ## Features
//!
//! - `serde`: JSON/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use agentwatch_types::{parse_hms, AlertKind, ThresholdSet};
//!
//! let thresholds = ThresholdSet::default();
//! assert_eq!(thresholds.minutes(AlertKind::OverLunch), 60);
//! assert_eq!(thresholds.limit_secs(AlertKind::LongCall), 420);
//!
//! assert_eq!(parse_hms("01:02:03"), 3723);
//! assert_eq!(parse_hms("bad"), 0);
//! ```

mod agent;
mod credential;
mod duration;
mod snapshot;
mod summary;
mod thresholds;

pub use agent::*;
pub use credential::*;
pub use duration::*;
pub use snapshot::*;
pub use summary::*;
pub use thresholds::*;

/// Format version of exported snapshots; bumped on breaking field changes.
pub const SCHEMA_VERSION: u32 = 1;
