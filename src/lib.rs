//! # agentwatch
//!
//! Command-line monitor for a contact-center reporting backend.
//!
//! The heavy lifting lives in the workspace crates:
//!
//! - [`agentwatch_types`]: snapshot and alert data types
//! - [`agentwatch_adapters`]: HTTP client for the reporting backend
//! - [`agentwatch_engine`]: classification, projections and the refresh loop
//!
//! This crate adds layered [`settings`] and the plain-text [`report`] lines
//! the binary logs for every published snapshot.

pub mod report;
pub mod settings;

pub use settings::{EndpointPaths, Settings};
