#![forbid(unsafe_code)]

//! Core domain model and computation engine for the Jolt caffeine tracker.
//!
//! This crate provides:
//! - Domain types (substances, consumption events, derived stats)
//! - Substance catalog
//! - Decay model, aggregation queries and status classification
//! - Configuration, logging and the JSONL event store used by the CLI
//!
//! The query modules (`decay`, `aggregate`, `status`, `report`) are pure: they
//! take an [`EventLog`] snapshot and an explicit "now" and never touch the
//! clock or the filesystem.

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod time;
pub mod decay;
pub mod aggregate;
pub mod status;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use decay::{remaining_amount, DecayModel};
pub use aggregate::{Aggregator, DEFAULT_TOP_N};
pub use status::{classify, StatusBand, StatusThresholds, StatusTier};
pub use report::Report;
pub use store::{read_events, EventSink, JsonlSink};
