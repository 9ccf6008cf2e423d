#![forbid(unsafe_code)]

//! Core domain model and business logic for the Litrbol consumption tracker.
//!
//! This crate provides:
//! - Domain types (profile, drink events, drink log)
//! - Rank catalog and drink presets
//! - Session selection and BAC estimation
//! - Lifetime statistics and rank resolution
//! - History grouping
//! - Persistence (JSON key-value store, config)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod estimator;
pub mod stats;
pub mod history;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, DrinkPreset, RankTier};
pub use config::Config;
pub use store::{JsonFileStore, KeyValueStore};
pub use estimator::{estimate_bac, select_session};
pub use stats::{
    container_equivalents, resolve_rank, total_alcohol_ml, ContainerEquivalents,
    IntoxicationLevel,
};
pub use history::{format_relative_label, group_by_day, DayGroup};
pub use tracker::Tracker;
