//! Unification and snapshot construction for MEPS survey microdata.
//!
//! Four processed survey sources (demographics, medical conditions, jobs and
//! private insurance) are joined into one record per person, filtered to
//! persons with a positive out-of-pocket premium, and replayed into
//! per-round snapshots that carry chronic conditions forward.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod registry;
pub mod utils;

// Re-export the most common types for easier use
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use models::{Person, Snapshot, UnifiedDocument};
pub use pipeline::{Stage, run_all, run_snapshots, run_unify};

// Algorithms
pub use algorithm::health::{ChronicClassifier, ReferenceTables, load_reference_tables};
pub use algorithm::snapshot::generate_snapshots;
pub use algorithm::unify::{PersonAggregator, apply_validity_filter};

// Arrow types
pub use arrow::record_batch::RecordBatch;
