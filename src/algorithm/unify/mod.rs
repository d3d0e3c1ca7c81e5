//! Unification of the four sources into the person document

pub mod aggregator;
pub mod statistics;
pub mod validity;

pub use aggregator::PersonAggregator;
pub use statistics::{AggregationStats, DatasetStatistics};
pub use validity::{FilterCriteria, PersonFilter, apply_validity_filter, is_qualifying_premium};
