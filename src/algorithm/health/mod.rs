//! Condition reference data and chronic classification
//!
//! This module loads the CCSR and chronic indicator reference tables,
//! resolves condition labels and classifies descriptions as chronic or acute.

pub mod chronic;
pub mod labels;
pub mod reference;

pub use chronic::{ChronicClassifier, is_chronic};
pub use labels::{LabelSource, resolve_description};
pub use reference::{ReferenceTables, load_reference_tables};
