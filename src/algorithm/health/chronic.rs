//! Chronic versus acute classification of condition descriptions
//!
//! A description is chronic when any ICD-10-CM code filed under it in the
//! CCSR reference is flagged chronic in the indicator table. The answer for
//! every known description is computed once, when the classifier is built, so
//! lookups during aggregation and snapshotting are a single hash lookup.

use rustc_hash::FxHashMap;

use crate::algorithm::health::reference::ReferenceTables;

/// Descriptions that never name a real condition
pub const UNSPECIFIED_DESCRIPTIONS: [&str; 6] = [
    "No especificado",
    "Not specified",
    "Unspecified",
    "Categoría médica no especificada",
    "Condición médica no especificada",
    "Not reported",
];

/// Whether a description is blank or one of the explicit "unspecified" labels
#[must_use]
pub fn is_unspecified(description: &str) -> bool {
    let description = description.trim().to_lowercase();
    description.is_empty()
        || UNSPECIFIED_DESCRIPTIONS
            .iter()
            .any(|label| label.to_lowercase() == description)
}

/// Two-hop lookup: description to codes, then any code flagged chronic
#[must_use]
pub fn is_chronic(description: &str, tables: &ReferenceTables) -> bool {
    if is_unspecified(description) {
        return false;
    }
    tables
        .description_to_codes
        .get(description.trim())
        .is_some_and(|codes| {
            codes
                .iter()
                .any(|code| tables.code_to_chronic.get(code).copied().unwrap_or(false))
        })
}

/// Precomputed description to chronic flag mapping
///
/// Read-only after construction, so it can be shared across worker threads.
#[derive(Debug, Clone, Default)]
pub struct ChronicClassifier {
    chronic: FxHashMap<String, bool>,
    enabled: bool,
}

impl ChronicClassifier {
    /// Build the classifier from loaded reference tables
    #[must_use]
    pub fn new(tables: &ReferenceTables) -> Self {
        let chronic: FxHashMap<String, bool> = tables
            .description_to_codes
            .keys()
            .map(|description| (description.clone(), is_chronic(description, tables)))
            .collect();

        log::info!(
            "Chronic classifier ready: {} of {} descriptions are chronic",
            chronic.values().filter(|c| **c).count(),
            chronic.len()
        );

        Self {
            chronic,
            enabled: true,
        }
    }

    /// A classifier that reports every condition as acute
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Build from tables when they were loaded, otherwise a disabled classifier
    #[must_use]
    pub fn from_tables(tables: Option<&ReferenceTables>) -> Self {
        tables.map_or_else(Self::disabled, Self::new)
    }

    /// Whether reference data backs this classifier
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a condition with this description is chronic
    #[must_use]
    pub fn is_chronic(&self, description: Option<&str>) -> bool {
        description
            .filter(|d| !is_unspecified(d))
            .and_then(|d| self.chronic.get(d.trim()))
            .copied()
            .unwrap_or(false)
    }
}
