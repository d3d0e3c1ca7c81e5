//! Validity rules for insurance records and persons
//!
//! Two gates apply. At record level an insurance row is kept only when its
//! edited premium is present, not a reserved code and non-zero. After
//! aggregation a person is kept only when a kept record has a strictly
//! positive edited premium.

use crate::models::{Person, UnifiedDocument};
use crate::registry::InsuranceRow;

/// Defines a criterion for keeping an entity
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the criterion
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// Record-level rule for insurance rows
#[derive(Debug, Clone, Copy, Default)]
pub struct QualifyingPremium;

impl FilterCriteria<InsuranceRow> for QualifyingPremium {
    fn meets_criteria(&self, row: &InsuranceRow) -> bool {
        is_qualifying_premium(row.edited_premium)
    }
}

/// Whether a decoded edited premium qualifies its record
///
/// Reserved codes and labels are already `None` after decoding.
#[must_use]
pub fn is_qualifying_premium(edited_premium: Option<f64>) -> bool {
    edited_premium.is_some_and(|premium| premium.is_finite() && premium != 0.0)
}

/// Person-level filters
#[derive(Debug, Clone)]
pub enum PersonFilter {
    /// At least one insurance record with an edited premium above zero
    PositivePremium,
    /// All criteria must be met
    All(Vec<PersonFilter>),
}

impl FilterCriteria<Person> for PersonFilter {
    fn meets_criteria(&self, person: &Person) -> bool {
        match self {
            Self::PositivePremium => person.has_positive_premium(),
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(person)),
        }
    }
}

/// Remove every person failing `filter`, returning how many were removed
pub fn apply_person_filter(document: &mut UnifiedDocument, filter: &PersonFilter) -> usize {
    document.retain(|_, person| filter.meets_criteria(person))
}

/// Remove persons without a positive edited premium
pub fn apply_validity_filter(document: &mut UnifiedDocument) -> usize {
    apply_person_filter(document, &PersonFilter::PositivePremium)
}
