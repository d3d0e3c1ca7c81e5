//! Condition label resolution
//!
//! A condition's category description comes from the source's own description
//! column, else from its CCSR category code. The diagnosis code is never used
//! as a label: a condition whose category does not resolve stays unlabelled.
//! Without reference data only the description column applies.

use crate::algorithm::health::reference::ReferenceTables;
use crate::models::types::clean_text;
use crate::registry::ConditionRow;

/// Where a resolved description came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSource {
    /// Description column of the conditions source
    Source,
    /// CCSR category code via the reference table
    Category,
    /// Nothing matched
    Unresolved,
}

/// Resolve the description of a condition row
#[must_use]
pub fn resolve_description(
    row: &ConditionRow,
    tables: Option<&ReferenceTables>,
) -> (Option<String>, LabelSource) {
    if let Some(description) = clean_text(row.description.as_deref()) {
        return (Some(description), LabelSource::Source);
    }
    let Some(tables) = tables else {
        return (None, LabelSource::Unresolved);
    };

    if let Some(description) = row
        .ccsr_category
        .as_deref()
        .and_then(|category| tables.description_for_category(category))
    {
        return (Some(description.to_string()), LabelSource::Category);
    }
    (None, LabelSource::Unresolved)
}
