//! Private insurance records

use serde::{Deserialize, Serialize};

use crate::models::types::{CellValue, Round};

/// One qualifying private insurance record of a person
///
/// Only records whose edited out-of-pocket premium is present, not a reserved
/// code and non-zero are ever built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRecord {
    /// Coverage indicator for the round
    #[serde(rename = "cobertura_seguro", default)]
    pub coverage: Option<CellValue>,
    /// Out-of-pocket premium as reported
    #[serde(rename = "prima_out_of_pocket", default)]
    pub premium: Option<CellValue>,
    /// Out-of-pocket premium after editing and imputation
    #[serde(rename = "prima_out_of_pocket_editada")]
    pub edited_premium: f64,
    /// Round the record was reported in; `None` when the source value was unusable
    #[serde(rename = "round_reportado", default)]
    pub round: Option<Round>,
}

impl InsuranceRecord {
    /// Whether the edited premium is strictly positive
    #[must_use]
    pub fn has_positive_premium(&self) -> bool {
        self.edited_premium > 0.0
    }
}
