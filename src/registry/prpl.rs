//! PRPL (private insurance plans) source
//!
//! Rows keep the raw edited premium; whether a row qualifies is decided by
//! the validity rules in `algorithm::unify::validity`.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::types::{CellValue, Round, parse_amount, parse_round_opt};
use crate::reader::TextColumn;
use crate::registry::{PersonRow, SourceLoader, id_column};

pub const ROUND: &str = "round_number";
pub const COVERAGE: &str = "insurance_coverage";
pub const PREMIUM: &str = "out_of_pocket_premium";
pub const EDITED_PREMIUM: &str = "out_of_pocket_premium_edited";

/// One insurance row
#[derive(Debug, Clone, PartialEq)]
pub struct InsuranceRow {
    pub person_id: String,
    pub round: Option<Round>,
    pub coverage: Option<CellValue>,
    pub premium: Option<CellValue>,
    /// Edited premium, `None` when blank, a label or a reserved code
    pub edited_premium: Option<f64>,
}

impl PersonRow for InsuranceRow {
    fn person_id(&self) -> &str {
        &self.person_id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsuranceSource;

impl SourceLoader for InsuranceSource {
    type Row = InsuranceRow;

    fn source_name(&self) -> &'static str {
        "insurance"
    }

    fn expected_columns(&self) -> Vec<String> {
        [ROUND, COVERAGE, PREMIUM, EDITED_PREMIUM]
            .iter()
            .map(|c| (*c).to_string())
            .collect()
    }

    fn deserialize_batch(&self, batch: &RecordBatch) -> Result<Vec<InsuranceRow>> {
        let ids = id_column(batch, self.source_name())?;
        let round = TextColumn::optional(batch, ROUND);
        let coverage = TextColumn::optional(batch, COVERAGE);
        let premium = TextColumn::optional(batch, PREMIUM);
        let edited = TextColumn::optional(batch, EDITED_PREMIUM);

        Ok((0..batch.num_rows())
            .filter_map(|row| {
                let id = ids.get(row)?;
                Some(InsuranceRow {
                    person_id: id.to_string(),
                    round: parse_round_opt(round.get(row)),
                    coverage: CellValue::parse_opt(coverage.get(row)),
                    premium: CellValue::parse_opt(premium.get(row)),
                    edited_premium: parse_amount(edited.get(row)),
                })
            })
            .collect())
    }
}
