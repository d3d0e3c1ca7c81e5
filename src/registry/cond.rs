//! COND (medical conditions) source

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::types::{CellValue, Round, clean_text, parse_round_opt};
use crate::reader::{TextColumn, normalize_header};
use crate::registry::{PersonRow, SourceLoader, id_column};

pub const ROUND: &str = "condition_round";
pub const AGE_AT_DIAGNOSIS: &str = "age_at_diagnosis";
pub const INJURY: &str = "injury_flag";
pub const ICD10_CODE: &str = "icd10_code";
pub const CCSR_CATEGORY: &str = "ccsr_category_1";
pub const CCSR_DESCRIPTION: &str = "ccsr_description";

/// One condition row before classification
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionRow {
    pub person_id: String,
    /// `None` when the round cell is blank or not a positive integer
    pub round: Option<Round>,
    pub age_at_diagnosis: Option<CellValue>,
    pub injury: Option<CellValue>,
    pub icd10_code: Option<String>,
    pub ccsr_category: Option<String>,
    /// Description already present in the source, if any
    pub description: Option<String>,
}

impl PersonRow for ConditionRow {
    fn person_id(&self) -> &str {
        &self.person_id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionsSource;

impl SourceLoader for ConditionsSource {
    type Row = ConditionRow;

    fn source_name(&self) -> &'static str {
        "conditions"
    }

    fn expected_columns(&self) -> Vec<String> {
        [ROUND, AGE_AT_DIAGNOSIS, INJURY, ICD10_CODE, CCSR_CATEGORY]
            .iter()
            .map(|c| (*c).to_string())
            .collect()
    }

    fn deserialize_batch(&self, batch: &RecordBatch) -> Result<Vec<ConditionRow>> {
        let ids = id_column(batch, self.source_name())?;
        let round = TextColumn::optional(batch, ROUND);
        let age = TextColumn::optional(batch, AGE_AT_DIAGNOSIS);
        let injury = TextColumn::optional(batch, INJURY);
        let icd10 = TextColumn::optional(batch, ICD10_CODE);
        let category = TextColumn::optional(batch, CCSR_CATEGORY);
        let description = TextColumn::optional(batch, CCSR_DESCRIPTION);

        let code = |raw: Option<&str>| clean_text(raw.map(normalize_header));

        Ok((0..batch.num_rows())
            .filter_map(|row| {
                let id = ids.get(row)?;
                Some(ConditionRow {
                    person_id: id.to_string(),
                    round: parse_round_opt(round.get(row)),
                    age_at_diagnosis: CellValue::parse_opt(age.get(row)),
                    injury: CellValue::parse_opt(injury.get(row)),
                    icd10_code: code(icd10.get(row)),
                    ccsr_category: code(category.get(row)),
                    description: clean_text(description.get(row)),
                })
            })
            .collect())
    }
}
