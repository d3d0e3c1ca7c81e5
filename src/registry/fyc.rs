//! FYC (full-year consolidated) demographic source
//!
//! Yearly columns carry the survey year as a suffix, e.g. `region_2022`.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::Demographics;
use crate::models::types::CellValue;
use crate::reader::TextColumn;
use crate::registry::{PersonRow, SourceLoader, id_column};

/// Columns without a year suffix
pub const AGE: &str = "age_last_birthday";
pub const SEX: &str = "sex";
pub const RACE_ETHNICITY: &str = "race_ethnicity";
pub const PERCEIVED_HEALTH: &str = "perceived_health_status";

/// Column stems that take a `_{year}` suffix
pub const MARITAL_STATUS: &str = "marital_status";
pub const REGION: &str = "region";
pub const TOTAL_EXPENDITURE: &str = "total_healthcare_exp";
pub const OUT_OF_POCKET_EXPENDITURE: &str = "total_out_of_pocket_exp";
pub const POVERTY_CATEGORY: &str = "poverty_category";
pub const INSURANCE_COVERAGE: &str = "insurance_coverage";
pub const PERSON_WEIGHT: &str = "person_weight";

/// One demographic row
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicRow {
    /// Person identifier
    pub person_id: String,
    /// Decoded demographic fields
    pub demographics: Demographics,
}

impl PersonRow for DemographicRow {
    fn person_id(&self) -> &str {
        &self.person_id
    }
}

/// Loader for the demographic source of one survey year
#[derive(Debug, Clone, Copy)]
pub struct DemographicsSource {
    survey_year: u16,
}

impl DemographicsSource {
    /// Create a loader for the given survey year
    #[must_use]
    pub fn new(survey_year: u16) -> Self {
        Self { survey_year }
    }

    fn yearly(&self, stem: &str) -> String {
        format!("{stem}_{}", self.survey_year)
    }
}

impl SourceLoader for DemographicsSource {
    type Row = DemographicRow;

    fn source_name(&self) -> &'static str {
        "demographics"
    }

    fn expected_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = [AGE, SEX, RACE_ETHNICITY, PERCEIVED_HEALTH]
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        columns.extend(
            [
                MARITAL_STATUS,
                REGION,
                TOTAL_EXPENDITURE,
                OUT_OF_POCKET_EXPENDITURE,
                POVERTY_CATEGORY,
                INSURANCE_COVERAGE,
                PERSON_WEIGHT,
            ]
            .iter()
            .map(|stem| self.yearly(stem)),
        );
        columns
    }

    fn deserialize_batch(&self, batch: &RecordBatch) -> Result<Vec<DemographicRow>> {
        let ids = id_column(batch, self.source_name())?;
        let age = TextColumn::optional(batch, AGE);
        let sex = TextColumn::optional(batch, SEX);
        let race = TextColumn::optional(batch, RACE_ETHNICITY);
        let health = TextColumn::optional(batch, PERCEIVED_HEALTH);
        let marital = TextColumn::optional(batch, &self.yearly(MARITAL_STATUS));
        let region = TextColumn::optional(batch, &self.yearly(REGION));
        let total = TextColumn::optional(batch, &self.yearly(TOTAL_EXPENDITURE));
        let oop = TextColumn::optional(batch, &self.yearly(OUT_OF_POCKET_EXPENDITURE));
        let poverty = TextColumn::optional(batch, &self.yearly(POVERTY_CATEGORY));
        let coverage = TextColumn::optional(batch, &self.yearly(INSURANCE_COVERAGE));
        let weight = TextColumn::optional(batch, &self.yearly(PERSON_WEIGHT));

        let mut rows = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            let Some(id) = ids.get(row) else { continue };
            rows.push(DemographicRow {
                person_id: id.to_string(),
                demographics: Demographics {
                    age: CellValue::parse_opt(age.get(row)),
                    sex: CellValue::parse_opt(sex.get(row)),
                    race_ethnicity: CellValue::parse_opt(race.get(row)),
                    marital_status: CellValue::parse_opt(marital.get(row)),
                    region: CellValue::parse_opt(region.get(row)),
                    total_expenditure: CellValue::parse_opt(total.get(row)),
                    out_of_pocket_expenditure: CellValue::parse_opt(oop.get(row)),
                    poverty_category: CellValue::parse_opt(poverty.get(row)),
                    insurance_coverage: CellValue::parse_opt(coverage.get(row)),
                    perceived_health: CellValue::parse_opt(health.get(row)),
                    person_weight: CellValue::parse_opt(weight.get(row)),
                },
            });
        }
        Ok(rows)
    }
}
