//! JOBS (employment) source
//!
//! Sentinel answers are folded into `Not Reported` here, so nothing
//! downstream has to recognise them.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::JobRecord;
use crate::models::types::{Reported, parse_round_opt};
use crate::reader::TextColumn;
use crate::registry::{PersonRow, SourceLoader, id_column};

pub const ROUND: &str = "round_number";
pub const INSURANCE_OFFERED: &str = "insurance_offered";
pub const TEMPORARY_JOB: &str = "temporary_job";
pub const SALARIED: &str = "salaried_employee";
pub const HOURLY_WAGE: &str = "hourly_wage";
pub const HOURS_PER_WEEK: &str = "hours_per_week";

/// One job row
#[derive(Debug, Clone, PartialEq)]
pub struct JobRow {
    pub person_id: String,
    pub record: JobRecord,
}

impl PersonRow for JobRow {
    fn person_id(&self) -> &str {
        &self.person_id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JobsSource;

impl SourceLoader for JobsSource {
    type Row = JobRow;

    fn source_name(&self) -> &'static str {
        "jobs"
    }

    fn expected_columns(&self) -> Vec<String> {
        [ROUND, INSURANCE_OFFERED, TEMPORARY_JOB, SALARIED, HOURLY_WAGE, HOURS_PER_WEEK]
            .iter()
            .map(|c| (*c).to_string())
            .collect()
    }

    fn deserialize_batch(&self, batch: &RecordBatch) -> Result<Vec<JobRow>> {
        let ids = id_column(batch, self.source_name())?;
        let round = TextColumn::optional(batch, ROUND);
        let offered = TextColumn::optional(batch, INSURANCE_OFFERED);
        let temporary = TextColumn::optional(batch, TEMPORARY_JOB);
        let salaried = TextColumn::optional(batch, SALARIED);
        let wage = TextColumn::optional(batch, HOURLY_WAGE);
        let hours = TextColumn::optional(batch, HOURS_PER_WEEK);

        Ok((0..batch.num_rows())
            .filter_map(|row| {
                let id = ids.get(row)?;
                Some(JobRow {
                    person_id: id.to_string(),
                    record: JobRecord {
                        insurance_offered: Reported::normalize(offered.get(row)),
                        temporary: Reported::normalize(temporary.get(row)),
                        salaried: Reported::normalize(salaried.get(row)),
                        hourly_wage: Reported::normalize(wage.get(row)),
                        hours_per_week: Reported::normalize(hours.get(row)),
                        round: parse_round_opt(round.get(row)),
                    },
                })
            })
            .collect())
    }
}
