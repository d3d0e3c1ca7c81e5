//! Source loaders for the four survey tables
//!
//! Each source decodes its text record batches into typed rows at the
//! ingestion boundary. Every source must carry the shared person identifier
//! column and at least one row; everything else is optional and reads as
//! `None` when absent.
//!
//! Available sources:
//! - FYC (full-year consolidated): one demographic row per person
//! - COND (medical conditions): many rows per person
//! - JOBS (employment): many rows per person
//! - PRPL (private insurance plans): many rows per person

pub mod cond;
pub mod fyc;
pub mod jobs;
pub mod prpl;

use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::reader::{TextColumn, count_rows, find_column, read_table};
use crate::utils::logging::log_warning;

pub use cond::{ConditionRow, ConditionsSource};
pub use fyc::{DemographicRow, DemographicsSource};
pub use jobs::{JobRow, JobsSource};
pub use prpl::{InsuranceRow, InsuranceSource};

/// Identifier column shared by every source
pub const ID_COLUMN: &str = "person_unique_id";

/// A decoded row that belongs to one person
pub trait PersonRow {
    /// Identifier of the owning person
    fn person_id(&self) -> &str;
}

/// Base trait for source loaders
pub trait SourceLoader: Send + Sync {
    /// Typed row produced by this source
    type Row: PersonRow + Send;

    /// Name of the source, used in logs and errors
    fn source_name(&self) -> &'static str;

    /// Columns read by the decoder besides the identifier
    fn expected_columns(&self) -> Vec<String>;

    /// Decode one text batch into rows
    fn deserialize_batch(&self, batch: &RecordBatch) -> Result<Vec<Self::Row>>;

    /// Read and decode the whole source
    ///
    /// Fails when the file is missing, has no rows or lacks the identifier
    /// column. Rows with a blank identifier are skipped.
    fn load(&self, path: &Path, batch_size: usize) -> Result<Vec<Self::Row>> {
        let start = Instant::now();
        let batches = read_table(path, batch_size, self.source_name())?;
        if count_rows(&batches) == 0 {
            return Err(Error::empty_source(self.source_name(), path));
        }

        if let Some(first) = batches.first() {
            TextColumn::required(first, self.source_name(), ID_COLUMN)?;
            let schema = first.schema();
            for column in self.expected_columns() {
                if find_column(&schema, &column).is_none() {
                    log_warning(
                        &format!(
                            "Source '{}' has no column '{column}', reading it as null",
                            self.source_name()
                        ),
                        Some(path),
                    );
                }
            }
        }

        let mut rows = Vec::with_capacity(count_rows(&batches));
        for batch in &batches {
            rows.extend(self.deserialize_batch(batch)?);
        }

        log::info!(
            "Decoded {} {} rows in {:?}",
            rows.len(),
            self.source_name(),
            start.elapsed()
        );
        Ok(rows)
    }
}

/// Identifier column of a batch, required by every source
pub(crate) fn id_column<'a>(batch: &'a RecordBatch, source_name: &str) -> Result<TextColumn<'a>> {
    TextColumn::required(batch, source_name, ID_COLUMN)
}

/// Decoded rows of all four sources
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub demographics: Vec<DemographicRow>,
    pub conditions: Vec<ConditionRow>,
    pub jobs: Vec<JobRow>,
    pub insurance: Vec<InsuranceRow>,
}

impl SourceTables {
    /// Keep only the rows of the given persons, in their original order
    #[must_use]
    pub fn restrict_to(self, ids: &rustc_hash::FxHashSet<String>) -> Self {
        fn keep<R: PersonRow>(rows: Vec<R>, ids: &rustc_hash::FxHashSet<String>) -> Vec<R> {
            rows.into_iter()
                .filter(|row| ids.contains(row.person_id()))
                .collect()
        }

        Self {
            demographics: keep(self.demographics, ids),
            conditions: keep(self.conditions, ids),
            jobs: keep(self.jobs, ids),
            insurance: keep(self.insurance, ids),
        }
    }

    /// Total rows across the four sources
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.demographics.len() + self.conditions.len() + self.jobs.len() + self.insurance.len()
    }
}
