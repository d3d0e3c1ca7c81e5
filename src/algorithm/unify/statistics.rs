//! Tallies and summaries of a unification run

use crate::models::UnifiedDocument;
use crate::utils::logging::log_tally;

/// Running counts of rows seen, kept and dropped by each aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub persons_initialized: usize,
    pub duplicate_person_rows: usize,

    pub insurance_rows: usize,
    pub insurance_kept: usize,
    pub insurance_skipped: usize,
    pub insurance_unknown_person: usize,

    pub condition_rows: usize,
    pub conditions_current: usize,
    pub conditions_past: usize,
    pub conditions_beyond_horizon: usize,
    pub conditions_unparseable_round: usize,
    pub conditions_without_horizon: usize,
    pub conditions_unknown_person: usize,
    pub conditions_unlabelled: usize,

    pub job_rows: usize,
    pub jobs_kept: usize,
    pub jobs_beyond_horizon: usize,
    pub jobs_unknown_person: usize,

    pub persons_removed_by_validity: usize,
}

impl AggregationStats {
    /// Condition rows that made it into a person
    #[must_use]
    pub fn conditions_kept(&self) -> usize {
        self.conditions_current + self.conditions_past
    }

    /// Log every tally, one line each
    pub fn log(&self) {
        let stage = "demographics";
        log_tally(stage, "persons initialized", self.persons_initialized);
        log_tally(stage, "duplicate identifier rows", self.duplicate_person_rows);

        let stage = "insurance";
        log_tally(stage, "rows processed", self.insurance_rows);
        log_tally(stage, "rows kept", self.insurance_kept);
        log_tally(stage, "rows skipped (premium not qualifying)", self.insurance_skipped);
        log_tally(stage, "rows for unknown persons", self.insurance_unknown_person);

        let stage = "conditions";
        log_tally(stage, "rows processed", self.condition_rows);
        log_tally(stage, "kept as current", self.conditions_current);
        log_tally(stage, "kept as past", self.conditions_past);
        log_tally(stage, "dropped beyond insurance horizon", self.conditions_beyond_horizon);
        log_tally(stage, "dropped for unparseable round", self.conditions_unparseable_round);
        log_tally(stage, "dropped acute without horizon", self.conditions_without_horizon);
        log_tally(stage, "rows for unknown persons", self.conditions_unknown_person);
        log_tally(stage, "kept without a description", self.conditions_unlabelled);

        let stage = "jobs";
        log_tally(stage, "rows processed", self.job_rows);
        log_tally(stage, "rows kept", self.jobs_kept);
        log_tally(stage, "dropped beyond insurance horizon", self.jobs_beyond_horizon);
        log_tally(stage, "rows for unknown persons", self.jobs_unknown_person);

        log_tally(
            "validity",
            "persons removed without positive premium",
            self.persons_removed_by_validity,
        );
    }
}

/// Summary figures of a unified document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStatistics {
    pub total_persons: usize,
    pub persons_with_conditions: usize,
    pub persons_with_jobs: usize,
    pub persons_with_insurance: usize,
    pub total_conditions: usize,
    pub current_conditions: usize,
    pub past_conditions: usize,
    pub total_jobs: usize,
    pub total_insurance_records: usize,
}

impl DatasetStatistics {
    /// Compute the figures for a document
    #[must_use]
    pub fn from_document(document: &UnifiedDocument) -> Self {
        let mut stats = Self::default();
        for (_, person) in document.iter() {
            stats.total_persons += 1;
            if person.condition_count() > 0 {
                stats.persons_with_conditions += 1;
            }
            if !person.employment_history.is_empty() {
                stats.persons_with_jobs += 1;
            }
            if !person.insurance_history.is_empty() {
                stats.persons_with_insurance += 1;
            }
            stats.current_conditions += person.current_conditions.len();
            stats.past_conditions += person.past_conditions.len();
            stats.total_jobs += person.employment_history.len();
            stats.total_insurance_records += person.insurance_history.len();
        }
        stats.total_conditions = stats.current_conditions + stats.past_conditions;
        stats
    }

    /// Mean number of conditions per person
    #[must_use]
    pub fn mean_conditions_per_person(&self) -> f64 {
        if self.total_persons == 0 {
            0.0
        } else {
            self.total_conditions as f64 / self.total_persons as f64
        }
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_persons == 0 {
            0.0
        } else {
            count as f64 / self.total_persons as f64 * 100.0
        }
    }

    /// Multi-line human readable summary
    #[must_use]
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Unified Dataset Summary:\n");
        summary.push_str(&format!("  Total Persons: {}\n", self.total_persons));
        summary.push_str(&format!(
            "  Persons with Conditions: {} ({:.1}%)\n",
            self.persons_with_conditions,
            self.percentage(self.persons_with_conditions)
        ));
        summary.push_str(&format!(
            "  Persons with Jobs: {} ({:.1}%)\n",
            self.persons_with_jobs,
            self.percentage(self.persons_with_jobs)
        ));
        summary.push_str(&format!(
            "  Persons with Insurance: {} ({:.1}%)\n",
            self.persons_with_insurance,
            self.percentage(self.persons_with_insurance)
        ));
        summary.push_str(&format!(
            "  Conditions: {} ({} current, {} past)\n",
            self.total_conditions, self.current_conditions, self.past_conditions
        ));
        summary.push_str(&format!(
            "  Mean Conditions per Person: {:.2}\n",
            self.mean_conditions_per_person()
        ));
        summary.push_str(&format!("  Job Records: {}\n", self.total_jobs));
        summary.push_str(&format!(
            "  Insurance Records: {}\n",
            self.total_insurance_records
        ));
        summary
    }
}
