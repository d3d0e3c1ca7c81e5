//! Person aggregation
//!
//! Builds the unified person collection in strictly ordered passes over the
//! decoded sources:
//!
//! 1. one person per demographic row
//! 2. qualifying insurance records, tracking each person's highest round
//! 3. conditions, classified against that round
//! 4. jobs, filtered by that round
//!
//! Each pass owns the person arena for its duration. The highest round is
//! kept beside the person and never reaches the emitted document.

use std::collections::BTreeMap;

use indicatif::ProgressBar;

use crate::algorithm::health::chronic::ChronicClassifier;
use crate::algorithm::health::labels::{LabelSource, resolve_description};
use crate::algorithm::health::reference::ReferenceTables;
use crate::algorithm::unify::statistics::AggregationStats;
use crate::algorithm::unify::validity::{FilterCriteria, QualifyingPremium};
use crate::models::types::Round;
use crate::models::{
    ConditionRecord, ConditionRejection, ConditionStatus, InsuranceRecord, Person, UnifiedDocument,
};
use crate::registry::{ConditionRow, DemographicRow, InsuranceRow, JobRow, SourceTables};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// A person under construction
#[derive(Debug, Clone, Default)]
struct Accumulator {
    person: Person,
    max_insurance_round: Round,
}

type Arena = BTreeMap<String, Accumulator>;

/// Joins the four sources into one record per person
#[derive(Debug, Clone, Copy)]
pub struct PersonAggregator<'a> {
    classifier: &'a ChronicClassifier,
    tables: Option<&'a ReferenceTables>,
    show_progress: bool,
}

impl<'a> PersonAggregator<'a> {
    /// Create an aggregator using the given classifier and, when loaded, the
    /// reference tables for label resolution
    #[must_use]
    pub fn new(classifier: &'a ChronicClassifier, tables: Option<&'a ReferenceTables>) -> Self {
        Self {
            classifier,
            tables,
            show_progress: false,
        }
    }

    /// Draw a progress bar for each pass
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the four passes
    ///
    /// The returned document still contains persons without a positive
    /// premium; the validity filter removes them.
    #[must_use]
    pub fn aggregate(&self, sources: SourceTables) -> (UnifiedDocument, AggregationStats) {
        let mut stats = AggregationStats::default();

        let arena = self.init_persons(sources.demographics, &mut stats);
        let arena = self.merge_insurance(arena, sources.insurance, &mut stats);
        let arena = self.merge_conditions(arena, sources.conditions, &mut stats);
        let arena = self.merge_jobs(arena, sources.jobs, &mut stats);

        let document = arena
            .into_iter()
            .map(|(id, acc)| (id, acc.person))
            .collect();
        (document, stats)
    }

    fn progress(&self, len: usize, description: &str) -> ProgressBar {
        create_main_progress_bar(len as u64, description, self.show_progress)
    }

    fn init_persons(&self, rows: Vec<DemographicRow>, stats: &mut AggregationStats) -> Arena {
        let pb = self.progress(rows.len(), "Initializing persons");
        let mut arena = Arena::new();

        for row in rows {
            let acc = Accumulator {
                person: Person::new(row.demographics),
                max_insurance_round: 0,
            };
            if arena.insert(row.person_id, acc).is_some() {
                stats.duplicate_person_rows += 1;
            }
            pb.inc(1);
        }

        stats.persons_initialized = arena.len();
        finish_progress_bar(&pb, "Persons initialized");
        arena
    }

    fn merge_insurance(
        &self,
        mut arena: Arena,
        rows: Vec<InsuranceRow>,
        stats: &mut AggregationStats,
    ) -> Arena {
        let pb = self.progress(rows.len(), "Merging insurance");

        for row in rows {
            pb.inc(1);
            stats.insurance_rows += 1;
            let Some(acc) = arena.get_mut(&row.person_id) else {
                stats.insurance_unknown_person += 1;
                continue;
            };
            if !QualifyingPremium.meets_criteria(&row) {
                stats.insurance_skipped += 1;
                continue;
            }
            let Some(edited_premium) = row.edited_premium else {
                stats.insurance_skipped += 1;
                continue;
            };

            if let Some(round) = row.round {
                acc.max_insurance_round = acc.max_insurance_round.max(round);
            }
            acc.person.insurance_history.push(InsuranceRecord {
                coverage: row.coverage,
                premium: row.premium,
                edited_premium,
                round: row.round,
            });
            stats.insurance_kept += 1;
        }

        for acc in arena.values_mut() {
            acc.person
                .insurance_history
                .sort_by_key(|record| (record.round.is_none(), record.round));
        }

        finish_progress_bar(&pb, "Insurance merged");
        arena
    }

    fn merge_conditions(
        &self,
        mut arena: Arena,
        rows: Vec<ConditionRow>,
        stats: &mut AggregationStats,
    ) -> Arena {
        let pb = self.progress(rows.len(), "Merging conditions");

        for row in rows {
            pb.inc(1);
            stats.condition_rows += 1;
            let Some(acc) = arena.get_mut(&row.person_id) else {
                stats.conditions_unknown_person += 1;
                continue;
            };

            let (description, label_source) = resolve_description(&row, self.tables);
            let chronic = self.classifier.is_chronic(description.as_deref());

            let status =
                match ConditionStatus::classify(row.round, chronic, acc.max_insurance_round) {
                    Ok(status) => status,
                    Err(rejection) => {
                        match rejection {
                            ConditionRejection::UnparseableRound => {
                                stats.conditions_unparseable_round += 1;
                            }
                            ConditionRejection::BeyondHorizon => {
                                stats.conditions_beyond_horizon += 1;
                            }
                            ConditionRejection::NoHorizon => {
                                stats.conditions_without_horizon += 1;
                            }
                        }
                        continue;
                    }
                };
            let Some(round) = row.round else { continue };

            if label_source == LabelSource::Unresolved {
                stats.conditions_unlabelled += 1;
            }
            let record = ConditionRecord {
                description,
                age_at_diagnosis: row.age_at_diagnosis,
                injury: row.injury,
                round,
                diagnosis_code: row.icd10_code,
            };
            match status {
                ConditionStatus::Current => {
                    stats.conditions_current += 1;
                    acc.person.current_conditions.push(record);
                }
                ConditionStatus::Past => {
                    stats.conditions_past += 1;
                    acc.person.past_conditions.push(record);
                }
            }
        }

        finish_progress_bar(&pb, "Conditions merged");
        arena
    }

    fn merge_jobs(
        &self,
        mut arena: Arena,
        rows: Vec<JobRow>,
        stats: &mut AggregationStats,
    ) -> Arena {
        let pb = self.progress(rows.len(), "Merging jobs");

        for row in rows {
            pb.inc(1);
            stats.job_rows += 1;
            let Some(acc) = arena.get_mut(&row.person_id) else {
                stats.jobs_unknown_person += 1;
                continue;
            };

            // Jobs without a usable round are kept.
            if row
                .record
                .round
                .is_some_and(|round| round > acc.max_insurance_round)
            {
                stats.jobs_beyond_horizon += 1;
                continue;
            }
            acc.person.employment_history.push(row.record);
            stats.jobs_kept += 1;
        }

        finish_progress_bar(&pb, "Jobs merged");
        arena
    }
}
