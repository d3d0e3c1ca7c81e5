//! Snapshot generation
//!
//! Replays each person's history round by round. One snapshot is produced for
//! every distinct round in the person's insurance history. Chronic conditions
//! are carried forward from their diagnosis round, once per snapshot; acute
//! conditions appear only in the snapshot of their own round.
//!
//! Persons are independent, so they are processed on a rayon pool sharing the
//! read-only classifier. Output order is fixed regardless of thread count:
//! persons by identifier, then rounds ascending.

use std::time::Instant;

use itertools::Itertools;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::algorithm::health::chronic::ChronicClassifier;
use crate::error::{Error, Result};
use crate::models::types::Round;
use crate::models::{ConditionRecord, Person, Snapshot, UnifiedDocument};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Rounds of one person; surveys have few, so they stay inline
pub type RoundList = SmallVec<[Round; 8]>;

/// Settings for a snapshot run
#[derive(Debug, Clone, Copy)]
pub struct SnapshotConfig {
    /// Worker threads
    pub threads: usize,
    /// Draw a progress bar
    pub show_progress: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            show_progress: false,
        }
    }
}

/// Distinct rounds with an insurance record, ascending
#[must_use]
pub fn insurance_rounds(person: &Person) -> RoundList {
    person
        .insurance_history
        .iter()
        .filter_map(|record| record.round)
        .sorted_unstable()
        .dedup()
        .collect()
}

/// Conditions visible at `round`
///
/// Acute conditions diagnosed at `round` come first, in record order. Chronic
/// conditions diagnosed at or before `round` follow, one per description,
/// taken from the earliest diagnosis and presented at `round`.
#[must_use]
pub fn conditions_at(
    person: &Person,
    round: Round,
    classifier: &ChronicClassifier,
) -> Vec<ConditionRecord> {
    let (chronic, acute): (Vec<&ConditionRecord>, Vec<&ConditionRecord>) = person
        .conditions()
        .filter(|condition| condition.round <= round)
        .partition(|condition| classifier.is_chronic(condition.description.as_deref()));

    let mut visible: Vec<ConditionRecord> = acute
        .into_iter()
        .filter(|condition| condition.round == round)
        .cloned()
        .collect();

    visible.extend(
        chronic
            .into_iter()
            .sorted_by_key(|condition| condition.round)
            .unique_by(|condition| condition.description.clone())
            .map(|condition| condition.presented_at(round)),
    );
    visible
}

/// All snapshots of one person, rounds ascending
#[must_use]
pub fn person_snapshots(
    person_id: &str,
    person: &Person,
    classifier: &ChronicClassifier,
) -> Vec<Snapshot> {
    insurance_rounds(person)
        .into_iter()
        .filter_map(|round| {
            let insurance = person
                .insurance_history
                .iter()
                .find(|record| record.round == Some(round))?
                .clone();

            Some(Snapshot {
                person_unique_id: person_id.to_string(),
                round,
                demographics: person.demographics.clone(),
                conditions: conditions_at(person, round, classifier),
                employment_history: person
                    .employment_history
                    .iter()
                    .filter(|job| job.reported_by(round))
                    .cloned()
                    .collect(),
                insurance,
            })
        })
        .collect()
}

/// Generate the snapshot sequence of a whole document
pub fn generate_snapshots(
    document: &UnifiedDocument,
    classifier: &ChronicClassifier,
    config: &SnapshotConfig,
) -> Result<Vec<Snapshot>> {
    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| Error::Config(format!("Failed to build snapshot thread pool: {e}")))?;

    let persons: Vec<(&String, &Person)> = document.iter().collect();
    let pb = create_main_progress_bar(
        persons.len() as u64,
        "Generating snapshots",
        config.show_progress,
    );
    log::info!(
        "Generating snapshots for {} persons on {} threads",
        persons.len(),
        config.threads
    );

    let per_person: Vec<Vec<Snapshot>> = pool.install(|| {
        persons
            .par_iter()
            .map(|(id, person)| {
                let snapshots = person_snapshots(id, person, classifier);
                pb.inc(1);
                snapshots
            })
            .collect()
    });

    let snapshots: Vec<Snapshot> = per_person.into_iter().flatten().collect();
    finish_progress_bar(&pb, "Snapshots generated");
    log::info!(
        "Generated {} snapshots in {:?}",
        snapshots.len(),
        start.elapsed()
    );
    Ok(snapshots)
}
