//! Seeded selection of a person sample
//!
//! Candidates are demographic persons with at least one qualifying insurance
//! row, taken in demographic row order. The same seed over the same sources
//! always selects the same persons.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use rustc_hash::FxHashSet;

use crate::algorithm::unify::validity::{FilterCriteria, QualifyingPremium};
use crate::registry::SourceTables;
use crate::utils::logging::log_warning;

/// Identifiers eligible for sampling, in demographic row order
#[must_use]
pub fn sample_candidates(sources: &SourceTables) -> Vec<String> {
    let insured: FxHashSet<&str> = sources
        .insurance
        .iter()
        .filter(|row| QualifyingPremium.meets_criteria(row))
        .map(|row| row.person_id.as_str())
        .collect();

    let mut seen = FxHashSet::default();
    sources
        .demographics
        .iter()
        .map(|row| row.person_id.as_str())
        .filter(|id| insured.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Choose `sample_size` candidates with a generator seeded by `seed`
///
/// When fewer candidates exist every candidate is returned.
#[must_use]
pub fn select_sample(sources: &SourceTables, sample_size: usize, seed: u64) -> FxHashSet<String> {
    let candidates = sample_candidates(sources);
    log::info!(
        "Sampling {sample_size} of {} persons with qualifying insurance (seed {seed})",
        candidates.len()
    );

    if candidates.len() <= sample_size {
        if candidates.len() < sample_size {
            log_warning(
                &format!(
                    "Only {} candidates available for a sample of {sample_size}, using all",
                    candidates.len()
                ),
                None,
            );
        }
        return candidates.into_iter().collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut chosen = index::sample(&mut rng, candidates.len(), sample_size).into_vec();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|idx| candidates[idx].clone())
        .collect()
}
