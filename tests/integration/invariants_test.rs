use std::collections::BTreeMap;
use std::fs;

use crate::utils::{Fixture, by_person};
use meps_unify::algorithm::health::{ChronicClassifier, load_reference_tables};
use meps_unify::models::{Snapshot, UnifiedDocument};
use meps_unify::pipeline::run_all;
use meps_unify::utils::io::{read_snapshots, read_unified_document};

fn run_fixture() -> (Fixture, UnifiedDocument, Vec<Snapshot>, ChronicClassifier) {
    let fixture = Fixture::new();
    run_all(&fixture.config).expect("pipeline run");
    let document = read_unified_document(&fixture.config.unified_output_path).expect("document");
    let snapshots = read_snapshots(&fixture.config.snapshots_output_path).expect("snapshots");
    let tables = load_reference_tables(
        &fixture.config.ccsr_reference_path,
        &fixture.config.chronic_reference_path,
        fixture.config.batch_size,
    );
    let classifier = ChronicClassifier::from_tables(tables.as_ref());
    (fixture, document, snapshots, classifier)
}

fn count(snapshot: &Snapshot, description: &str) -> usize {
    snapshot
        .conditions
        .iter()
        .filter(|c| c.description.as_deref() == Some(description))
        .count()
}

#[test]
fn test_chronic_conditions_carried_exactly_once() {
    let (_fixture, document, snapshots, classifier) = run_fixture();
    let grouped = by_person(&snapshots);
    let mut checked = 0;

    for (id, person) in document.iter() {
        let mut first_diagnosis: BTreeMap<&str, u32> = BTreeMap::new();
        for condition in person.conditions() {
            let Some(description) = condition.description.as_deref() else {
                continue;
            };
            if classifier.is_chronic(Some(description)) {
                let entry = first_diagnosis.entry(description).or_insert(condition.round);
                *entry = (*entry).min(condition.round);
            }
        }

        for snapshot in grouped.get(id.as_str()).into_iter().flatten() {
            for (description, diagnosed) in &first_diagnosis {
                let expected = usize::from(snapshot.round >= *diagnosed);
                assert_eq!(
                    count(snapshot, description),
                    expected,
                    "{id} round {} {description}",
                    snapshot.round
                );
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_acute_conditions_only_in_their_round() {
    let (_fixture, document, snapshots, classifier) = run_fixture();
    let grouped = by_person(&snapshots);

    for (id, person) in document.iter() {
        for snapshot in grouped.get(id.as_str()).into_iter().flatten() {
            let mut expected: Vec<Option<&str>> = person
                .conditions()
                .filter(|c| !classifier.is_chronic(c.description.as_deref()))
                .filter(|c| c.round == snapshot.round)
                .map(|c| c.description.as_deref())
                .collect();
            let mut actual: Vec<Option<&str>> = snapshot
                .conditions
                .iter()
                .filter(|c| !classifier.is_chronic(c.description.as_deref()))
                .map(|c| c.description.as_deref())
                .collect();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "{id} round {}", snapshot.round);
        }
    }
}

#[test]
fn test_every_person_has_positive_premium() {
    let (_fixture, document, _, _) = run_fixture();
    assert!(!document.is_empty());
    for (id, person) in document.iter() {
        assert!(
            person
                .insurance_history
                .iter()
                .any(|record| record.edited_premium > 0.0),
            "{id}"
        );
    }
}

#[test]
fn test_no_record_beyond_insurance_horizon() {
    let (_fixture, document, _, _) = run_fixture();
    for (id, person) in document.iter() {
        let horizon = person.max_insurance_round();
        assert!(horizon > 0, "{id}");
        assert!(person.conditions().all(|c| c.round <= horizon), "{id}");
        assert!(
            person
                .employment_history
                .iter()
                .filter_map(|job| job.round)
                .all(|round| round <= horizon),
            "{id}"
        );
    }
}

#[test]
fn test_snapshot_matches_its_insurance_round() {
    let (_fixture, document, snapshots, _) = run_fixture();
    assert!(!snapshots.is_empty());
    for snapshot in &snapshots {
        assert_eq!(snapshot.insurance.round, Some(snapshot.round));
        assert!(document.contains(&snapshot.person_unique_id));
    }
}

#[test]
fn test_reruns_are_byte_identical() {
    let fixture = Fixture::new();
    let first = fixture.config.clone().with_outputs(
        fixture.path("first/unified.json"),
        fixture.path("first/snapshots.json"),
    );
    let second = fixture
        .config
        .clone()
        .with_outputs(
            fixture.path("second/unified.json"),
            fixture.path("second/snapshots.json"),
        )
        .with_threads(1);

    run_all(&first).expect("first run");
    run_all(&second).expect("second run");

    for (a, b) in [
        (&first.unified_output_path, &second.unified_output_path),
        (&first.snapshots_output_path, &second.snapshots_output_path),
    ] {
        let a = fs::read(a).expect("read first output");
        let b = fs::read(b).expect("read second output");
        assert_eq!(a, b);
    }
}
