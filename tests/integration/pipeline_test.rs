use crate::utils::{Fixture, by_person, descriptions};
use meps_unify::error::Error;
use meps_unify::models::types::Reported;
use meps_unify::pipeline::{run_all, run_snapshots, run_unify};
use meps_unify::utils::io::{read_snapshots, read_unified_document};
use std::fs;

/// Chronic condition carried forward, acute condition only in its own round
#[test]
fn test_example_scenario_snapshots() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    let (_, outcome) = run_all(&fixture.config)?;
    assert_eq!(outcome.persons, 2);

    let snapshots = read_snapshots(&fixture.config.snapshots_output_path)?;
    let grouped = by_person(&snapshots);
    let person = &grouped["10001"];

    let rounds: Vec<_> = person.iter().map(|s| s.round).collect();
    assert_eq!(rounds, vec![1, 2, 3]);
    assert_eq!(descriptions(person[0]), vec!["Fracture"]);
    assert_eq!(descriptions(person[1]), vec!["Essential hypertension"]);
    assert_eq!(descriptions(person[2]), vec!["Essential hypertension"]);
    assert!(person[2].conditions.iter().all(|c| c.round == 3));

    let jobs: Vec<_> = person.iter().map(|s| s.employment_history.len()).collect();
    assert_eq!(jobs, vec![1, 1, 2]);
    Ok(())
}

/// A person whose only premium is zero never reaches the outputs
#[test]
fn test_zero_premium_person_is_excluded() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    let (unified, _) = run_all(&fixture.config)?;

    let document = read_unified_document(&fixture.config.unified_output_path)?;
    assert!(!document.contains("10002"));
    assert!(!document.contains("10004"));
    assert!(!document.contains("99999"));
    assert_eq!(unified.stats.persons_removed_by_validity, 2);

    let snapshots = read_snapshots(&fixture.config.snapshots_output_path)?;
    assert!(snapshots.iter().all(|s| s.person_unique_id != "10002"));
    Ok(())
}

#[test]
fn test_horizon_from_qualifying_records_only() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    let outcome = run_unify(&fixture.config)?;
    let document = read_unified_document(&fixture.config.unified_output_path)?;
    let person = document.get("10003").expect("person 10003 kept");

    assert_eq!(person.max_insurance_round(), 2);
    assert_eq!(person.insurance_history.len(), 1);

    let current: Vec<_> = person
        .current_conditions
        .iter()
        .map(|c| c.description.as_deref())
        .collect();
    assert_eq!(current, vec![Some("Diabetes mellitus without complication")]);
    assert_eq!(person.past_conditions.len(), 1);
    assert_eq!(person.past_conditions[0].description.as_deref(), Some("Fracture"));

    let job_rounds: Vec<_> = person.employment_history.iter().map(|j| j.round).collect();
    assert_eq!(job_rounds, vec![Some(2), None]);
    assert_eq!(
        person.employment_history[0].hours_per_week,
        Reported::NotReported
    );

    assert_eq!(outcome.stats.insurance_kept, 4);
    assert_eq!(outcome.stats.insurance_skipped, 3);
    assert_eq!(outcome.stats.insurance_unknown_person, 1);
    assert_eq!(outcome.stats.conditions_beyond_horizon, 1);
    assert_eq!(outcome.stats.conditions_unparseable_round, 1);
    assert_eq!(outcome.stats.jobs_beyond_horizon, 3);
    Ok(())
}

#[test]
fn test_unified_document_shape() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    run_unify(&fixture.config)?;

    let text = fs::read_to_string(&fixture.config.unified_output_path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let person = &value["10001"];

    assert_eq!(person["edad"], serde_json::json!(54));
    assert_eq!(person["sexo"], serde_json::json!("Female"));
    assert_eq!(person["peso_persona"], serde_json::json!(10234.5));
    assert_eq!(
        person["historial_seguros"][1]["prima_out_of_pocket_editada"],
        serde_json::json!(1250.5)
    );
    assert_eq!(
        person["historial_empleo"][1]["trabajo_temporal"],
        serde_json::json!("Not Reported")
    );
    assert_eq!(
        person["condiciones_medicas_actuales"][0]["descripcion_ccsr"],
        serde_json::json!("Essential hypertension")
    );
    assert!(!text.contains("max_insurance_round"));
    assert!(!text.contains("diagnosis_code"));
    Ok(())
}

/// Without the chronic table every condition is acute and nothing is carried
#[test]
fn test_missing_reference_degrades_classification() -> meps_unify::Result<()> {
    let mut fixture = Fixture::new();
    fixture.config.chronic_reference_path = fixture.path("info/absent.csv");
    run_all(&fixture.config)?;

    let snapshots = read_snapshots(&fixture.config.snapshots_output_path)?;
    let grouped = by_person(&snapshots);
    let person = &grouped["10001"];
    assert_eq!(descriptions(person[0]), vec!["<none>"]);
    assert_eq!(descriptions(person[1]), vec!["<none>"]);
    assert!(person[2].conditions.is_empty());

    let document = read_unified_document(&fixture.config.unified_output_path)?;
    let person = document.get("10001").expect("person kept");
    assert!(person.conditions().all(|c| c.description.is_none()));
    Ok(())
}

#[test]
fn test_missing_identifier_column_is_fatal() {
    let fixture = Fixture::new();
    fixture.write(
        &fixture.config.insurance_path,
        "id,round_number,out_of_pocket_premium_edited\n10001,1,100\n",
    );
    let err = run_unify(&fixture.config).unwrap_err();
    assert!(
        matches!(err, Error::MissingColumn { ref column, .. } if column == "person_unique_id"),
        "{err}"
    );
    assert!(!fixture.config.unified_output_path.exists());
}

#[test]
fn test_empty_source_is_fatal() {
    let fixture = Fixture::new();
    fixture.write(
        &fixture.config.jobs_path,
        "person_unique_id,round_number,insurance_offered\n",
    );
    let err = run_unify(&fixture.config).unwrap_err();
    assert!(matches!(err, Error::EmptySource { .. }), "{err}");
}

#[test]
fn test_missing_source_is_fatal() {
    let mut fixture = Fixture::new();
    fixture.config.conditions_path = fixture.path("nowhere.csv");
    let err = run_unify(&fixture.config).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");
}

#[test]
fn test_snapshot_stage_needs_unified_document() {
    let fixture = Fixture::new();
    let err = run_snapshots(&fixture.config).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");
}

#[test]
fn test_seeded_sample_is_reproducible() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    let config = fixture.config.clone().with_sample(1, 7);
    run_unify(&config)?;
    let first = read_unified_document(&config.unified_output_path)?;
    run_unify(&config)?;
    let second = read_unified_document(&config.unified_output_path)?;

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    Ok(())
}
