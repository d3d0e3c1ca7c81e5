use crate::utils::Fixture;
use meps_unify::async_io::{load_inputs_async, load_sources_async};
use meps_unify::pipeline::{Stage, run_stage_async};

/// Test concurrent loading of the four sources
#[tokio::test]
async fn test_async_source_loading() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    let sources = load_sources_async(&fixture.config).await?;

    assert_eq!(sources.demographics.len(), 4);
    assert_eq!(sources.insurance.len(), 8);
    assert_eq!(sources.conditions.len(), 7);
    assert_eq!(sources.jobs.len(), 7);
    Ok(())
}

/// Reference tables load alongside the sources
#[tokio::test]
async fn test_async_inputs_include_reference() -> meps_unify::Result<()> {
    let fixture = Fixture::new();
    let (_, tables) = load_inputs_async(&fixture.config).await?;
    let tables = tables.expect("reference tables present");
    assert_eq!(tables.code_to_chronic.get("I10"), Some(&true));
    Ok(())
}

/// Test running the stages one after another from async code
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_stages() -> meps_unify::Result<()> {
    let fixture = Fixture::new();

    let (unified, snapshots) = run_stage_async(Stage::Unify, &fixture.config).await?;
    assert!(snapshots.is_none());
    assert_eq!(unified.map(|u| u.dataset.total_persons), Some(2));

    let (unified, snapshots) = run_stage_async(Stage::Snapshots, &fixture.config).await?;
    assert!(unified.is_none());
    assert_eq!(snapshots.map(|s| s.snapshots), Some(4));
    Ok(())
}
