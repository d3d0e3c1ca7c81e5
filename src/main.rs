use anyhow::Context;
use log::info;
use meps_unify::config::PipelineConfig;
use meps_unify::pipeline::{Stage, run_stage_async};
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stage = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Stage>()?,
        None => Stage::default(),
    };
    let config = PipelineConfig::from_env().context("Invalid MEPS_* configuration")?;

    info!("Data directory: {}", config.data_dir.display());
    let start = Instant::now();

    let (unified, snapshots) = run_stage_async(stage, &config)
        .await
        .with_context(|| format!("Stage '{stage}' failed"))?;

    if let Some(outcome) = unified {
        info!(
            "Unified document: {} persons written to {}",
            outcome.dataset.total_persons,
            config.unified_output_path.display()
        );
    }
    if let Some(outcome) = snapshots {
        info!(
            "Snapshots: {} for {} persons written to {}",
            outcome.snapshots,
            outcome.persons,
            config.snapshots_output_path.display()
        );
    }

    info!("Completed in {:?}", start.elapsed());
    Ok(())
}
