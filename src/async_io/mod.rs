//! Concurrent loading of the pipeline inputs
//!
//! The four sources and the reference tables are independent files, so they
//! are read on tokio blocking tasks and joined. Any structural failure in a
//! source aborts the whole load; reference problems only disable chronic
//! classification.

use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use crate::algorithm::health::reference::{ReferenceTables, load_reference_tables};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::registry::{
    ConditionsSource, DemographicsSource, InsuranceSource, JobsSource, SourceLoader, SourceTables,
};

/// Load one source on a blocking task
pub async fn load_source_async<L>(
    loader: L,
    path: PathBuf,
    batch_size: usize,
) -> Result<Vec<L::Row>>
where
    L: SourceLoader + 'static,
    L::Row: 'static,
{
    tokio::task::spawn_blocking(move || loader.load(&path, batch_size))
        .await
        .map_err(|e| Error::TaskJoin(e.to_string()))?
}

/// Load the four sources concurrently
pub async fn load_sources_async(config: &PipelineConfig) -> Result<SourceTables> {
    let start = Instant::now();
    let batch_size = config.batch_size;

    let (demographics, conditions, jobs, insurance) = futures::try_join!(
        load_source_async(
            DemographicsSource::new(config.survey_year),
            config.demographics_path.clone(),
            batch_size,
        ),
        load_source_async(ConditionsSource, config.conditions_path.clone(), batch_size),
        load_source_async(JobsSource, config.jobs_path.clone(), batch_size),
        load_source_async(InsuranceSource, config.insurance_path.clone(), batch_size),
    )?;

    let sources = SourceTables {
        demographics,
        conditions,
        jobs,
        insurance,
    };
    log::info!(
        "Loaded {} source rows in {:?}",
        sources.total_rows(),
        start.elapsed()
    );
    Ok(sources)
}

/// Load the reference tables on a blocking task
pub async fn load_reference_async(config: &PipelineConfig) -> Result<Option<ReferenceTables>> {
    let ccsr = config.ccsr_reference_path.clone();
    let chronic = config.chronic_reference_path.clone();
    let batch_size = config.batch_size;

    tokio::task::spawn_blocking(move || load_reference_tables(&ccsr, &chronic, batch_size))
        .await
        .map_err(|e| Error::TaskJoin(e.to_string()))
}

/// Load sources and reference tables together
pub async fn load_inputs_async(
    config: &PipelineConfig,
) -> Result<(SourceTables, Option<ReferenceTables>)> {
    futures::try_join!(load_sources_async(config), load_reference_async(config))
}

/// Drive a future to completion from synchronous code
///
/// Reuses the current tokio runtime when there is one, otherwise builds a
/// runtime for the call.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    if tokio::runtime::Handle::try_current().is_ok() {
        Ok(futures::executor::block_on(future))
    } else {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(future))
    }
}

/// Synchronous [`load_inputs_async`]
pub fn load_inputs(config: &PipelineConfig) -> Result<(SourceTables, Option<ReferenceTables>)> {
    block_on(load_inputs_async(config))?
}
