//! Pipeline stages
//!
//! `unify` turns the four sources into the unified person document;
//! `snapshots` turns that document into the snapshot sequence. The document
//! on disk is the only thing the stages share, so they can run as separate
//! invocations.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::algorithm::health::chronic::ChronicClassifier;
use crate::algorithm::health::reference::{ReferenceTables, load_reference_tables};
use crate::algorithm::sampling::select_sample;
use crate::algorithm::snapshot::{SnapshotConfig, generate_snapshots};
use crate::algorithm::unify::{
    AggregationStats, DatasetStatistics, PersonAggregator, apply_validity_filter,
};
use crate::async_io::{block_on, load_inputs_async};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::UnifiedDocument;
use crate::registry::SourceTables;
use crate::utils::io::{read_unified_document, write_snapshots, write_unified_document};

/// Which part of the pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Sources to unified document
    Unify,
    /// Unified document to snapshots
    Snapshots,
    /// Both, in order
    #[default]
    All,
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unify" => Ok(Self::Unify),
            "snapshots" => Ok(Self::Snapshots),
            "all" => Ok(Self::All),
            other => Err(Error::Config(format!(
                "unknown stage '{other}', expected unify, snapshots or all"
            ))),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unify => "unify",
            Self::Snapshots => "snapshots",
            Self::All => "all",
        })
    }
}

/// Result of the unify stage
#[derive(Debug, Clone)]
pub struct UnifyOutcome {
    pub stats: AggregationStats,
    pub dataset: DatasetStatistics,
}

/// Result of the snapshot stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub persons: usize,
    pub snapshots: usize,
}

/// Sample, aggregate and filter already loaded sources
#[must_use]
pub fn unify_sources(
    sources: SourceTables,
    tables: Option<&ReferenceTables>,
    config: &PipelineConfig,
) -> (UnifiedDocument, AggregationStats) {
    let sources = match config.sample_size {
        Some(size) => {
            let ids = select_sample(&sources, size, config.random_seed);
            sources.restrict_to(&ids)
        }
        None => sources,
    };

    let classifier = ChronicClassifier::from_tables(tables);
    let (mut document, mut stats) = PersonAggregator::new(&classifier, tables)
        .with_progress(config.show_progress)
        .aggregate(sources);
    stats.persons_removed_by_validity = apply_validity_filter(&mut document);
    (document, stats)
}

/// Run the unify stage
pub async fn run_unify_async(config: &PipelineConfig) -> Result<UnifyOutcome> {
    config.validate()?;
    let start = Instant::now();

    let (sources, tables) = load_inputs_async(config).await?;
    let (document, stats) = unify_sources(sources, tables.as_ref(), config);
    stats.log();

    let dataset = DatasetStatistics::from_document(&document);
    for line in dataset.generate_summary().lines() {
        log::info!("{line}");
    }

    write_unified_document(&config.unified_output_path, &document, config.pretty_json)?;
    log::info!("Unify stage finished in {:?}", start.elapsed());
    Ok(UnifyOutcome { stats, dataset })
}

/// Run the snapshot stage from the unified document on disk
pub fn run_snapshots(config: &PipelineConfig) -> Result<SnapshotOutcome> {
    config.validate()?;
    let start = Instant::now();

    let tables = load_reference_tables(
        &config.ccsr_reference_path,
        &config.chronic_reference_path,
        config.batch_size,
    );
    let classifier = ChronicClassifier::from_tables(tables.as_ref());
    let document = read_unified_document(&config.unified_output_path)?;

    let snapshot_config = SnapshotConfig {
        threads: config.threads,
        show_progress: config.show_progress,
    };
    let snapshots = generate_snapshots(&document, &classifier, &snapshot_config)?;
    write_snapshots(&config.snapshots_output_path, &snapshots, config.pretty_json)?;

    log::info!("Snapshot stage finished in {:?}", start.elapsed());
    Ok(SnapshotOutcome {
        persons: document.len(),
        snapshots: snapshots.len(),
    })
}

/// Run the requested stage
pub async fn run_stage_async(
    stage: Stage,
    config: &PipelineConfig,
) -> Result<(Option<UnifyOutcome>, Option<SnapshotOutcome>)> {
    log::info!("Running stage '{stage}'");
    match stage {
        Stage::Unify => Ok((Some(run_unify_async(config).await?), None)),
        Stage::Snapshots => Ok((None, Some(run_snapshots(config)?))),
        Stage::All => {
            let unified = run_unify_async(config).await?;
            let snapshots = run_snapshots(config)?;
            Ok((Some(unified), Some(snapshots)))
        }
    }
}

/// Synchronous [`run_unify_async`]
pub fn run_unify(config: &PipelineConfig) -> Result<UnifyOutcome> {
    block_on(run_unify_async(config))?
}

/// Synchronous [`run_stage_async`] for [`Stage::All`]
pub fn run_all(config: &PipelineConfig) -> Result<(UnifyOutcome, SnapshotOutcome)> {
    let unified = run_unify(config)?;
    let snapshots = run_snapshots(config)?;
    Ok((unified, snapshots))
}
