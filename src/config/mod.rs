//! Configuration for the unification pipeline.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default number of rows per record batch when reading sources
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Default seed used when sampling persons
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Default survey year, used as the suffix of yearly demographic columns
pub const DEFAULT_SURVEY_YEAR: u16 = 2022;

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the processed sources and the `info/` reference folder
    pub data_dir: PathBuf,
    /// Demographic (full-year consolidated) source, one row per person
    pub demographics_path: PathBuf,
    /// Medical conditions source
    pub conditions_path: PathBuf,
    /// Jobs source
    pub jobs_path: PathBuf,
    /// Private insurance source
    pub insurance_path: PathBuf,
    /// Category description to diagnosis code reference table
    pub ccsr_reference_path: PathBuf,
    /// Diagnosis code to chronic indicator reference table
    pub chronic_reference_path: PathBuf,
    /// Where the unified person document is written
    pub unified_output_path: PathBuf,
    /// Where the snapshot sequence is written
    pub snapshots_output_path: PathBuf,
    /// Survey year appended to yearly demographic column names
    pub survey_year: u16,
    /// Rows per record batch when reading sources
    pub batch_size: usize,
    /// Restrict the run to a random sample of this many persons
    pub sample_size: Option<usize>,
    /// Seed for the person sample
    pub random_seed: u64,
    /// Worker threads for snapshot generation
    pub threads: usize,
    /// Pretty-print the JSON outputs
    pub pretty_json: bool,
    /// Draw progress bars on the terminal
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}

impl PipelineConfig {
    /// Create a configuration with every path laid out under `data_dir`
    #[must_use]
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let year = DEFAULT_SURVEY_YEAR;
        let info = data_dir.join("info");
        Self {
            demographics_path: data_dir.join(format!("meps_fyc_{year}_processed.csv")),
            conditions_path: data_dir.join(format!("meps_cond_{year}_processed.csv")),
            jobs_path: data_dir.join(format!("meps_jobs_{year}_processed.csv")),
            insurance_path: data_dir.join(format!("meps_prpl_{year}_processed.csv")),
            ccsr_reference_path: info.join("ccsr_reference_2025.csv"),
            chronic_reference_path: info.join("CCIR_v2025-1.csv"),
            unified_output_path: PathBuf::from(format!("meps_{year}_unified.json")),
            snapshots_output_path: PathBuf::from("snapshots.json"),
            survey_year: year,
            batch_size: DEFAULT_BATCH_SIZE,
            sample_size: None,
            random_seed: DEFAULT_RANDOM_SEED,
            threads: num_cpus::get(),
            pretty_json: true,
            show_progress: true,
            data_dir,
        }
    }

    /// Build a configuration from `MEPS_*` environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup over the defaults
    ///
    /// Recognised keys: `MEPS_DATA_DIR`, `MEPS_DEMOGRAPHICS`, `MEPS_CONDITIONS`,
    /// `MEPS_JOBS`, `MEPS_INSURANCE`, `MEPS_CCSR_REFERENCE`,
    /// `MEPS_CHRONIC_REFERENCE`, `MEPS_UNIFIED_OUTPUT`, `MEPS_SNAPSHOTS_OUTPUT`,
    /// `MEPS_SURVEY_YEAR`, `MEPS_BATCH_SIZE`, `MEPS_SAMPLE_SIZE`, `MEPS_SEED`,
    /// `MEPS_THREADS`, `MEPS_PRETTY_JSON`, `MEPS_PROGRESS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("MEPS_DATA_DIR") {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };

        if let Some(year) = lookup("MEPS_SURVEY_YEAR") {
            config = config.with_survey_year(parse_number("MEPS_SURVEY_YEAR", &year)?);
        }

        let paths: [(&str, &mut PathBuf); 8] = [
            ("MEPS_DEMOGRAPHICS", &mut config.demographics_path),
            ("MEPS_CONDITIONS", &mut config.conditions_path),
            ("MEPS_JOBS", &mut config.jobs_path),
            ("MEPS_INSURANCE", &mut config.insurance_path),
            ("MEPS_CCSR_REFERENCE", &mut config.ccsr_reference_path),
            ("MEPS_CHRONIC_REFERENCE", &mut config.chronic_reference_path),
            ("MEPS_UNIFIED_OUTPUT", &mut config.unified_output_path),
            ("MEPS_SNAPSHOTS_OUTPUT", &mut config.snapshots_output_path),
        ];
        for (key, slot) in paths {
            if let Some(value) = lookup(key) {
                *slot = PathBuf::from(value);
            }
        }

        if let Some(value) = lookup("MEPS_BATCH_SIZE") {
            config.batch_size = parse_number("MEPS_BATCH_SIZE", &value)?;
        }
        if let Some(value) = lookup("MEPS_SAMPLE_SIZE") {
            config.sample_size = Some(parse_number("MEPS_SAMPLE_SIZE", &value)?);
        }
        if let Some(value) = lookup("MEPS_SEED") {
            config.random_seed = parse_number("MEPS_SEED", &value)?;
        }
        if let Some(value) = lookup("MEPS_THREADS") {
            config.threads = parse_number("MEPS_THREADS", &value)?;
        }
        if let Some(value) = lookup("MEPS_PRETTY_JSON") {
            config.pretty_json = parse_flag("MEPS_PRETTY_JSON", &value)?;
        }
        if let Some(value) = lookup("MEPS_PROGRESS") {
            config.show_progress = parse_flag("MEPS_PROGRESS", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Change the survey year, renaming the default source files that embed it
    #[must_use]
    pub fn with_survey_year(mut self, year: u16) -> Self {
        let old = self.survey_year.to_string();
        let new = year.to_string();
        for path in [
            &mut self.demographics_path,
            &mut self.conditions_path,
            &mut self.jobs_path,
            &mut self.insurance_path,
            &mut self.unified_output_path,
        ] {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                let renamed = name.replace(&old, &new);
                path.set_file_name(renamed);
            }
        }
        self.survey_year = year;
        self
    }

    /// Restrict the run to a seeded random sample of persons
    #[must_use]
    pub fn with_sample(mut self, sample_size: usize, seed: u64) -> Self {
        self.sample_size = Some(sample_size);
        self.random_seed = seed;
        self
    }

    /// Set both output paths
    #[must_use]
    pub fn with_outputs(
        mut self,
        unified: impl Into<PathBuf>,
        snapshots: impl Into<PathBuf>,
    ) -> Self {
        self.unified_output_path = unified.into();
        self.snapshots_output_path = snapshots.into();
        self
    }

    /// Set the number of worker threads
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Disable terminal progress bars
    #[must_use]
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the numeric settings
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch size must be greater than zero".into()));
        }
        if self.threads == 0 {
            return Err(Error::Config("thread count must be greater than zero".into()));
        }
        if self.sample_size == Some(0) {
            return Err(Error::Config("sample size must be greater than zero".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} is not a valid number: '{value}'")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key} is not a valid flag: '{value}'"))),
    }
}
