//! Error handling for the unification pipeline.
//!
//! Only structural problems surface as an [`Error`]: an unreadable file, a source
//! without its identifier column, an empty source. Record-level problems (an
//! unparseable round, a sentinel premium) are resolved where they are found and
//! never reach this type.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding CSV data or casting Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error decoding Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading or writing one of the JSON documents
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source is missing a column the pipeline cannot work without
    #[error("Source '{source_name}' is missing required column '{column}'")]
    MissingColumn {
        /// Name of the source
        source_name: String,
        /// Name of the missing column
        column: String,
    },

    /// A source file exists but holds no rows
    #[error("Source '{source_name}' at {} contains no rows", path.display())]
    EmptySource {
        /// Name of the source
        source_name: String,
        /// Path of the empty file
        path: PathBuf,
    },

    /// A file extension the reader does not understand
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// An input file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A background loading task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl Error {
    /// Create a missing column error
    #[must_use]
    pub fn missing_column(source_name: &str, column: &str) -> Self {
        Self::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        }
    }

    /// Create an empty source error
    #[must_use]
    pub fn empty_source(source_name: &str, path: &Path) -> Self {
        Self::EmptySource {
            source_name: source_name.to_string(),
            path: path.to_path_buf(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
