//! Reading tabular sources into text record batches
//!
//! Sources may be CSV or Parquet, chosen by extension. Every column comes back
//! as `Utf8`; typing happens later, when a source's rows are decoded, so a
//! column mixing numbers and labels (`12.5`, `Inapplicable`) survives intact.

pub mod columns;

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::ArrayRef;
use arrow::compute::cast;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::{Transfer, log_transfer_complete, log_transfer_start};

pub use columns::{TextColumn, find_column, normalize_header};

/// Number of CSV records scanned to discover the header
const SCHEMA_SCAN_ROWS: usize = 100;

/// File formats a source can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma separated values with a header line
    Csv,
    /// Apache Parquet
    Parquet,
}

impl SourceFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv" | "txt") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read a whole table as text record batches
///
/// # Arguments
/// * `path` - CSV or Parquet file
/// * `batch_size` - Rows per record batch
/// * `purpose` - What the table is, for log lines
pub fn read_table(path: &Path, batch_size: usize, purpose: &str) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_transfer_start(Transfer::Read, purpose, path);

    let batches = match SourceFormat::from_path(path)? {
        SourceFormat::Csv => read_csv(path, batch_size, purpose)?,
        SourceFormat::Parquet => read_parquet(path, batch_size, purpose)?,
    };

    let rows = count_rows(&batches);
    log_transfer_complete(Transfer::Read, path, rows, start.elapsed());
    Ok(batches)
}

/// Total number of rows across batches
#[must_use]
pub fn count_rows(batches: &[RecordBatch]) -> usize {
    batches.iter().map(RecordBatch::num_rows).sum()
}

fn read_csv(path: &Path, batch_size: usize, purpose: &str) -> Result<Vec<RecordBatch>> {
    let mut file = safe_open_file(path, purpose)?;

    let (discovered, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(SCHEMA_SCAN_ROWS))?;
    file.rewind()?;

    if discovered.fields().is_empty() {
        return Ok(Vec::new());
    }

    let schema = Arc::new(text_schema(&discovered));
    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)?;

    Ok(reader.collect::<std::result::Result<Vec<_>, _>>()?)
}

fn read_parquet(path: &Path, batch_size: usize, purpose: &str) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, purpose)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(batch_size)
        .build()?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(to_text_batch(&batch?)?);
    }
    Ok(batches)
}

/// Schema with the same column names, every column nullable `Utf8`
#[must_use]
pub fn text_schema(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| Field::new(field.name(), DataType::Utf8, true))
        .collect();
    Schema::new(fields)
}

/// Cast every column of a batch to `Utf8`
pub fn to_text_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let columns = batch
        .columns()
        .iter()
        .map(|column| {
            if column.data_type() == &DataType::Utf8 {
                Ok(column.clone())
            } else {
                cast(column, &DataType::Utf8).map_err(Error::from)
            }
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(Arc::new(text_schema(&schema)), columns)?)
}
