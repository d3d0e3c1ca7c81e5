//! Named access to text columns of a record batch

use arrow::array::{Array, StringArray};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

/// Header name with surrounding whitespace and quote characters removed
///
/// Some reference files wrap headers and codes in single quotes (`'A000'`).
#[must_use]
pub fn normalize_header(name: &str) -> &str {
    name.trim().trim_matches(|c: char| c == '\'' || c == '"').trim()
}

/// Index of a column, matching names case-insensitively after normalisation
#[must_use]
pub fn find_column(schema: &Schema, name: &str) -> Option<usize> {
    schema
        .fields()
        .iter()
        .position(|field| normalize_header(field.name()).eq_ignore_ascii_case(name))
}

/// A text column that may be absent from the batch
///
/// Absent columns and null cells both read as `None`, as do blank cells.
#[derive(Debug, Clone, Copy)]
pub struct TextColumn<'a> {
    array: Option<&'a StringArray>,
}

impl<'a> TextColumn<'a> {
    /// Look up a column the source cannot do without
    pub fn required(batch: &'a RecordBatch, source_name: &str, name: &str) -> Result<Self> {
        let column = Self::optional(batch, name);
        if column.is_present() {
            Ok(column)
        } else {
            Err(Error::missing_column(source_name, name))
        }
    }

    /// Look up a column that may be missing
    #[must_use]
    pub fn optional(batch: &'a RecordBatch, name: &str) -> Self {
        match find_column(&batch.schema(), name) {
            Some(idx) => Self::at(batch, idx),
            None => Self { array: None },
        }
    }

    /// Column at a known index
    #[must_use]
    pub fn at(batch: &'a RecordBatch, idx: usize) -> Self {
        let array = (idx < batch.num_columns())
            .then(|| batch.column(idx).as_any().downcast_ref::<StringArray>())
            .flatten();
        Self { array }
    }

    /// Whether the column exists in the batch
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.array.is_some()
    }

    /// Trimmed cell value, `None` when absent, null or blank
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&'a str> {
        let array = self.array?;
        if row >= array.len() || array.is_null(row) {
            return None;
        }
        let value = array.value(row).trim();
        (!value.is_empty()).then_some(value)
    }
}
