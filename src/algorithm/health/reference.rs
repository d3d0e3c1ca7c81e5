//! Reference tables for condition labelling and chronic classification
//!
//! Two static tables are read once per run:
//! - the CCSR reference, mapping ICD-10-CM codes to CCSR categories and their
//!   descriptions
//! - the chronic condition indicator (CCIR) table, flagging ICD-10-CM codes
//!   as chronic
//!
//! A missing or unusable table disables chronic classification for the run
//! instead of aborting it.

use std::collections::BTreeSet;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::reader::{TextColumn, normalize_header, read_table};

/// CCSR reference column holding the ICD-10-CM code
pub const CCSR_CODE: &str = "ICD-10-CM Code";
/// CCSR reference column holding the CCSR category code
pub const CCSR_CATEGORY: &str = "CCSR Category";
/// CCSR reference column holding the CCSR category description
pub const CCSR_CATEGORY_DESCRIPTION: &str = "CCSR Category Description";

/// Chronic table header fragment of the code column
pub const CHRONIC_CODE: &str = "ICD-10-CM CODE";
/// Chronic table header fragment of the indicator column
pub const CHRONIC_INDICATOR: &str = "CHRONIC INDICATOR";

/// In-memory reference data
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// ICD-10-CM code to chronic flag
    pub code_to_chronic: FxHashMap<String, bool>,
    /// CCSR category description to the ICD-10-CM codes filed under it
    pub description_to_codes: FxHashMap<String, BTreeSet<String>>,
    /// CCSR category code to its description
    pub category_to_description: FxHashMap<String, String>,
}

impl ReferenceTables {
    /// Description of a CCSR category code
    #[must_use]
    pub fn description_for_category(&self, category: &str) -> Option<&str> {
        let category = normalize_code(category)?;
        self.category_to_description
            .get(&category)
            .map(String::as_str)
    }

    /// Add one row of the CCSR reference
    pub fn add_category_row(&mut self, code: &str, category: Option<&str>, description: &str) {
        let (Some(code), Some(description)) = (normalize_code(code), clean_value(description))
        else {
            return;
        };

        if let Some(category) = category.and_then(normalize_code) {
            self.category_to_description
                .entry(category)
                .or_insert_with(|| description.clone());
        }
        self.description_to_codes
            .entry(description)
            .or_default()
            .insert(code);
    }

    /// Add one row of the chronic indicator table
    pub fn add_chronic_row(&mut self, code: &str, indicator: Option<&str>) {
        if let Some(code) = normalize_code(code) {
            self.code_to_chronic
                .insert(code, indicator.is_some_and(is_chronic_indicator));
        }
    }
}

/// Upper-cased code with quotes and whitespace removed
#[must_use]
pub fn normalize_code(raw: &str) -> Option<String> {
    clean_value(raw).map(|code| code.to_ascii_uppercase())
}

fn clean_value(raw: &str) -> Option<String> {
    let value = normalize_header(raw);
    (!value.is_empty()).then(|| value.to_string())
}

/// Whether an indicator cell means chronic: it must read as the integer 1
#[must_use]
pub fn is_chronic_indicator(raw: &str) -> bool {
    let value = normalize_header(raw);
    match value.parse::<i64>() {
        Ok(v) => v == 1,
        Err(_) => value.parse::<f64>().is_ok_and(|v| v == 1.0),
    }
}

/// Load both reference tables
///
/// Returns `None`, after logging why, when either file is missing or cannot
/// be used. Callers must then treat every condition as non-chronic.
#[must_use]
pub fn load_reference_tables(
    ccsr_path: &Path,
    chronic_path: &Path,
    batch_size: usize,
) -> Option<ReferenceTables> {
    for path in [ccsr_path, chronic_path] {
        if !path.is_file() {
            log::error!(
                "Reference table not found, chronic classification disabled: {}",
                path.display()
            );
            return None;
        }
    }

    match try_load_reference_tables(ccsr_path, chronic_path, batch_size) {
        Ok(tables) => {
            log::info!(
                "Loaded reference tables: {} category descriptions, {} chronic indicator codes",
                tables.description_to_codes.len(),
                tables.code_to_chronic.len()
            );
            Some(tables)
        }
        Err(err) => {
            log::error!("Unusable reference table, chronic classification disabled: {err}");
            None
        }
    }
}

fn try_load_reference_tables(
    ccsr_path: &Path,
    chronic_path: &Path,
    batch_size: usize,
) -> Result<ReferenceTables> {
    let mut tables = ReferenceTables::default();

    for batch in read_table(ccsr_path, batch_size, "CCSR reference")? {
        let codes = TextColumn::required(&batch, "CCSR reference", CCSR_CODE)?;
        let descriptions =
            TextColumn::required(&batch, "CCSR reference", CCSR_CATEGORY_DESCRIPTION)?;
        let categories = TextColumn::optional(&batch, CCSR_CATEGORY);

        for row in 0..batch.num_rows() {
            if let (Some(code), Some(description)) = (codes.get(row), descriptions.get(row)) {
                tables.add_category_row(code, categories.get(row), description);
            }
        }
    }

    for batch in read_table(chronic_path, batch_size, "chronic indicator reference")? {
        let codes = chronic_column(&batch, CHRONIC_CODE)?;
        let indicators = chronic_column(&batch, CHRONIC_INDICATOR)?;

        for row in 0..batch.num_rows() {
            if let Some(code) = codes.get(row) {
                tables.add_chronic_row(code, indicators.get(row));
            }
        }
    }

    if tables.description_to_codes.is_empty() {
        return Err(Error::empty_source("CCSR reference", ccsr_path));
    }
    if tables.code_to_chronic.is_empty() {
        return Err(Error::empty_source("chronic indicator reference", chronic_path));
    }
    Ok(tables)
}

/// Column of the chronic table whose header contains `fragment`
///
/// An exact match wins over a containing header, so `ICD-10-CM CODE` is not
/// confused with `ICD-10-CM CODE DESCRIPTION`.
fn chronic_column<'a>(batch: &'a RecordBatch, fragment: &str) -> Result<TextColumn<'a>> {
    let schema = batch.schema();
    let headers: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| normalize_header(f.name()).to_ascii_uppercase())
        .collect();

    headers
        .iter()
        .position(|h| h == fragment)
        .or_else(|| headers.iter().position(|h| h.contains(fragment)))
        .map(|idx| TextColumn::at(batch, idx))
        .ok_or_else(|| Error::missing_column("chronic indicator reference", fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_quoted_chronic_table() {
        let dir = tempfile::tempdir().unwrap();
        let ccsr = write(
            dir.path(),
            "ccsr.csv",
            "ICD-10-CM Code,ICD-10-CM Code Description,CCSR Category,CCSR Category Description\n\
             I10,Essential (primary) hypertension,CIR007,Essential hypertension\n\
             S52501A,Fracture of radius,INJ003,Fracture of the upper limb\n",
        );
        let ccir = write(
            dir.path(),
            "ccir.csv",
            "'ICD-10-CM CODE','ICD-10-CM CODE DESCRIPTION','CHRONIC INDICATOR'\n\
             'I10','Essential (primary) hypertension','1'\n\
             'S52501A','Fracture of radius','0'\n",
        );

        let tables = load_reference_tables(&ccsr, &ccir, 1024).unwrap();
        assert_eq!(tables.code_to_chronic.get("I10"), Some(&true));
        assert_eq!(tables.code_to_chronic.get("S52501A"), Some(&false));
        assert!(tables.description_to_codes["Essential hypertension"].contains("I10"));
        assert_eq!(tables.description_for_category("CIR007"), Some("Essential hypertension"));
        assert_eq!(tables.description_for_category("INJ003"), Some("Fracture of the upper limb"));
        assert_eq!(tables.description_for_category("XXX999"), None);
    }

    #[test]
    fn test_missing_table_disables_classification() {
        let dir = tempfile::tempdir().unwrap();
        let ccsr = write(
            dir.path(),
            "ccsr.csv",
            "ICD-10-CM Code,CCSR Category,CCSR Category Description\n\
             I10,CIR007,Essential hypertension\n",
        );
        assert!(load_reference_tables(&ccsr, &dir.path().join("absent.csv"), 1024).is_none());
    }

    #[test]
    fn test_chronic_indicator_values() {
        assert!(is_chronic_indicator("1"));
        assert!(is_chronic_indicator("'1'"));
        assert!(is_chronic_indicator("1.0"));
        assert!(!is_chronic_indicator("0"));
        assert!(!is_chronic_indicator("9"));
        assert!(!is_chronic_indicator("yes"));
    }
}
