use std::fs::File;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use meps_unify::error::Error;
use meps_unify::reader::{count_rows, read_table};
use meps_unify::registry::{InsuranceSource, SourceLoader};
use parquet::arrow::ArrowWriter;

fn write_insurance_parquet(path: &std::path::Path) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("person_unique_id", DataType::Utf8, false),
        Field::new("round_number", DataType::Int64, true),
        Field::new("out_of_pocket_premium_edited", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["10001", "10001", "10002"])),
            Arc::new(Int64Array::from(vec![Some(1), Some(2), None])),
            Arc::new(Float64Array::from(vec![Some(250.5), Some(0.0), Some(-9.0)])),
        ],
    )
    .expect("build batch");

    let file = File::create(path).expect("create parquet file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close writer");
}

/// Parquet sources with typed columns decode like text sources
#[test]
fn test_parquet_source_is_decoded() -> meps_unify::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prpl.parquet");
    write_insurance_parquet(&path);

    let batches = read_table(&path, 1024, "insurance")?;
    assert_eq!(count_rows(&batches), 3);
    assert!(
        batches[0]
            .schema()
            .fields()
            .iter()
            .all(|f| f.data_type() == &DataType::Utf8)
    );

    let rows = InsuranceSource.load(&path, 1024)?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].round, Some(1));
    assert_eq!(rows[0].edited_premium, Some(250.5));
    assert_eq!(rows[1].edited_premium, Some(0.0));
    assert_eq!(rows[2].round, None);
    assert_eq!(rows[2].edited_premium, None);
    Ok(())
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prpl.xlsx");
    std::fs::write(&path, "not a table").expect("write");
    let err = read_table(&path, 1024, "insurance").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)), "{err}");
}

#[test]
fn test_missing_optional_columns_read_as_null() -> meps_unify::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prpl.csv");
    std::fs::write(&path, "person_unique_id,round_number\n10001,2\n")?;

    let rows = InsuranceSource.load(&path, 1024)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].round, Some(2));
    assert_eq!(rows[0].coverage, None);
    assert_eq!(rows[0].edited_premium, None);
    Ok(())
}
