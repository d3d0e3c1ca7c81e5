//! Reading and writing the unified document and the snapshot sequence
//!
//! Both documents are written with a trailing newline. Writing the same value
//! twice produces the same bytes.

use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::error::util::{safe_create_file, safe_open_file};
use crate::models::{Snapshot, UnifiedDocument};
use crate::utils::logging::{Transfer, log_transfer_complete, log_transfer_start};

/// Serialize a value to a JSON file, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(safe_create_file(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path, purpose: &str) -> Result<T> {
    let reader = BufReader::new(safe_open_file(path, purpose)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write the unified person document
pub fn write_unified_document(path: &Path, document: &UnifiedDocument, pretty: bool) -> Result<()> {
    let start = Instant::now();
    log_transfer_start(Transfer::Write, "unified document", path);
    write_json(path, document, pretty)?;
    log_transfer_complete(Transfer::Write, path, document.len(), start.elapsed());
    Ok(())
}

/// Read a unified person document written by [`write_unified_document`]
pub fn read_unified_document(path: &Path) -> Result<UnifiedDocument> {
    let start = Instant::now();
    log_transfer_start(Transfer::Read, "unified document", path);
    let document: UnifiedDocument = read_json(path, "unified document")?;
    log_transfer_complete(Transfer::Read, path, document.len(), start.elapsed());
    Ok(document)
}

/// Write the snapshot sequence
pub fn write_snapshots(path: &Path, snapshots: &[Snapshot], pretty: bool) -> Result<()> {
    let start = Instant::now();
    log_transfer_start(Transfer::Write, "snapshots", path);
    write_json(path, snapshots, pretty)?;
    log_transfer_complete(Transfer::Write, path, snapshots.len(), start.elapsed());
    Ok(())
}

/// Read a snapshot sequence
pub fn read_snapshots(path: &Path) -> Result<Vec<Snapshot>> {
    read_json(path, "snapshot sequence")
}
