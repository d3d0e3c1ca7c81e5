//! Utility functions for error handling
//!
//! Helpers that turn filesystem failures into [`Error`] values carrying the
//! offending path.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Open a file for reading, reporting a missing path as [`Error::NotFound`]
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened, used in the log line
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        log::error!("Missing file needed for {purpose}: {}", path.display());
        return Err(Error::NotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Expected a file for {purpose}: {}", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("Permission denied opening {}", path.display())
            }
            _ => format!("Failed to open {} for {purpose}: {e}", path.display()),
        };
        Error::Io(io::Error::new(e.kind(), message))
    })
}

/// Create a file for writing, creating missing parent directories first
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(fs::File::create(path)?)
}
