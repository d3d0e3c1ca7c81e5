//! Log lines for file transfers, warnings and per-stage tallies

use std::path::Path;
use std::time::Duration;

/// Direction of a file transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Records read from a file
    Read,
    /// Records written to a file
    Write,
}

impl Transfer {
    const fn ongoing(self) -> &'static str {
        match self {
            Self::Read => "Reading",
            Self::Write => "Writing",
        }
    }

    const fn done(self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Wrote",
        }
    }

    const fn preposition(self) -> &'static str {
        match self {
            Self::Read => "from",
            Self::Write => "to",
        }
    }
}

/// Line announcing a transfer of `subject`
#[must_use]
pub fn transfer_started(transfer: Transfer, subject: &str, path: &Path) -> String {
    format!(
        "{} {subject} {} {}",
        transfer.ongoing(),
        transfer.preposition(),
        path.display()
    )
}

/// Line reporting a finished transfer of `records` records
#[must_use]
pub fn transfer_finished(
    transfer: Transfer,
    path: &Path,
    records: usize,
    elapsed: Duration,
) -> String {
    format!(
        "{} {records} records {} {} in {elapsed:?}",
        transfer.done(),
        transfer.preposition(),
        path.display()
    )
}

pub fn log_transfer_start(transfer: Transfer, subject: &str, path: &Path) {
    log::info!("{}", transfer_started(transfer, subject, path));
}

pub fn log_transfer_complete(transfer: Transfer, path: &Path, records: usize, elapsed: Duration) {
    log::info!("{}", transfer_finished(transfer, path, records, elapsed));
}

/// Warn about a recoverable problem, naming the file when there is one
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message} ({})", path.display()),
        None => log::warn!("{message}"),
    }
}

/// Log a labelled tally line, used for the per-stage drop counts
pub fn log_tally(stage: &str, label: &str, count: usize) {
    log::info!("[{stage}] {label}: {count}");
}
