//! Logging utilities for output and progress tracking

pub mod log;
pub mod progress;

pub use log::{Transfer, log_tally, log_transfer_complete, log_transfer_start, log_warning};
pub use progress::{create_main_progress_bar, finish_progress_bar};
