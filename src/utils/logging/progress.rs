//! Progress reporting utilities for long-running passes
//!
//! Thin wrappers over indicatif so every pass draws the same bar. Bars are
//! hidden when progress output is disabled, which keeps test output clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Default style for a pass over source rows
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a progress bar for a pass over `length` items
///
/// # Arguments
/// * `length` - Total number of items in the pass
/// * `description` - Message shown beside the bar
/// * `visible` - Whether the bar is drawn at all
#[must_use]
pub fn create_main_progress_bar(length: u64, description: &str, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new(length);
    if !visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
        return pb;
    }

    let style = ProgressStyle::default_bar()
        .template(DEFAULT_MAIN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(description.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(message.to_string());
}
