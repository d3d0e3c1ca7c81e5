//! Shared utilities for IO and logging

pub mod io;
pub mod logging;
