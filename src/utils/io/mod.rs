//! IO utilities for the JSON documents exchanged between stages

pub mod json;

pub use json::{
    read_json, read_snapshots, read_unified_document, write_json, write_snapshots,
    write_unified_document,
};
