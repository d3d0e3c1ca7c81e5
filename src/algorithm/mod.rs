//! Algorithms of the unification pipeline
//!
//! Condition classification lives in [`health`], person aggregation and the
//! validity filter in [`unify`], and snapshot replay in [`snapshot`].

pub mod health;
pub mod sampling;
pub mod snapshot;
pub mod unify;
