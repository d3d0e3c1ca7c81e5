//! Domain models for the unified survey records
//!
//! A [`Person`] owns its insurance, condition and job records. A
//! [`Snapshot`] is derived from a person for one insured round and is never
//! stored alongside it.

pub mod collections;
pub mod condition;
pub mod demographics;
pub mod insurance;
pub mod job;
pub mod person;
pub mod snapshot;
pub mod types;

pub use collections::UnifiedDocument;
pub use condition::{ConditionRecord, ConditionRejection, ConditionStatus};
pub use demographics::Demographics;
pub use insurance::InsuranceRecord;
pub use job::JobRecord;
pub use person::Person;
pub use snapshot::Snapshot;
pub use types::{CellValue, Reported, Round};
