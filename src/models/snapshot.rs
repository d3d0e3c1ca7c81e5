//! Point-in-time view of a person at one insured round

use serde::{Deserialize, Serialize};

use crate::models::condition::ConditionRecord;
use crate::models::demographics::Demographics;
use crate::models::insurance::InsuranceRecord;
use crate::models::job::JobRecord;
use crate::models::types::Round;

/// State of a person as of one round in which they hold qualifying insurance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Identifier of the person
    pub person_unique_id: String,
    /// Round this snapshot describes
    pub round: Round,
    /// Copy of the person's demographics
    #[serde(flatten)]
    pub demographics: Demographics,
    /// Conditions visible at this round
    #[serde(rename = "condiciones_medicas")]
    pub conditions: Vec<ConditionRecord>,
    /// Jobs reported in or before this round
    #[serde(rename = "historial_empleo")]
    pub employment_history: Vec<JobRecord>,
    /// Insurance record of this exact round
    #[serde(rename = "seguro")]
    pub insurance: InsuranceRecord,
}

impl Snapshot {
    /// Descriptions of the visible conditions, in order
    #[must_use]
    pub fn condition_descriptions(&self) -> Vec<Option<&str>> {
        self.conditions
            .iter()
            .map(|c| c.description.as_deref())
            .collect()
    }
}
