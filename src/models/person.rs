//! The unified per-person record

use serde::{Deserialize, Serialize};

use crate::models::condition::ConditionRecord;
use crate::models::demographics::Demographics;
use crate::models::insurance::InsuranceRecord;
use crate::models::job::JobRecord;
use crate::models::types::Round;

/// Everything known about one respondent after the four sources are joined
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Static demographic attributes
    #[serde(flatten)]
    pub demographics: Demographics,
    /// Chronic conditions, and acute conditions from the last insured round
    #[serde(rename = "condiciones_medicas_actuales", default)]
    pub current_conditions: Vec<ConditionRecord>,
    /// Acute conditions from earlier rounds
    #[serde(rename = "condiciones_medicas_pasadas", default)]
    pub past_conditions: Vec<ConditionRecord>,
    /// Jobs reported up to the last insured round
    #[serde(rename = "historial_empleo", default)]
    pub employment_history: Vec<JobRecord>,
    /// Qualifying private insurance records
    #[serde(rename = "historial_seguros", default)]
    pub insurance_history: Vec<InsuranceRecord>,
}

impl Person {
    /// Create a person with no records yet
    #[must_use]
    pub fn new(demographics: Demographics) -> Self {
        Self {
            demographics,
            ..Self::default()
        }
    }

    /// Whether at least one insurance record has a positive edited premium
    #[must_use]
    pub fn has_positive_premium(&self) -> bool {
        self.insurance_history
            .iter()
            .any(InsuranceRecord::has_positive_premium)
    }

    /// Highest round among the insurance records, 0 when none has a round
    #[must_use]
    pub fn max_insurance_round(&self) -> Round {
        self.insurance_history
            .iter()
            .filter_map(|record| record.round)
            .max()
            .unwrap_or(0)
    }

    /// All conditions, current first
    pub fn conditions(&self) -> impl Iterator<Item = &ConditionRecord> {
        self.current_conditions.iter().chain(&self.past_conditions)
    }

    /// Number of conditions in both lists
    #[must_use]
    pub fn condition_count(&self) -> usize {
        self.current_conditions.len() + self.past_conditions.len()
    }
}
