//! Medical condition records and their lifecycle classification

use serde::{Deserialize, Serialize};

use crate::models::types::{CellValue, Round};

/// One medical condition of a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Condition category description, `None` when no label could be resolved
    #[serde(rename = "descripcion_ccsr", default)]
    pub description: Option<String>,
    /// Age of the person when the condition was diagnosed
    #[serde(rename = "edad_diagnostico", default)]
    pub age_at_diagnosis: Option<CellValue>,
    /// Whether the condition is an injury
    #[serde(rename = "es_lesion", default)]
    pub injury: Option<CellValue>,
    /// Round the condition was reported in
    #[serde(rename = "round_reportado")]
    pub round: Round,
    /// Raw ICD-10-CM code of the source row; never written out
    #[serde(skip)]
    pub diagnosis_code: Option<String>,
}

impl ConditionRecord {
    /// Copy of this condition presented at another round
    #[must_use]
    pub fn presented_at(&self, round: Round) -> Self {
        Self {
            round,
            ..self.clone()
        }
    }
}

/// Lifecycle state of a condition relative to the person's last insured round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionStatus {
    /// Chronic, or acute and diagnosed in the last insured round
    Current,
    /// Acute and diagnosed before the last insured round
    Past,
}

/// Why a condition row was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionRejection {
    /// The round column could not be read
    UnparseableRound,
    /// Reported after the last insured round
    BeyondHorizon,
    /// Acute, with no insured round to compare against
    NoHorizon,
}

impl ConditionStatus {
    /// Classify a condition reported in `round` for a person whose highest
    /// qualifying insurance round is `max_insurance_round` (0 when unknown)
    ///
    /// A known horizon drops every condition reported after it. With an
    /// unknown horizon a chronic condition is still current while an acute one
    /// cannot be placed and is rejected.
    pub fn classify(
        round: Option<Round>,
        chronic: bool,
        max_insurance_round: Round,
    ) -> Result<Self, ConditionRejection> {
        let round = round.ok_or(ConditionRejection::UnparseableRound)?;

        if max_insurance_round > 0 && round > max_insurance_round {
            return Err(ConditionRejection::BeyondHorizon);
        }
        if chronic || round == max_insurance_round {
            return Ok(Self::Current);
        }
        if round < max_insurance_round {
            return Ok(Self::Past);
        }
        Err(ConditionRejection::NoHorizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_horizon() {
        assert_eq!(ConditionStatus::classify(Some(3), false, 3), Ok(ConditionStatus::Current));
        assert_eq!(ConditionStatus::classify(Some(1), false, 3), Ok(ConditionStatus::Past));
        assert_eq!(ConditionStatus::classify(Some(1), true, 3), Ok(ConditionStatus::Current));
        assert_eq!(
            ConditionStatus::classify(Some(4), true, 3),
            Err(ConditionRejection::BeyondHorizon)
        );
        assert_eq!(
            ConditionStatus::classify(None, true, 3),
            Err(ConditionRejection::UnparseableRound)
        );
    }

    #[test]
    fn test_classify_without_horizon() {
        assert_eq!(ConditionStatus::classify(Some(2), true, 0), Ok(ConditionStatus::Current));
        assert_eq!(
            ConditionStatus::classify(Some(2), false, 0),
            Err(ConditionRejection::NoHorizon)
        );
    }

    #[test]
    fn test_diagnosis_code_is_not_serialized() {
        let condition = ConditionRecord {
            description: Some("Essential hypertension".into()),
            age_at_diagnosis: Some(CellValue::Integer(51)),
            injury: Some(CellValue::Text("No".into())),
            round: 2,
            diagnosis_code: Some("I10".into()),
        };
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "descripcion_ccsr": "Essential hypertension",
                "edad_diagnostico": 51,
                "es_lesion": "No",
                "round_reportado": 2
            })
        );
    }
}
