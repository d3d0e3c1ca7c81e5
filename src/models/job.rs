//! Employment records

use serde::{Deserialize, Serialize};

use crate::models::types::{Reported, Round};

/// One job held by a person, as reported in a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Whether the employer offers health insurance
    #[serde(rename = "seguro_ofrecido")]
    pub insurance_offered: Reported,
    /// Whether the job is temporary
    #[serde(rename = "trabajo_temporal")]
    pub temporary: Reported,
    /// Whether the person is salaried
    #[serde(rename = "empleado_asalariado")]
    pub salaried: Reported,
    /// Hourly wage
    #[serde(rename = "salario_por_hora")]
    pub hourly_wage: Reported,
    /// Hours worked per week
    #[serde(rename = "horas_por_semana")]
    pub hours_per_week: Reported,
    /// Round the job was reported in; `None` when the source value was unusable
    #[serde(rename = "round_reportado", default)]
    pub round: Option<Round>,
}

impl JobRecord {
    /// Whether the job was reported in or before `round`
    ///
    /// Jobs without a usable round never match.
    #[must_use]
    pub fn reported_by(&self, round: Round) -> bool {
        self.round.is_some_and(|r| r <= round)
    }
}
