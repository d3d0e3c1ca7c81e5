//! Static per-person attributes taken from the demographic source

use serde::{Deserialize, Serialize};

use crate::models::types::CellValue;

/// Demographic fields of a person
///
/// Every field is optional: an unmapped or missing source value is `null` in
/// the emitted documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    /// Age at last birthday
    #[serde(rename = "edad", default)]
    pub age: Option<CellValue>,
    /// Sex label
    #[serde(rename = "sexo", default)]
    pub sex: Option<CellValue>,
    /// Race and ethnicity label
    #[serde(rename = "raza_etnicidad", default)]
    pub race_ethnicity: Option<CellValue>,
    /// Marital status at the end of the survey year
    #[serde(rename = "estado_civil", default)]
    pub marital_status: Option<CellValue>,
    /// Census region
    #[serde(rename = "region", default)]
    pub region: Option<CellValue>,
    /// Total healthcare expenditure for the year
    #[serde(rename = "gastos_medicos_totales", default)]
    pub total_expenditure: Option<CellValue>,
    /// Total out-of-pocket expenditure for the year
    #[serde(rename = "gastos_out_of_pocket", default)]
    pub out_of_pocket_expenditure: Option<CellValue>,
    /// Family income as a poverty-line category
    #[serde(rename = "categoria_pobreza", default)]
    pub poverty_category: Option<CellValue>,
    /// Full-year insurance coverage category
    #[serde(rename = "cobertura_seguro", default)]
    pub insurance_coverage: Option<CellValue>,
    /// Self-reported health status
    #[serde(rename = "estado_salud_percibido", default)]
    pub perceived_health: Option<CellValue>,
    /// Survey person weight
    #[serde(rename = "peso_persona", default)]
    pub person_weight: Option<CellValue>,
}
