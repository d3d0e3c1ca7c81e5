//! Common value types shared by the per-person records
//!
//! Source tables arrive as text. Every cell is typed once, here, when a row is
//! decoded: blanks and pandas-style null tokens become `None`, job sentinels
//! become [`Reported::NotReported`], rounds become [`Round`] or nothing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Survey round (interview wave) number, starting at 1
pub type Round = u32;

/// Marker written for job fields that carry no information
pub const NOT_REPORTED: &str = "Not Reported";

/// Negative codes the survey reserves for missing data
pub const RESERVED_CODES: [i64; 8] = [-1, -2, -7, -8, -9, -10, -13, -15];

/// Label of the reserved "inapplicable" code
pub const INAPPLICABLE: &str = "Inapplicable";

/// Whether a raw cell is empty or one of the null spellings tabular tools emit
#[must_use]
pub fn is_null_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
}

/// A single decoded cell: integral numbers stay integral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Whole number, including whole-valued decimals such as `34.0`
    Integer(i64),
    /// Number with a fractional part
    Decimal(f64),
    /// Anything that is not a number, typically a category label
    Text(String),
}

impl CellValue {
    /// Decode a raw cell, returning `None` for blanks and null tokens
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if is_null_token(raw) {
            return None;
        }
        let trimmed = raw.trim();

        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(Self::Integer(value));
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                if value.fract() == 0.0 && value.abs() < 9.0e15 {
                    Some(Self::Integer(value as i64))
                } else {
                    Some(Self::Decimal(value))
                }
            }
            _ => Some(Self::Text(trimmed.to_string())),
        }
    }

    /// Decode an optional raw cell
    #[must_use]
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    /// Numeric view of the cell
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Decimal(v) => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Text view of the cell, if it is a label
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A job field that is either informative or explicitly not reported
#[derive(Debug, Clone, PartialEq)]
pub enum Reported {
    /// Informative value
    Value(CellValue),
    /// Refused, don't know, not ascertained, inapplicable, blank or null
    NotReported,
}

impl Reported {
    /// Decode a raw job cell, folding every non-informative spelling into
    /// [`Reported::NotReported`]
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if !is_sentinel(value) => {
                CellValue::parse(value).map_or(Self::NotReported, Self::Value)
            }
            _ => Self::NotReported,
        }
    }

    /// Whether the field carries a value
    #[must_use]
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// The value, if reported
    #[must_use]
    pub fn value(&self) -> Option<&CellValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotReported => None,
        }
    }
}

impl Serialize for Reported {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::NotReported => serializer.serialize_str(NOT_REPORTED),
        }
    }
}

impl<'de> Deserialize<'de> for Reported {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<CellValue>::deserialize(deserializer)?;
        Ok(match value {
            Some(CellValue::Text(text)) if is_sentinel(&text) => Self::NotReported,
            Some(value) => Self::Value(value),
            None => Self::NotReported,
        })
    }
}

/// Whether a raw job value is one of the non-informative sentinels
#[must_use]
pub fn is_sentinel(raw: &str) -> bool {
    if is_null_token(raw) {
        return true;
    }
    let lowered = raw.trim().to_lowercase().replace('\u{2019}', "'");
    matches!(
        lowered.as_str(),
        "refused" | "don't know" | "dont know" | "not ascertained" | "inapplicable" | "not reported"
    )
}

/// Parse a round number; anything but an integral value of at least 1 is `None`
#[must_use]
pub fn parse_round(raw: &str) -> Option<Round> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return (value >= 1).then_some(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && (1.0..=f64::from(u32::MAX)).contains(&value) =>
        {
            Some(value as Round)
        }
        _ => None,
    }
}

/// Parse an optional round cell
#[must_use]
pub fn parse_round_opt(raw: Option<&str>) -> Option<Round> {
    raw.and_then(parse_round)
}

/// Parse an edited premium amount
///
/// Returns the amount when the cell holds a finite number that is not one of
/// the reserved negative codes. Labels such as `Inapplicable` and blanks give
/// `None`. Zero is returned as `Some(0.0)`; callers decide what zero means.
#[must_use]
pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if is_null_token(raw) || raw.trim().eq_ignore_ascii_case(INAPPLICABLE) {
        return None;
    }
    let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let is_reserved = value.fract() == 0.0 && RESERVED_CODES.contains(&(value as i64));
    (!is_reserved).then_some(value)
}

/// Trimmed, non-null text of an optional cell
#[must_use]
pub fn clean_text(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !is_null_token(value))
        .map(|value| value.trim().to_string())
}
