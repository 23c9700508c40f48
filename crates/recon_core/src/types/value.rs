//! Typed field values.
//!
//! Confirmation and booking data carries a closed set of value kinds:
//! dates, directions, free text, numbers and flags. `FieldValue` is the
//! tagged union used when moving values between resolver, extractor and
//! validator; on the wire it serialises untagged to match the loose JSON
//! shape the UI consumes.

use std::fmt;
use std::str::FromStr;

use super::date::Date;

/// The kind of value a canonical field carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// ISO 8601 date
    Date,
    /// Long or short
    Direction,
    /// Free text
    Text,
    /// Floating point number
    Number,
    /// Boolean flag
    Flag,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Date => "date",
            ValueKind::Direction => "direction",
            ValueKind::Text => "text",
            ValueKind::Number => "number",
            ValueKind::Flag => "flag",
        };
        write!(f, "{}", s)
    }
}

/// Trade direction.
///
/// # Examples
///
/// ```
/// use recon_core::types::Direction;
///
/// let d: Direction = "Long".parse().unwrap();
/// assert_eq!(d, Direction::Long);
/// assert_eq!(d.to_string(), "long");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Receiving floating
    Long,
    /// Paying floating
    Short,
}

impl Direction {
    /// Returns the lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parses `long`/`short` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed field value.
///
/// Closed variant set: a value is exactly one of the five kinds, never an
/// open map or an untyped blob. Serialises untagged, so dates appear as
/// ISO strings, directions as `"long"`/`"short"`, and the rest as their
/// JSON natives.
///
/// # Examples
///
/// ```
/// use recon_core::types::{FieldValue, ValueKind};
///
/// let spread = FieldValue::Number(0.002);
/// assert_eq!(spread.kind(), ValueKind::Number);
/// assert_eq!(serde_json::to_string(&spread).unwrap(), "0.002");
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean flag
    Flag(bool),
    /// Floating point number
    Number(f64),
    /// ISO 8601 date
    Date(Date),
    /// Trade direction
    Direction(Direction),
    /// Free text
    Text(String),
}

impl FieldValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Flag(_) => ValueKind::Flag,
            FieldValue::Number(_) => ValueKind::Number,
            FieldValue::Date(_) => ValueKind::Date,
            FieldValue::Direction(_) => ValueKind::Direction,
            FieldValue::Text(_) => ValueKind::Text,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Direction(d) => write!(f, "{}", d),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}
