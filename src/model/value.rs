// src/model/value.rs
// ============================================================================
// Module: Robometrics Stream Cell Values
// Description: Heterogeneous scalar values stored in stream columns.
// Purpose: Let a single column hold floats, integers, booleans, strings, or nulls.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

/// A single stream-column cell.
///
/// # Invariants
/// - Serializes as a plain JSON scalar; the variant is recovered on
///   deserialization by trying each arm in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl CellValue {
    /// Returns this cell as `f64` when it is numeric or boolean, `None` otherwise.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Self::Null | Self::Str(_) => None,
        }
    }

    /// Returns this cell as a string slice when it holds a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_f64_covers_numeric_and_bool() {
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Bool(true).as_f64(), Some(1.0));
        assert_eq!(CellValue::Null.as_f64(), None);
        assert_eq!(CellValue::Str("x".into()).as_f64(), None);
    }

    #[test]
    fn round_trips_through_json() {
        let values = vec![
            CellValue::Null,
            CellValue::Bool(false),
            CellValue::Int(-7),
            CellValue::Float(2.25),
            CellValue::Str("hi".into()),
        ];
        for value in values {
            let json = serde_json::to_string(&value).expect("serialize");
            let back: CellValue = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, value);
        }
    }
}
