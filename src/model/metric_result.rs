// src/model/metric_result.rs
// ============================================================================
// Module: Robometrics Metric Result
// Description: The value a metric function produces for one scenario.
// Purpose: Uniform shape for every metric, regardless of what it measures.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

/// Whether higher or lower values of a metric are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Higher values are better.
    Higher,
    /// Lower values are better.
    Lower,
    /// Neither direction is preferred.
    Neutral,
}

/// A metric's scalar value. Deserialization tries each arm in declaration
/// order, so `Null` is checked first and `Str` is never reached for a
/// well-formed result (the built-in pack never returns string values; the
/// variant exists only so an unexpected payload deserializes instead of
/// failing outright).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// No value (typically paired with `valid: false`).
    Null,
    /// Boolean value, e.g. `task.success`.
    Bool(bool),
    /// Integer value, e.g. an event count.
    Int(i64),
    /// Floating-point value, e.g. a ratio or a percentile.
    Float(f64),
    /// Fallback string value.
    Str(String),
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The result of evaluating one metric over one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// The metric's value, or `Null` when `valid` is `false`.
    pub value: MetricValue,
    /// Units of `value`, e.g. `"m/s^3"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Whether higher or lower values are preferred.
    pub direction: Direction,
    /// Whether `value` is meaningful.
    pub valid: bool,
    /// A short diagnostic note, typically set when `valid` is `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MetricResult {
    /// Builds an invalid result with the given diagnostic note. Used
    /// throughout the built-in pack and by the engine's failure-isolation
    /// path.
    #[must_use]
    pub fn invalid(direction: Direction, notes: impl Into<String>) -> Self {
        Self { value: MetricValue::Null, units: None, direction, valid: false, notes: Some(notes.into()) }
    }

    /// Builds a valid result.
    #[must_use]
    pub fn valid(
        value: impl Into<MetricValue>,
        units: Option<String>,
        direction: Direction,
    ) -> Self {
        Self { value: value.into(), units, direction, valid: true, notes: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_result_has_null_value() {
        let result = MetricResult::invalid(Direction::Lower, "missing required stream: pose");
        assert!(!result.valid);
        assert_eq!(result.value, MetricValue::Null);
        assert_eq!(result.notes.as_deref(), Some("missing required stream: pose"));
    }

    #[test]
    fn round_trips_through_json() {
        let result = MetricResult::valid(0.42_f64, Some("m".to_string()), Direction::Higher);
        let json = serde_json::to_string(&result).expect("serialize");
        let back: MetricResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, result);
    }
}
