// src/model/error.rs
// ============================================================================
// Module: Robometrics Model Errors
// Description: Validation errors raised while constructing model value types.
// Purpose: Give every model constructor a single, stable error type.
// Dependencies: thiserror
// ============================================================================

use thiserror::Error;

/// Errors raised when a model value type's invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// `Stream.t` was not non-decreasing.
    #[error("stream '{stream}' time vector is not non-decreasing at index {index}")]
    NonMonotonicTime {
        /// Name of the offending stream.
        stream: String,
        /// Index of the first out-of-order sample.
        index: usize,
    },
    /// A stream column's length did not match `|t|`.
    #[error("stream '{stream}' column '{column}' has length {got}, expected {expected}")]
    ColumnLengthMismatch {
        /// Name of the offending stream.
        stream: String,
        /// Name of the offending column.
        column: String,
        /// Actual column length.
        got: usize,
        /// Required column length (`|t|`).
        expected: usize,
    },
    /// `Scenario.t1 <= Scenario.t0`.
    #[error("scenario time bounds invalid: t1 ({t1}) must be greater than t0 ({t0})")]
    InvalidScenarioBounds {
        /// Start time.
        t0: f64,
        /// End time.
        t1: f64,
    },
    /// `ScenarioSet`/`ScoreCard` spec_version did not match the crate's spec version.
    #[error("unsupported spec_version '{got}', expected '{expected}'")]
    UnsupportedSpecVersion {
        /// The version found on the artifact.
        got: String,
        /// The version this crate requires.
        expected: &'static str,
    },
    /// An inclusivity argument to `Stream::slice` was not `"left"` or `"both"`.
    #[error("invalid slice inclusivity: '{0}'")]
    InvalidInclusive(String),
    /// An artifact failed to deserialize from JSON.
    #[error("malformed artifact JSON: {0}")]
    Malformed(String),
}
