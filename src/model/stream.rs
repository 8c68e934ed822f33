// src/model/stream.rs
// ============================================================================
// Module: Robometrics Stream
// Description: A named bundle of time-aligned, heterogeneously typed columns.
// Purpose: The unit of time-series data the miner and engine slice and scan.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A `Stream` is immutable once constructed: the engine and miner only ever
//! take slices of it, never mutate it in place.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::error::ModelError;
use crate::model::value::CellValue;

/// How the boundary samples of a [`Stream::slice`] are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceInclusive {
    /// `t0 <= ti < t1`. The engine always uses this mode.
    Left,
    /// `t0 <= ti <= t1`.
    Both,
}

impl Default for SliceInclusive {
    fn default() -> Self {
        Self::Left
    }
}

impl TryFrom<&str> for SliceInclusive {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "left" => Ok(Self::Left),
            "both" => Ok(Self::Both),
            other => Err(ModelError::InvalidInclusive(other.to_owned())),
        }
    }
}

/// A named bundle of time-aligned columns sharing a common `t` vector.
///
/// # Invariants
/// - `t` is non-decreasing.
/// - Every column in `data` has length `|t|`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Stream name, e.g. `"command.twist2d"`.
    pub name: String,
    /// Non-decreasing sample times.
    pub t: Vec<f64>,
    /// Column name to per-sample values, each the same length as `t`.
    pub data: BTreeMap<String, Vec<CellValue>>,
}

impl Stream {
    /// Constructs a stream, checking monotonicity and column-length invariants.
    pub fn new(
        name: impl Into<String>,
        t: Vec<f64>,
        data: BTreeMap<String, Vec<CellValue>>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        for index in 1..t.len() {
            if t[index] < t[index - 1] {
                return Err(ModelError::NonMonotonicTime { stream: name, index });
            }
        }
        for (column, values) in &data {
            if values.len() != t.len() {
                return Err(ModelError::ColumnLengthMismatch {
                    stream: name,
                    column: column.clone(),
                    got: values.len(),
                    expected: t.len(),
                });
            }
        }
        Ok(Self { name, t, data })
    }

    /// Returns the column `name` as `f64`, if present and fully numeric.
    #[must_use]
    pub fn column_f64(&self, name: &str) -> Option<Vec<f64>> {
        self.data
            .get(name)?
            .iter()
            .map(CellValue::as_f64)
            .collect()
    }

    /// Returns a new stream containing only samples whose time falls within
    /// `[t0, t1)` (`SliceInclusive::Left`) or `[t0, t1]` (`SliceInclusive::Both`).
    /// Boundary samples are included or excluded per the rule above; there is
    /// no interpolation.
    #[must_use]
    pub fn slice(&self, t0: f64, t1: f64, inclusive: SliceInclusive) -> Self {
        let indices: Vec<usize> = self
            .t
            .iter()
            .enumerate()
            .filter(|(_, &ti)| match inclusive {
                SliceInclusive::Left => ti >= t0 && ti < t1,
                SliceInclusive::Both => ti >= t0 && ti <= t1,
            })
            .map(|(index, _)| index)
            .collect();

        let t = indices.iter().map(|&i| self.t[i]).collect();
        let data = self
            .data
            .iter()
            .map(|(column, values)| {
                let sliced = indices.iter().map(|&i| values[i].clone()).collect();
                (column.clone(), sliced)
            })
            .collect();

        // Invariants already hold by construction: indices preserve order and
        // every column is sliced by the same index set.
        Self { name: self.name.clone(), t, data }
    }
}
