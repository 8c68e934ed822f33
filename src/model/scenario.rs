// src/model/scenario.rs
// ============================================================================
// Module: Robometrics Scenario
// Description: A half-open time interval of a run with an intent and tags.
// Purpose: The unit the metric engine evaluates metrics over.
// Dependencies: serde
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::error::ModelError;
use crate::model::identifiers::RunId;
use crate::model::identifiers::ScenarioId;

/// A half-open time interval `[t0, t1)` of a run, with an intent and tags.
///
/// # Invariants
/// - `t1 > t0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Run this scenario was mined from.
    pub run_id: RunId,
    /// Window start time (inclusive).
    pub t0: f64,
    /// Window end time (exclusive).
    pub t1: f64,
    /// Human-readable intent, e.g. `"fallback"`.
    pub intent: String,
    /// Key to string tags. Mining always adds `rule_id`.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Optional evaluation-profile hint for downstream callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_profile: Option<String>,
}

impl Scenario {
    /// Constructs a scenario, checking that `t1 > t0`.
    pub fn new(
        scenario_id: impl Into<ScenarioId>,
        run_id: impl Into<RunId>,
        t0: f64,
        t1: f64,
        intent: impl Into<String>,
        tags: BTreeMap<String, String>,
        eval_profile: Option<String>,
    ) -> Result<Self, ModelError> {
        if t1 <= t0 {
            return Err(ModelError::InvalidScenarioBounds { t0, t1 });
        }
        Ok(Self {
            scenario_id: scenario_id.into(),
            run_id: run_id.into(),
            t0,
            t1,
            intent: intent.into(),
            tags,
            eval_profile,
        })
    }

    /// Scenario duration, `t1 - t0`.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_duration() {
        let err = Scenario::new("s:1", "r1", 1.0, 1.0, "x", BTreeMap::new(), None).unwrap_err();
        assert_eq!(err, ModelError::InvalidScenarioBounds { t0: 1.0, t1: 1.0 });

        let err = Scenario::new("s:1", "r1", 2.0, 1.0, "x", BTreeMap::new(), None).unwrap_err();
        assert_eq!(err, ModelError::InvalidScenarioBounds { t0: 2.0, t1: 1.0 });
    }

    #[test]
    fn accepts_positive_duration() {
        let scenario = Scenario::new("s:1", "r1", 1.0, 3.0, "x", BTreeMap::new(), None).expect("ok");
        assert_eq!(scenario.duration(), 2.0);
    }
}
