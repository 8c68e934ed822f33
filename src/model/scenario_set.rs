// src/model/scenario_set.rs
// ============================================================================
// Module: Robometrics ScenarioSet
// Description: A canonically ordered collection of scenarios derived from a run.
// Purpose: The miner's output artifact.
// Dependencies: serde, serde_json
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::model::error::ModelError;
use crate::model::hashing::canonical_json_bytes;
use crate::model::hashing::HashError;
use crate::model::identifiers::ScenarioSetId;
use crate::model::scenario::Scenario;
use crate::model::spec_version::SPEC_VERSION;

/// A canonically ordered collection of scenarios mined from one or more runs.
///
/// # Invariants
/// - `spec_version` equals [`SPEC_VERSION`]; sets carrying any other version
///   are rejected by [`ScenarioSet::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    /// Must equal [`SPEC_VERSION`].
    pub spec_version: String,
    /// Identifier for this scenario set.
    pub scenario_set_id: ScenarioSetId,
    /// Caller-supplied creation timestamp, opaque to this crate.
    pub created_at: String,
    /// Run descriptors keyed by run id, sorted lexicographically on output.
    #[serde(default)]
    pub runs: BTreeMap<String, BTreeMap<String, Value>>,
    /// Scenarios in final, deterministic order (see [`crate::mining::mine_scenarios`]).
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    /// Constructs a scenario set, rejecting any `spec_version` other than
    /// [`SPEC_VERSION`].
    pub fn new(
        scenario_set_id: impl Into<ScenarioSetId>,
        created_at: impl Into<String>,
        runs: BTreeMap<String, BTreeMap<String, Value>>,
        scenarios: Vec<Scenario>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            spec_version: SPEC_VERSION.to_string(),
            scenario_set_id: scenario_set_id.into(),
            created_at: created_at.into(),
            runs,
            scenarios,
        })
    }

    /// Deserializes a scenario set from JSON bytes, rejecting any
    /// `spec_version` other than [`SPEC_VERSION`].
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let set: Self = serde_json::from_slice(bytes).map_err(|err| ModelError::Malformed(err.to_string()))?;
        if set.spec_version != SPEC_VERSION {
            return Err(ModelError::UnsupportedSpecVersion {
                got: set.spec_version,
                expected: SPEC_VERSION,
            });
        }
        Ok(set)
    }

    /// Serializes this scenario set to canonical JSON bytes: keys sorted at
    /// every nesting level, array order preserved. Mining the same
    /// `(Run, Ruleset, id, timestamp)` twice yields byte-identical output.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, HashError> {
        canonical_json_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_spec_version() {
        let bytes = br#"{"spec_version":"9.9.9","scenario_set_id":"s","created_at":"t","runs":{},"scenarios":[]}"#;
        let err = ScenarioSet::from_json(bytes).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedSpecVersion { .. }));
    }

    #[test]
    fn accepts_current_spec_version() {
        let set = ScenarioSet::new("set1", "2026-01-01T00:00:00Z", BTreeMap::new(), vec![])
            .expect("construct");
        let bytes = set.to_canonical_json().expect("canonicalize");
        let back = ScenarioSet::from_json(&bytes).expect("round trip");
        assert_eq!(back, set);
    }

    #[test]
    fn canonical_json_is_deterministic() {
        let set = ScenarioSet::new("set1", "2026-01-01T00:00:00Z", BTreeMap::new(), vec![])
            .expect("construct");
        let a = set.to_canonical_json().expect("a");
        let b = set.to_canonical_json().expect("b");
        assert_eq!(a, b);
    }
}
