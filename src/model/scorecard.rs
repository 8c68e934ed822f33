// src/model/scorecard.rs
// ============================================================================
// Module: Robometrics ScoreCard
// Description: A per-scenario bundle of metric results with provenance.
// Purpose: The engine's aggregate output artifact.
// Dependencies: serde, serde_json
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::model::error::ModelError;
use crate::model::hashing::canonical_json_bytes;
use crate::model::hashing::HashError;
use crate::model::identifiers::RunId;
use crate::model::identifiers::ScoreCardId;
use crate::model::metric_result::MetricResult;
use crate::model::scenario::Scenario;
use crate::model::spec_version::SPEC_VERSION;

/// A per-scenario bundle of metric results with provenance.
///
/// # Invariants
/// - `spec_version` equals [`SPEC_VERSION`]; cards carrying any other
///   version are rejected by [`ScoreCard::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Must equal [`SPEC_VERSION`].
    pub spec_version: String,
    /// Identifier for this scorecard.
    pub scorecard_id: ScoreCardId,
    /// Run this scorecard was produced from.
    pub run_id: RunId,
    /// Scenario the metrics below were evaluated over.
    pub scenario: Scenario,
    /// Arbitrary nested provenance, preserved structurally.
    #[serde(default)]
    pub provenance: BTreeMap<String, Value>,
    /// Metric name to result.
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricResult>,
    /// Caller-supplied creation timestamp, opaque to this crate.
    #[serde(default)]
    pub created_at: String,
}

impl ScoreCard {
    /// Constructs a scorecard, stamping `spec_version` to [`SPEC_VERSION`].
    #[must_use]
    pub fn new(
        scorecard_id: impl Into<ScoreCardId>,
        run_id: impl Into<RunId>,
        scenario: Scenario,
        provenance: BTreeMap<String, Value>,
        metrics: BTreeMap<String, MetricResult>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            scorecard_id: scorecard_id.into(),
            run_id: run_id.into(),
            scenario,
            provenance,
            metrics,
            created_at: created_at.into(),
        }
    }

    /// Deserializes a scorecard from JSON bytes, rejecting any
    /// `spec_version` other than [`SPEC_VERSION`].
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let card: Self = serde_json::from_slice(bytes).map_err(|err| ModelError::Malformed(err.to_string()))?;
        if card.spec_version != SPEC_VERSION {
            return Err(ModelError::UnsupportedSpecVersion {
                got: card.spec_version,
                expected: SPEC_VERSION,
            });
        }
        Ok(card)
    }

    /// Serializes this scorecard to canonical JSON bytes.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, HashError> {
        canonical_json_bytes(self)
    }
}
