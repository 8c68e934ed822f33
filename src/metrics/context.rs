// src/metrics/context.rs
// ============================================================================
// Module: Robometrics Metric Context
// Description: The per-invocation input a metric function receives.
// Purpose: Bundle the scenario-scoped streams/events/config a metric reads.
// Dependencies: serde_json, thiserror
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::model::Event;
use crate::model::MetricName;
use crate::model::Run;
use crate::model::Scenario;
use crate::model::Stream;

/// Errors a metric function may raise during evaluation.
///
/// Most edge cases a metric can anticipate (missing samples, non-positive
/// duration) are expressed as `Ok(MetricResult::invalid(..))`, not `Err`:
/// this variant exists for the genuinely exceptional case a metric author
/// did not expect, and the engine isolates it exactly like any other
/// invalid result (see [`crate::metrics::run_metric`]).
#[derive(Debug, Error)]
pub enum MetricError {
    /// A metric function failed in a way it chose to report rather than
    /// return as an invalid result.
    #[error("{0}")]
    Failed(String),
}

/// The scenario-scoped view a metric function computes over.
///
/// `streams` are already sliced to `[scenario.t0, scenario.t1)`; `events`
/// are already filtered to the same half-open window.
pub struct MetricContext<'a> {
    /// The run the scenario was mined from.
    pub run: &'a Run,
    /// The scenario being evaluated.
    pub scenario: &'a Scenario,
    /// Required and optional streams, each already sliced to the scenario window.
    pub streams: BTreeMap<String, Stream>,
    /// Events falling within the scenario window.
    pub events: Vec<&'a Event>,
    /// Opaque per-metric configuration, empty if the caller passed none.
    pub config: BTreeMap<String, Value>,
}

/// A metric implementation. Mirrors `requires`/`optional` declarations the
/// engine uses to resolve inputs before invocation.
pub type MetricFn = fn(&MetricContext) -> Result<crate::model::MetricResult, MetricError>;

/// Declarative registration record for one metric.
#[derive(Clone)]
pub struct MetricSpec {
    /// Registry key, e.g. `"eff.path_efficiency"`.
    pub name: MetricName,
    /// Streams that must be present or the engine short-circuits to invalid.
    pub requires_streams: Vec<String>,
    /// Streams included in the context only if present.
    pub optional_streams: Vec<String>,
    /// Event names that must appear at least once in the scenario window.
    pub requires_events: Vec<String>,
    /// Event names with no presence requirement, documented for callers.
    pub optional_events: Vec<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// The function invoked once inputs are resolved.
    pub func: MetricFn,
}
