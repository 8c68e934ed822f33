// src/model/run.rs
// ============================================================================
// Module: Robometrics Run
// Description: A single recording: metadata, time-aligned streams, events.
// Purpose: The root input value the miner and engine both consume.
// Dependencies: serde, serde_json
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::model::event::Event;
use crate::model::identifiers::RunId;
use crate::model::stream::Stream;

/// A single recording: metadata, time-aligned streams, point-in-time events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Run identifier.
    pub run_id: RunId,
    /// Arbitrary nested metadata, preserved structurally. `serde_json::Map`
    /// is BTreeMap-backed by default, so keys already sort at every nesting
    /// level on serialization without a hand-rolled sort pass.
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
    /// Streams keyed by name.
    pub streams: BTreeMap<String, Stream>,
    /// Events in no particular order.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Run {
    /// Constructs a new run.
    #[must_use]
    pub fn new(
        run_id: impl Into<RunId>,
        meta: BTreeMap<String, Value>,
        streams: BTreeMap<String, Stream>,
        events: Vec<Event>,
    ) -> Self {
        Self { run_id: run_id.into(), meta, streams, events }
    }

    /// Computes the run's time envelope as the min/max over the union of all
    /// stream `t`-sequences. Returns `None` if no stream has any sample.
    ///
    /// Events outside this envelope are not represented here at all: the
    /// miner clamps windows to it and silently drops windows that collapse
    /// to empty, even if the triggering event itself sits outside the
    /// envelope. This mirrors the original implementation and is a known,
    /// intentional limitation rather than a bug.
    #[must_use]
    pub fn time_envelope(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for stream in self.streams.values() {
            for &t in &stream.t {
                bounds = Some(match bounds {
                    None => (t, t),
                    Some((lo, hi)) => (lo.min(t), hi.max(t)),
                });
            }
        }
        bounds
    }

    /// Returns events whose time falls within the half-open window
    /// `[t0, t1)`.
    #[must_use]
    pub fn events_in_window(&self, t0: f64, t1: f64) -> Vec<&Event> {
        self.events.iter().filter(|event| event.t >= t0 && event.t < t1).collect()
    }
}
