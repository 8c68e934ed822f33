// src/model/event.rs
// ============================================================================
// Module: Robometrics Event
// Description: A point-in-time named record with attributes.
// Purpose: Represent sparse, discrete occurrences within a Run.
// Dependencies: serde, serde_json
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A point-in-time record.
///
/// Events carry no ordering invariant within a [`crate::model::Run`]; callers
/// must sort where needed (the miner and engine both sort or filter as they
/// consume events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event time.
    pub t: f64,
    /// Event name, e.g. `"safety.fallback"`.
    pub name: String,
    /// Arbitrary JSON-like attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, Value>,
}

impl Event {
    /// Constructs a new event.
    #[must_use]
    pub fn new(t: f64, name: impl Into<String>, attrs: BTreeMap<String, Value>) -> Self {
        Self { t, name: name.into(), attrs }
    }

    /// Returns true if `attrs` contains every `(key, value)` pair in `where_`.
    /// Missing keys do not match.
    #[must_use]
    pub fn matches_where(&self, where_: &BTreeMap<String, Value>) -> bool {
        where_.iter().all(|(key, value)| self.attrs.get(key) == Some(value))
    }
}
