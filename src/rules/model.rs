// src/rules/model.rs
// ============================================================================
// Module: Robometrics Ruleset Model
// Description: Typed representation of scenario-mining rules.
// Purpose: Give an external rule-file loader (e.g. YAML) a serde target, and
//          give the miner a validated, typed rule to execute.
// Dependencies: serde, serde_json
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::model::RuleId;

/// Comparison operator for a [`ThresholdSpec`].
///
/// Kept off the wire as a typed enum (see [`ThresholdSpec::op`]) so that an
/// unrecognized operator string surfaces through [`crate::rules::validate`]
/// with the uniform `"Rule '<id>': "` prefix, rather than as a raw serde
/// deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Op {
    /// Parses an operator string, returning `None` if it is not one of
    /// `lt`/`le`/`gt`/`ge`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            _ => None,
        }
    }

    /// Applies this operator to `lhs op rhs`.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

/// Padding applied around a trigger to form a scenario window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Seconds to extend before the trigger. Must be `>= 0`.
    pub pre_s: f64,
    /// Seconds to extend after the trigger. Must be `>= 0`.
    pub post_s: f64,
}

/// An event-triggered rule: match on event name and attribute equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Event name to match exactly.
    pub name: String,
    /// Attribute key/value pairs that must all be present and equal on a
    /// candidate event. Missing keys do not match.
    #[serde(default)]
    pub r#where: BTreeMap<String, Value>,
}

/// A threshold-triggered rule: mask a resolved signal against a comparator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    /// Name of the stream to read `signal` from.
    pub stream: String,
    /// Column name, or `"linear_speed"` (derived from `vx`/`vy`).
    pub signal: String,
    /// Comparator, one of `"lt"`/`"le"`/`"gt"`/`"ge"` (validated, see [`Op`]).
    pub op: String,
    /// Threshold value compared against the resolved signal.
    pub value: f64,
    /// Minimum segment duration to survive; segments shorter than this are
    /// dropped. Must be `>= 0`.
    #[serde(default)]
    pub for_s: f64,
    /// Segments separated by a gap no larger than this are merged. Ignored
    /// if absent or non-positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_gap_s: Option<f64>,
    /// Minimum spacing enforced between emitted segments. Ignored if absent
    /// or non-positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_s: Option<f64>,
}

impl ThresholdSpec {
    /// Parses [`Self::op`] into a typed [`Op`], returning `None` if it is
    /// not `lt`/`le`/`gt`/`ge`.
    #[must_use]
    pub fn op(&self) -> Option<Op> {
        Op::parse(&self.op)
    }
}

/// One declarative scenario-mining rule.
///
/// Exactly one of `event`/`threshold` must be present; this is enforced by
/// [`crate::rules::validate::validate_ruleset`], not at the type level,
/// because the wire shape (an external rule-file loader's YAML document)
/// represents both as optional top-level keys rather than a tagged variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Unique, non-empty rule identifier.
    pub rule_id: RuleId,
    /// Human-readable intent carried onto every scenario this rule emits.
    pub intent: String,
    /// Tags merged onto every scenario this rule emits (plus `rule_id`).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Window padding applied around each trigger.
    pub window: WindowSpec,
    /// Present iff this is an event-triggered rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSpec>,
    /// Present iff this is a threshold-triggered rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ThresholdSpec>,
}

/// A versioned collection of mining rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Ruleset format version, opaque to this crate.
    pub version: String,
    /// Rules in file order.
    #[serde(default)]
    pub scenarios: Vec<RuleSpec>,
}
