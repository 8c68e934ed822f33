// src/model/spec_version.rs
// ============================================================================
// Module: Robometrics Spec Version
// Description: The single supported artifact spec version.
// Purpose: Give ScenarioSet/ScoreCard a shared version gate.
// Dependencies: none
// ============================================================================

/// The only `spec_version` this crate accepts on `ScenarioSet`/`ScoreCard`
/// artifacts. Artifacts carrying any other value are rejected at
/// deserialization (see [`crate::model::ScenarioSet::from_json`]).
pub const SPEC_VERSION: &str = "0.1.0";
