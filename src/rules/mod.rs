// src/rules/mod.rs
// ============================================================================
// Module: Robometrics Ruleset
// Description: Typed representation of mining rules with validation.
// Purpose: The miner's second input, alongside a Run.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Ruleset`] is a validated collection of event- and threshold-triggered
//! mining rules. Deserialization from YAML/JSON is an external collaborator's
//! concern; this module only defines the typed shape and its validation.

mod model;
mod validate;

pub use model::EventSpec;
pub use model::Op;
pub use model::RuleSpec;
pub use model::Ruleset;
pub use model::ThresholdSpec;
pub use model::WindowSpec;
pub use validate::validate_ruleset;
pub use validate::RuleError;
