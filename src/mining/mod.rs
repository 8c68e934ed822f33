// src/mining/mod.rs
// ============================================================================
// Module: Robometrics Scenario Miner
// Description: Rule-driven extraction of scenarios from a Run.
// Purpose: Entry point consumed by the metric engine's callers.
// Dependencies: serde_json, sha2, tracing
// ============================================================================

//! ## Overview
//! [`mine_scenarios`] extracts deterministic, canonically-ordered scenarios
//! from a run under a ruleset. Event rules match on name and attributes;
//! threshold rules walk a derived boolean signal into debounce-filtered,
//! gap-merged, cooldown-filtered windows.

mod miner;
mod segment;

pub use miner::mine_scenarios;
pub use segment::apply_cooldown;
pub use segment::apply_min_duration;
pub use segment::apply_min_gap;
pub use segment::segments_from_condition;
pub use segment::Segment;
