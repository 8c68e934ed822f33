// src/model/mod.rs
// ============================================================================
// Module: Robometrics Data Model
// Description: Invariant-checked value types and deterministic serialization.
// Purpose: The shared vocabulary every other module in this crate builds on.
// Dependencies: serde, serde_json, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Invariant-checked value types for runs, streams, events, scenarios,
//! scenario sets, scorecards, and schema reports, plus deterministic
//! canonical-JSON serialization. Every other module builds on these types.

mod error;
mod event;
mod hashing;
mod identifiers;
mod metric_result;
mod run;
mod scenario;
mod scenario_set;
mod schema_report;
mod scorecard;
mod spec_version;
mod stream;
mod value;

pub use error::ModelError;
pub use event::Event;
pub use hashing::canonical_json_bytes;
pub use hashing::hash_bytes;
pub use hashing::hash_canonical_json;
pub use hashing::hex_encode;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use identifiers::MetricName;
pub use identifiers::RuleId;
pub use identifiers::RunId;
pub use identifiers::ScenarioId;
pub use identifiers::ScenarioSetId;
pub use identifiers::ScoreCardId;
pub use metric_result::Direction;
pub use metric_result::MetricResult;
pub use metric_result::MetricValue;
pub use run::Run;
pub use scenario::Scenario;
pub use scenario_set::ScenarioSet;
pub use schema_report::SchemaReport;
pub use scorecard::ScoreCard;
pub use spec_version::SPEC_VERSION;
pub use stream::SliceInclusive;
pub use stream::Stream;
pub use value::CellValue;
