// src/lib.rs
// ============================================================================
// Module: Robometrics Core Library
// Description: Public API surface for the Robometrics core.
// Purpose: Expose the data model, ruleset types, scenario miner, and metric engine.
// Dependencies: crate::{metrics, mining, model, rules}
// ============================================================================

//! ## Overview
//! Robometrics core evaluates recorded robot runs offline. A [`mining`]
//! engine extracts deterministic, canonically-ordered scenarios from a
//! [`model::Run`] under a [`rules::Ruleset`]; a [`metrics`] engine evaluates
//! registered metric functions over each scenario's sliced inputs under a
//! strict failure-isolation contract. It is backend-agnostic: log-format
//! adapters, persistence, rule loaders, and CLI frontends are external
//! collaborators built on top of this crate, not part of it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod metrics;
pub mod mining;
pub mod model;
pub mod rules;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use metrics::global as metric_registry;
pub use metrics::load_plugin;
pub use metrics::run_metric;
pub use metrics::run_metrics;
pub use metrics::MetricContext;
pub use metrics::MetricError;
pub use metrics::MetricFn;
pub use metrics::MetricRegistry;
pub use metrics::MetricSpec;
pub use metrics::PluginError;
pub use metrics::PluginSource;
pub use metrics::RegistryError;

pub use mining::mine_scenarios;

pub use model::CellValue;
pub use model::Direction;
pub use model::Event;
pub use model::MetricName;
pub use model::MetricResult;
pub use model::MetricValue;
pub use model::ModelError;
pub use model::Run;
pub use model::RuleId;
pub use model::RunId;
pub use model::Scenario;
pub use model::ScenarioId;
pub use model::ScenarioSet;
pub use model::ScenarioSetId;
pub use model::SchemaReport;
pub use model::ScoreCard;
pub use model::ScoreCardId;
pub use model::SliceInclusive;
pub use model::Stream;
pub use model::SPEC_VERSION;

pub use rules::validate_ruleset;
pub use rules::EventSpec;
pub use rules::Op;
pub use rules::RuleError;
pub use rules::RuleSpec;
pub use rules::Ruleset;
pub use rules::ThresholdSpec;
pub use rules::WindowSpec;
