// src/metrics/mod.rs
// ============================================================================
// Module: Robometrics Metric Evaluation Engine
// Description: Registry-backed dispatch over scenario-scoped inputs.
// Purpose: The second of the two core engines, alongside scenario mining.
// Dependencies: serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`run_metric`]/[`run_metrics`] resolve a metric's declared inputs against
//! a run, slice them to a scenario's half-open window, and invoke it under
//! a failure-isolation contract: a metric that errors becomes an invalid
//! result rather than aborting evaluation of its peers. [`global`] is the
//! process-wide registry, preloaded with the built-in pack; [`load_plugin`]
//! extends it through the [`PluginSource`] boundary.

mod builtin;
mod context;
mod engine;
mod plugin;
mod registry;

pub use context::MetricContext;
pub use context::MetricError;
pub use context::MetricFn;
pub use context::MetricSpec;
pub use engine::run_metric;
pub use engine::run_metrics;
pub use plugin::load_plugin;
pub use plugin::PluginError;
pub use plugin::PluginSource;
pub use registry::global;
pub use registry::MetricRegistry;
pub use registry::RegistryError;
