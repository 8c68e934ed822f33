// src/metrics/engine.rs
// ============================================================================
// Module: Robometrics Metric Engine
// Description: Resolves inputs, slices them to the scenario window, invokes.
// Purpose: The failure-isolation contract every metric runs under.
// Dependencies: serde_json
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::metrics::context::MetricContext;
use crate::metrics::registry::global;
use crate::model::Direction;
use crate::model::MetricResult;
use crate::model::Run;
use crate::model::Scenario;
use crate::model::SliceInclusive;

/// Evaluates `name` over `scenario` within `run`.
///
/// Resolution order: unknown metric, missing required stream, missing
/// required event, then invocation. A metric function that returns `Err`
/// is converted to an invalid result rather than propagated; this is the
/// engine's failure-isolation contract (one metric's failure never stops
/// its peers).
#[must_use]
pub fn run_metric(name: &str, run: &Run, scenario: &Scenario, config: Option<&BTreeMap<String, Value>>) -> MetricResult {
    let Some(spec) = global().lock().unwrap_or_else(std::sync::PoisonError::into_inner).get(name) else {
        return MetricResult::invalid(Direction::Neutral, format!("unknown metric: {name}"));
    };

    let mut streams = BTreeMap::new();
    for stream_name in &spec.requires_streams {
        let Some(stream) = run.streams.get(stream_name) else {
            return MetricResult::invalid(Direction::Neutral, format!("missing required stream: {stream_name}"));
        };
        streams.insert(stream_name.clone(), stream.slice(scenario.t0, scenario.t1, SliceInclusive::Left));
    }
    for stream_name in &spec.optional_streams {
        if let Some(stream) = run.streams.get(stream_name) {
            streams.insert(stream_name.clone(), stream.slice(scenario.t0, scenario.t1, SliceInclusive::Left));
        }
    }

    let events = run.events_in_window(scenario.t0, scenario.t1);
    for event_name in &spec.requires_events {
        if !events.iter().any(|event| &event.name == event_name) {
            return MetricResult::invalid(Direction::Neutral, format!("missing required event: {event_name}"));
        }
    }

    let ctx = MetricContext { run, scenario, streams, events, config: config.cloned().unwrap_or_default() };

    match (spec.func)(&ctx) {
        Ok(result) => result,
        Err(err) => MetricResult::invalid(Direction::Neutral, format!("{err}")),
    }
}

/// Runs every metric in `names` over `scenario`, looking up each metric's
/// own config by name from `config`.
#[must_use]
pub fn run_metrics(
    names: &[&str],
    run: &Run,
    scenario: &Scenario,
    config: Option<&BTreeMap<String, BTreeMap<String, Value>>>,
) -> BTreeMap<String, MetricResult> {
    names
        .iter()
        .map(|&name| {
            let per_metric = config.and_then(|outer| outer.get(name));
            (name.to_string(), run_metric(name, run, scenario, per_metric))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::context::MetricError;
    use crate::metrics::registry::MetricRegistry;

    fn minimal_run() -> Run {
        Run::new("r1", BTreeMap::new(), BTreeMap::new(), vec![])
    }

    fn minimal_scenario() -> Scenario {
        Scenario::new("s:1", "r1", 0.0, 10.0, "fallback", BTreeMap::new(), None).expect("valid scenario")
    }

    #[test]
    fn unknown_metric_is_invalid_without_panicking() {
        let result = run_metric("nonexistent.metric", &minimal_run(), &minimal_scenario(), None);
        assert!(!result.valid);
        assert_eq!(result.notes.as_deref(), Some("unknown metric: nonexistent.metric"));
    }

    #[test]
    fn missing_required_stream_is_invalid() {
        let result = run_metric("motion.jerk_p95", &minimal_run(), &minimal_scenario(), None);
        assert!(!result.valid);
        assert!(result.notes.as_deref().unwrap_or_default().contains("missing required stream"));
    }

    #[test]
    fn fallback_events_inside_window_are_counted() {
        let events = vec![
            crate::model::Event::new(1.0, "safety.fallback", BTreeMap::new()),
            crate::model::Event::new(2.0, "safety.fallback", BTreeMap::new()),
            crate::model::Event::new(3.0, "safety.fallback", BTreeMap::new()),
        ];
        let run = Run::new("r1", BTreeMap::new(), BTreeMap::new(), events);
        let result = run_metric("safety.fallback_count", &run, &minimal_scenario(), None);
        assert!(result.valid);
        assert_eq!(result.value, crate::model::MetricValue::Int(3));
    }

    #[test]
    fn erroring_metric_is_isolated_as_invalid() {
        fn always_fails(_ctx: &MetricContext) -> Result<MetricResult, MetricError> {
            Err(MetricError::Failed("boom".to_string()))
        }
        let spec = crate::metrics::context::MetricSpec {
            name: crate::model::MetricName::new("custom.always_fails"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: None,
            func: always_fails,
        };
        {
            let mut registry = global().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            let _ = MetricRegistry::register(&mut registry, spec);
        }
        let result = run_metric("custom.always_fails", &minimal_run(), &minimal_scenario(), None);
        assert!(!result.valid);
        assert_eq!(result.value, crate::model::MetricValue::Null);
        assert!(!result.notes.unwrap_or_default().is_empty());
    }

    #[test]
    fn constant_one_plugin_metric_round_trips() {
        fn constant_one(_ctx: &MetricContext) -> Result<MetricResult, MetricError> {
            Ok(MetricResult::valid(1_i64, None, Direction::Neutral))
        }
        let spec = crate::metrics::context::MetricSpec {
            name: crate::model::MetricName::new("custom.constant_one"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: None,
            func: constant_one,
        };
        {
            let mut registry = global().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            let _ = MetricRegistry::register(&mut registry, spec);
        }
        let result = run_metric("custom.constant_one", &minimal_run(), &minimal_scenario(), None);
        assert!(result.valid);
        assert_eq!(result.value, crate::model::MetricValue::Int(1));
    }
}
