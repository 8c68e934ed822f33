// src/mining/miner.rs
// ============================================================================
// Module: Robometrics Scenario Miner
// Description: Turns a Run plus a Ruleset into a deterministic ScenarioSet.
// Purpose: Event-triggered and threshold-triggered scenario extraction.
// Dependencies: serde_json, sha2 (via model::hashing), tracing
// ============================================================================

//! ## Overview
//! Mining is infallible once given a valid [`Run`] and [`Ruleset`]: both
//! types enforce their own invariants at construction, so nothing here
//! returns a `Result`. Every rule that cannot be resolved (missing stream,
//! unresolvable signal, a window that collapses to empty after clamping)
//! degrades to a warning in the returned [`SchemaReport`] rather than a
//! fatal error; one rule's failure never stops the others.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::mining::segment::apply_cooldown;
use crate::mining::segment::apply_min_duration;
use crate::mining::segment::apply_min_gap;
use crate::mining::segment::segments_from_condition;
use crate::model::hash_bytes;
use crate::model::Event;
use crate::model::HashAlgorithm;
use crate::model::Run;
use crate::model::Scenario;
use crate::model::ScenarioId;
use crate::model::ScenarioSet;
use crate::model::ScenarioSetId;
use crate::model::SchemaReport;
use crate::model::Stream;
use crate::model::SPEC_VERSION;
use crate::rules::EventSpec;
use crate::rules::RuleSpec;
use crate::rules::Ruleset;
use crate::rules::ThresholdSpec;

/// Mines a [`ScenarioSet`] from `run` under `ruleset`.
///
/// Each rule is mined independently and in file order; every scenario it
/// emits is later sorted into the final `(run_id, t0, t1, intent,
/// scenario_id)` order before being placed in the returned set. The
/// accompanying [`SchemaReport`] carries only warnings: a missing stream, an
/// unresolvable signal, or a window that collapses to empty after clamping
/// to the run's time envelope.
#[must_use]
pub fn mine_scenarios(
    run: &Run,
    ruleset: &Ruleset,
    scenario_set_id: impl Into<ScenarioSetId>,
    created_at: impl Into<String>,
) -> (ScenarioSet, SchemaReport) {
    let envelope = run.time_envelope();
    let mut report = SchemaReport::default();
    let mut scenarios = Vec::new();

    for rule in &ruleset.scenarios {
        if let Some(event_spec) = &rule.event {
            scenarios.extend(mine_event_rule(run, rule, event_spec, envelope, &mut report));
        } else if let Some(threshold) = &rule.threshold {
            scenarios.extend(mine_threshold_rule(run, rule, threshold, envelope, &mut report));
        }
    }

    scenarios.sort_by(|a, b| {
        a.run_id
            .cmp(&b.run_id)
            .then_with(|| a.t0.total_cmp(&b.t0))
            .then_with(|| a.t1.total_cmp(&b.t1))
            .then_with(|| a.intent.cmp(&b.intent))
            .then_with(|| a.scenario_id.cmp(&b.scenario_id))
    });

    let mut runs = BTreeMap::new();
    let mut descriptor = BTreeMap::new();
    descriptor.insert("run_id".to_string(), Value::String(run.run_id.as_str().to_string()));
    runs.insert(run.run_id.as_str().to_string(), descriptor);

    let set = ScenarioSet {
        spec_version: SPEC_VERSION.to_string(),
        scenario_set_id: scenario_set_id.into(),
        created_at: created_at.into(),
        runs,
        scenarios,
    };
    (set, report)
}

fn mine_event_rule(
    run: &Run,
    rule: &RuleSpec,
    event_spec: &EventSpec,
    envelope: Option<(f64, f64)>,
    report: &mut SchemaReport,
) -> Vec<Scenario> {
    let mut candidates: Vec<&Event> = run
        .events
        .iter()
        .filter(|event| event.name == event_spec.name && event.matches_where(&event_spec.r#where))
        .collect();
    candidates.sort_by(|a, b| a.t.total_cmp(&b.t));

    let mut scenarios = Vec::new();
    for (index, event) in candidates.iter().enumerate() {
        let raw_t0 = event.t - rule.window.pre_s;
        let raw_t1 = event.t + rule.window.post_s;
        let (t0, t1) = clamp_window(raw_t0, raw_t1, envelope);
        let scenario_id = scenario_id(rule.rule_id.as_str(), run.run_id.as_str(), t0, t1, index);

        if t1 <= t0 {
            warn_empty_window(report, rule, run, &scenario_id, t0, t1);
            continue;
        }
        scenarios.push(Scenario {
            scenario_id,
            run_id: run.run_id.clone(),
            t0,
            t1,
            intent: rule.intent.clone(),
            tags: tags_for(rule),
            eval_profile: None,
        });
    }
    scenarios
}

fn mine_threshold_rule(
    run: &Run,
    rule: &RuleSpec,
    threshold: &ThresholdSpec,
    envelope: Option<(f64, f64)>,
    report: &mut SchemaReport,
) -> Vec<Scenario> {
    let Some(stream) = run.streams.get(&threshold.stream) else {
        let message = format!("Rule '{}': stream '{}' missing", rule.rule_id, threshold.stream);
        report.add_warning(message.clone());
        tracing::warn!("{message}");
        return Vec::new();
    };

    let Some(signal) = resolve_signal(stream, &threshold.signal, rule.rule_id.as_str(), report) else {
        return Vec::new();
    };

    let Some(op) = threshold.op() else {
        return Vec::new();
    };

    let mask: Vec<bool> = signal.iter().map(|&value| op.apply(value, threshold.value)).collect();
    let segments = segments_from_condition(&stream.t, &mask);
    let segments = apply_min_duration(segments, threshold.for_s);
    let segments = apply_min_gap(segments, threshold.min_gap_s);
    let segments = apply_cooldown(segments, threshold.cooldown_s);

    let mut scenarios = Vec::new();
    for (index, segment) in segments.into_iter().enumerate() {
        let raw_t0 = segment.start - rule.window.pre_s;
        let raw_t1 = segment.end + rule.window.post_s;
        let (t0, t1) = clamp_window(raw_t0, raw_t1, envelope);
        let scenario_id = scenario_id(rule.rule_id.as_str(), run.run_id.as_str(), t0, t1, index);

        if t1 <= t0 {
            warn_empty_window(report, rule, run, &scenario_id, t0, t1);
            continue;
        }
        scenarios.push(Scenario {
            scenario_id,
            run_id: run.run_id.clone(),
            t0,
            t1,
            intent: rule.intent.clone(),
            tags: tags_for(rule),
            eval_profile: None,
        });
    }
    scenarios
}

/// Resolves `signal` against `stream`: a direct column first, then the
/// derived `linear_speed = hypot(vx, vy)`, else `None` with a warning.
fn resolve_signal(stream: &Stream, signal: &str, rule_id: &str, report: &mut SchemaReport) -> Option<Vec<f64>> {
    if let Some(values) = stream.column_f64(signal) {
        return Some(values);
    }
    if signal == "linear_speed" {
        if let (Some(vx), Some(vy)) = (stream.column_f64("vx"), stream.column_f64("vy")) {
            return Some(vx.iter().zip(vy.iter()).map(|(&x, &y)| x.hypot(y)).collect());
        }
        let message = format!("Rule '{rule_id}': signal 'linear_speed' requires vx/vy");
        report.add_warning(message.clone());
        tracing::warn!("{message}");
        return None;
    }
    let message = format!("Rule '{rule_id}': signal '{signal}' not found");
    report.add_warning(message.clone());
    tracing::warn!("{message}");
    None
}

/// Clamps `[t0, t1]` to the run's time envelope, if one exists.
fn clamp_window(t0: f64, t1: f64, envelope: Option<(f64, f64)>) -> (f64, f64) {
    match envelope {
        Some((lo, hi)) => (t0.max(lo), t1.min(hi)),
        None => (t0, t1),
    }
}

/// `rule.tags` plus `rule_id`, as every mined scenario carries it.
fn tags_for(rule: &RuleSpec) -> BTreeMap<String, String> {
    let mut tags = rule.tags.clone();
    tags.insert("rule_id".to_string(), rule.rule_id.as_str().to_string());
    tags
}

/// `"<rule_id>:<digest10>"`, where `digest10` is the first 10 hex chars of
/// SHA-256 over `"<rule_id>:<run_id>:<t0:.4>:<t1:.4>:<index>"`.
fn scenario_id(rule_id: &str, run_id: &str, t0: f64, t1: f64, index: usize) -> ScenarioId {
    let payload = format!("{rule_id}:{run_id}:{t0:.4}:{t1:.4}:{index}");
    let digest = hash_bytes(payload.as_bytes(), HashAlgorithm::Sha256);
    ScenarioId::new(format!("{rule_id}:{}", &digest.value[..10]))
}

fn warn_empty_window(report: &mut SchemaReport, rule: &RuleSpec, run: &Run, scenario_id: &ScenarioId, t0: f64, t1: f64) {
    let message = format!(
        "Rule '{}' run '{}' scenario '{}' skipped due to non-positive window ({:.3}, {:.3})",
        rule.rule_id, run.run_id, scenario_id, t0, t1
    );
    report.add_warning(message.clone());
    tracing::warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::rules::WindowSpec;

    fn run_with_events(events: Vec<Event>, envelope: (f64, f64)) -> Run {
        let mut streams = BTreeMap::new();
        streams.insert(
            "pose".to_string(),
            Stream::new("pose", vec![envelope.0, envelope.1], BTreeMap::new()).expect("valid stream"),
        );
        Run::new("r1", BTreeMap::new(), streams, events)
    }

    fn event_rule(rule_id: &str, name: &str, pre_s: f64, post_s: f64) -> RuleSpec {
        RuleSpec {
            rule_id: rule_id.into(),
            intent: "fallback".to_string(),
            tags: BTreeMap::new(),
            window: WindowSpec { pre_s, post_s },
            event: Some(EventSpec { name: name.to_string(), r#where: BTreeMap::new() }),
            threshold: None,
        }
    }

    #[test]
    fn mines_two_windows_from_two_fallback_events() {
        let run = run_with_events(
            vec![Event::new(2.0, "safety.fallback", BTreeMap::new()), Event::new(8.0, "safety.fallback", BTreeMap::new())],
            (0.0, 10.0),
        );
        let ruleset = Ruleset { version: "1".to_string(), scenarios: vec![event_rule("fallback", "safety.fallback", 1.0, 2.0)] };

        let (set, report) = mine_scenarios(&run, &ruleset, "set1", "2026-01-01T00:00:00Z");
        assert!(report.ok());
        assert_eq!(set.scenarios.len(), 2);
        assert_eq!((set.scenarios[0].t0, set.scenarios[0].t1), (1.0, 4.0));
        assert_eq!((set.scenarios[1].t0, set.scenarios[1].t1), (7.0, 10.0));
        assert_eq!(set.scenarios[0].tags.get("rule_id"), Some(&"fallback".to_string()));
    }

    #[test]
    fn skips_window_that_clamps_to_empty_and_warns() {
        let run = run_with_events(vec![Event::new(0.0, "safety.fallback", BTreeMap::new())], (0.0, 10.0));
        let ruleset = Ruleset { version: "1".to_string(), scenarios: vec![event_rule("fallback", "safety.fallback", 0.5, 0.0)] };

        let (set, report) = mine_scenarios(&run, &ruleset, "set1", "ts");
        assert!(set.scenarios.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("skipped due to non-positive window"));
    }

    fn threshold_rule(rule_id: &str, op: &str, value: f64, for_s: f64) -> RuleSpec {
        RuleSpec {
            rule_id: rule_id.into(),
            intent: "deadlock".to_string(),
            tags: BTreeMap::new(),
            window: WindowSpec { pre_s: 1.0, post_s: 1.0 },
            event: None,
            threshold: Some(ThresholdSpec {
                stream: "command.twist2d".to_string(),
                signal: "linear_speed".to_string(),
                op: op.to_string(),
                value,
                for_s,
                min_gap_s: None,
                cooldown_s: None,
            }),
        }
    }

    #[test]
    fn mines_one_scenario_from_sustained_threshold_crossing() {
        let t = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let vx = vec![0.0, 0.0, 0.5, 0.5, 0.5, 0.0, 0.0];
        let mut data = BTreeMap::new();
        data.insert("vx".to_string(), vx.into_iter().map(CellValue::Float).collect());
        data.insert("vy".to_string(), t.iter().map(|_| CellValue::Float(0.0)).collect());
        let stream = Stream::new("command.twist2d", t, data).expect("valid stream");

        let mut streams = BTreeMap::new();
        streams.insert("command.twist2d".to_string(), stream);
        let run = Run::new("r1", BTreeMap::new(), streams, vec![]);

        let ruleset = Ruleset { version: "1".to_string(), scenarios: vec![threshold_rule("deadlock", "gt", 0.3, 2.0)] };
        let (set, report) = mine_scenarios(&run, &ruleset, "set1", "ts");

        assert!(report.ok());
        assert_eq!(set.scenarios.len(), 1);
        assert_eq!((set.scenarios[0].t0, set.scenarios[0].t1), (1.0, 5.0));
        assert!(set.scenarios[0].scenario_id.as_str().starts_with("deadlock:"));
    }

    #[test]
    fn warns_when_threshold_stream_missing() {
        let run = Run::new("r1", BTreeMap::new(), BTreeMap::new(), vec![]);
        let ruleset = Ruleset { version: "1".to_string(), scenarios: vec![threshold_rule("deadlock", "gt", 0.3, 2.0)] };
        let (set, report) = mine_scenarios(&run, &ruleset, "set1", "ts");
        assert!(set.scenarios.is_empty());
        assert!(report.warnings[0].contains("stream 'command.twist2d' missing"));
    }

    #[test]
    fn mining_is_deterministic_across_runs() {
        let run = run_with_events(
            vec![Event::new(2.0, "safety.fallback", BTreeMap::new()), Event::new(8.0, "safety.fallback", BTreeMap::new())],
            (0.0, 10.0),
        );
        let ruleset = Ruleset { version: "1".to_string(), scenarios: vec![event_rule("fallback", "safety.fallback", 1.0, 2.0)] };

        let (a, _) = mine_scenarios(&run, &ruleset, "set1", "ts");
        let (b, _) = mine_scenarios(&run, &ruleset, "set1", "ts");
        assert_eq!(a.to_canonical_json().expect("a"), b.to_canonical_json().expect("b"));
    }
}
