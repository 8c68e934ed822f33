// src/metrics/builtin/safety.rs
// ============================================================================
// Module: Robometrics Safety Metrics
// Description: Speed-limit violations, minimum clearance, safety event counts.
// Purpose: Reference implementations fixing the engine's numerical contract.
// Dependencies: none
// ============================================================================

use crate::metrics::context::MetricContext;
use crate::metrics::context::MetricError;
use crate::model::Direction;
use crate::model::MetricResult;

/// Counts `safety.fallback` events in the scenario window.
pub fn fallback_count(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    Ok(count_events(ctx, "safety.fallback"))
}

/// Counts `safety.estop` events in the scenario window.
pub fn estop_count(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    Ok(count_events(ctx, "safety.estop"))
}

/// Counts `safety.contact` events in the scenario window.
pub fn contact_count(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    Ok(count_events(ctx, "safety.contact"))
}

/// Counts samples where `hypot(vx, vy)` exceeds `config.speed_limit_mps`.
pub fn speed_limit_violations(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let speed_limit = ctx.config.get("speed_limit_mps").and_then(serde_json::Value::as_f64).unwrap_or(0.0);
    if speed_limit <= 0.0 {
        return Ok(MetricResult::invalid(Direction::Lower, "missing speed_limit_mps config"));
    }

    let stream = &ctx.streams["state.twist2d"];
    let (Some(vx), Some(vy)) = (stream.column_f64("vx"), stream.column_f64("vy")) else {
        return Ok(MetricResult::invalid(Direction::Lower, "missing vx/vy"));
    };

    let count = vx.iter().zip(vy.iter()).filter(|(&x, &y)| x.hypot(y) > speed_limit).count();
    Ok(MetricResult::valid(count as i64, None, Direction::Lower))
}

/// Minimum finite `obstacle.min_distance` sample in the scenario window.
/// Non-numeric or non-finite cells are skipped rather than invalidating the
/// whole column, so a single `null` sample does not hide a real minimum.
pub fn min_clearance(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let stream = &ctx.streams["obstacle"];
    let Some(distances) = stream.data.get("min_distance") else {
        return Ok(MetricResult::invalid(Direction::Higher, "missing min_distance"));
    };
    let finite_min = distances
        .iter()
        .filter_map(crate::model::CellValue::as_f64)
        .filter(|value| value.is_finite())
        .fold(None, |acc: Option<f64>, value| Some(acc.map_or(value, |current| current.min(value))));
    let Some(value) = finite_min else {
        return Ok(MetricResult::invalid(Direction::Higher, "no valid min_distance samples"));
    };
    Ok(MetricResult::valid(value, Some("m".to_string()), Direction::Higher))
}

fn count_events(ctx: &MetricContext, name: &str) -> MetricResult {
    let count = ctx.events.iter().filter(|event| event.name == name).count();
    MetricResult::valid(count as i64, None, Direction::Lower)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::CellValue;
    use crate::model::Event;
    use crate::model::MetricValue;
    use crate::model::Run;
    use crate::model::Scenario;
    use crate::model::Stream;

    #[test]
    fn counts_three_fallback_events() {
        let events = vec![
            Event::new(1.0, "safety.fallback", BTreeMap::new()),
            Event::new(2.0, "safety.fallback", BTreeMap::new()),
            Event::new(3.0, "safety.fallback", BTreeMap::new()),
        ];
        let run = Run::new("r1", BTreeMap::new(), BTreeMap::new(), vec![]);
        let scenario = Scenario::new("s:1", "r1", 0.0, 10.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = MetricContext {
            run: &run,
            scenario: &scenario,
            streams: BTreeMap::new(),
            events: events.iter().collect(),
            config: BTreeMap::new(),
        };
        let result = fallback_count(&ctx).expect("computed");
        assert_eq!(result.value, MetricValue::Int(3));
    }

    #[test]
    fn min_clearance_ignores_non_finite_samples() {
        let mut data = BTreeMap::new();
        data.insert(
            "min_distance".to_string(),
            vec![CellValue::Null, CellValue::Float(1.5), CellValue::Float(0.8)],
        );
        let stream = Stream::new("obstacle", vec![0.0, 1.0, 2.0], data).expect("valid stream");
        let mut streams = BTreeMap::new();
        streams.insert("obstacle".to_string(), stream);
        let run = Run::new("r1", BTreeMap::new(), streams, vec![]);
        let scenario = Scenario::new("s:1", "r1", 0.0, 3.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = MetricContext {
            run: &run,
            scenario: &scenario,
            streams: run.streams.clone(),
            events: vec![],
            config: BTreeMap::new(),
        };
        let result = min_clearance(&ctx).expect("computed");
        assert_eq!(result.value, MetricValue::Float(0.8));
    }
}
