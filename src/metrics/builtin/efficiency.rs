// src/metrics/builtin/efficiency.rs
// ============================================================================
// Module: Robometrics Efficiency Metrics
// Description: Path efficiency and stop-time ratio.
// Purpose: Reference implementations fixing the engine's numerical contract.
// Dependencies: none
// ============================================================================

use crate::metrics::builtin::util::distance;
use crate::metrics::context::MetricContext;
use crate::metrics::context::MetricError;
use crate::model::Direction;
use crate::model::MetricResult;
use crate::model::MetricValue;

/// Straight-line distance to goal divided by total path length, clamped to
/// `[0, 1]`. Returns `valid=false` if the start distance exceeds the path
/// length — the clamped value is still reported, but flagged.
pub fn path_efficiency(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let pose = &ctx.streams["state.pose2d"];
    let goal = &ctx.streams["mission.goal2d"];
    if pose.t.len() < 2 {
        return Ok(MetricResult::invalid(Direction::Higher, "insufficient pose samples"));
    }

    let xs = pose.column_f64("x").unwrap_or_default();
    let ys = pose.column_f64("y").unwrap_or_default();
    let path_length = path_length(&xs, &ys);
    if path_length <= 0.0 {
        return Ok(MetricResult::invalid(Direction::Higher, "non-positive path length"));
    }

    let goal_xs = goal.column_f64("x").unwrap_or_default();
    let goal_ys = goal.column_f64("y").unwrap_or_default();
    let start_dist = distance(
        xs.first().copied().unwrap_or(0.0),
        ys.first().copied().unwrap_or(0.0),
        goal_xs.first().copied().unwrap_or(0.0),
        goal_ys.first().copied().unwrap_or(0.0),
    );
    let efficiency = (start_dist / path_length).clamp(0.0, 1.0);

    if start_dist > path_length {
        return Ok(MetricResult {
            value: MetricValue::Float(efficiency),
            units: None,
            direction: Direction::Higher,
            valid: false,
            notes: Some("path shorter than start distance".to_string()),
        });
    }

    Ok(MetricResult::valid(efficiency, None, Direction::Higher))
}

/// Fraction of scenario duration where `hypot(vx, vy)` falls below
/// `config.stop_speed_mps` (default `0.05`).
pub fn stop_time_ratio(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let threshold = ctx.config.get("stop_speed_mps").and_then(serde_json::Value::as_f64).unwrap_or(0.05);
    let stream = &ctx.streams["state.twist2d"];
    let Some(vx) = stream.column_f64("vx") else {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    };
    let Some(vy) = stream.column_f64("vy") else {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    };
    if stream.t.len() < 2 {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    }

    let duration = stream.t[stream.t.len() - 1] - stream.t[0];
    if duration <= 0.0 {
        return Ok(MetricResult::invalid(Direction::Lower, "non-positive duration"));
    }

    let mut stop_time = 0.0;
    for index in 1..stream.t.len() {
        let dt = stream.t[index] - stream.t[index - 1];
        if dt <= 0.0 {
            continue;
        }
        let speed = vx[index].hypot(vy[index]);
        if speed < threshold {
            stop_time += dt;
        }
    }

    Ok(MetricResult::valid(stop_time / duration, None, Direction::Lower))
}

fn path_length(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    (1..n).map(|i| distance(xs[i - 1], ys[i - 1], xs[i], ys[i])).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::CellValue;
    use crate::model::Run;
    use crate::model::Scenario;
    use crate::model::Stream;

    fn pose_goal_run(xs: Vec<f64>, ys: Vec<f64>, goal: (f64, f64)) -> Run {
        let t: Vec<f64> = (0..xs.len()).map(|i| i as f64).collect();
        let mut pose_data = BTreeMap::new();
        pose_data.insert("x".to_string(), xs.into_iter().map(CellValue::Float).collect());
        pose_data.insert("y".to_string(), ys.into_iter().map(CellValue::Float).collect());
        let pose = Stream::new("state.pose2d", t.clone(), pose_data).expect("valid stream");

        let mut goal_data = BTreeMap::new();
        goal_data.insert("x".to_string(), t.iter().map(|_| CellValue::Float(goal.0)).collect());
        goal_data.insert("y".to_string(), t.iter().map(|_| CellValue::Float(goal.1)).collect());
        let goal_stream = Stream::new("mission.goal2d", t, goal_data).expect("valid stream");

        let mut streams = BTreeMap::new();
        streams.insert("state.pose2d".to_string(), pose);
        streams.insert("mission.goal2d".to_string(), goal_stream);
        Run::new("r1", BTreeMap::new(), streams, vec![])
    }

    #[test]
    fn path_efficiency_of_a_direct_path_is_one() {
        let run = pose_goal_run(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0], (2.0, 0.0));
        let scenario = Scenario::new("s:1", "r1", 0.0, 3.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = MetricContext {
            run: &run,
            scenario: &scenario,
            streams: run.streams.clone(),
            events: vec![],
            config: BTreeMap::new(),
        };
        let result = path_efficiency(&ctx).expect("computed");
        assert!(result.valid);
        assert_eq!(result.value, MetricValue::Float(1.0));
    }

    #[test]
    fn path_efficiency_flags_start_distance_exceeding_path_length() {
        let run = pose_goal_run(vec![0.0, 0.1], vec![0.0, 0.0], (5.0, 0.0));
        let scenario = Scenario::new("s:1", "r1", 0.0, 2.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = MetricContext {
            run: &run,
            scenario: &scenario,
            streams: run.streams.clone(),
            events: vec![],
            config: BTreeMap::new(),
        };
        let result = path_efficiency(&ctx).expect("computed");
        assert!(!result.valid);
        assert_eq!(result.notes.as_deref(), Some("path shorter than start distance"));
    }
}
