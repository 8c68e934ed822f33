// src/metrics/builtin/motion.rs
// ============================================================================
// Module: Robometrics Motion Metrics
// Description: Jerk percentiles and command-oscillation rate.
// Purpose: Reference implementations fixing the engine's numerical contract.
// Dependencies: none
// ============================================================================

use crate::metrics::context::MetricContext;
use crate::metrics::context::MetricError;
use crate::model::Direction;
use crate::model::MetricResult;

/// 95th percentile of linear jerk magnitude derived from `vx`/`vy`.
pub fn jerk_p95(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    linear_jerk_percentile(ctx, 95.0)
}

/// 99th percentile of linear jerk magnitude derived from `vx`/`vy`.
pub fn jerk_p99(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    linear_jerk_percentile(ctx, 99.0)
}

/// 95th percentile of angular jerk magnitude derived from `wz`.
pub fn angular_jerk_p95(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let stream = &ctx.streams["state.twist2d"];
    let Some(wz) = stream.column_f64("wz") else {
        return Ok(MetricResult::invalid(Direction::Lower, "missing wz"));
    };
    let jerks = scalar_jerk(&stream.t, &wz);
    if jerks.is_empty() {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    }
    let value = percentile(&jerks, 95.0);
    Ok(MetricResult::valid(value, Some("rad/s^3".to_string()), Direction::Lower))
}

/// Sign-change rate of `command.vx` over the scenario window, per second.
pub fn oscillation_score(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let stream = &ctx.streams["command.twist2d"];
    let Some(vx) = stream.column_f64("vx") else {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    };
    if stream.t.len() < 2 {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    }
    let duration = stream.t[stream.t.len() - 1] - stream.t[0];
    if duration <= 0.0 {
        return Ok(MetricResult::invalid(Direction::Lower, "non-positive duration"));
    }
    let changes = sign_changes(&vx);
    Ok(MetricResult::valid(f64::from(changes) / duration, Some("1/s".to_string()), Direction::Lower))
}

fn linear_jerk_percentile(ctx: &MetricContext, percentile_rank: f64) -> Result<MetricResult, MetricError> {
    let stream = &ctx.streams["state.twist2d"];
    let (Some(vx), Some(vy)) = (stream.column_f64("vx"), stream.column_f64("vy")) else {
        return Ok(MetricResult::invalid(Direction::Lower, "missing vx/vy"));
    };
    let jerks = vector_jerk(&stream.t, &vx, &vy);
    if jerks.is_empty() {
        return Ok(MetricResult::invalid(Direction::Lower, "insufficient samples"));
    }
    let value = percentile(&jerks, percentile_rank);
    Ok(MetricResult::valid(value, Some("m/s^3".to_string()), Direction::Lower))
}

fn vector_jerk(times: &[f64], vx: &[f64], vy: &[f64]) -> Vec<f64> {
    let mut accelerations = Vec::new();
    for index in 1..times.len() {
        let dt = times[index] - times[index - 1];
        if dt <= 0.0 {
            continue;
        }
        let ax = (vx[index] - vx[index - 1]) / dt;
        let ay = (vy[index] - vy[index - 1]) / dt;
        accelerations.push((times[index], ax, ay));
    }

    let mut jerks = Vec::new();
    for index in 1..accelerations.len() {
        let (t, ax, ay) = accelerations[index];
        let (prev_t, prev_ax, prev_ay) = accelerations[index - 1];
        let dt = t - prev_t;
        if dt <= 0.0 {
            continue;
        }
        let jx = (ax - prev_ax) / dt;
        let jy = (ay - prev_ay) / dt;
        jerks.push(jx.hypot(jy));
    }
    jerks
}

fn scalar_jerk(times: &[f64], values: &[f64]) -> Vec<f64> {
    let mut accelerations = Vec::new();
    for index in 1..times.len() {
        let dt = times[index] - times[index - 1];
        if dt <= 0.0 {
            continue;
        }
        accelerations.push((times[index], (values[index] - values[index - 1]) / dt));
    }

    let mut jerks = Vec::new();
    for index in 1..accelerations.len() {
        let (t, accel) = accelerations[index];
        let (prev_t, prev_accel) = accelerations[index - 1];
        let dt = t - prev_t;
        if dt <= 0.0 {
            continue;
        }
        jerks.push(((accel - prev_accel) / dt).abs());
    }
    jerks
}

/// The ceil-rank percentile: sorts ascending, `rank = ceil(p/100 * n) - 1`,
/// clamped to `[0, n-1]`. Avoids interpolation differences across languages.
fn percentile(values: &[f64], percentile_rank: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut ordered = values.to_vec();
    ordered.sort_by(f64::total_cmp);
    let n = ordered.len();
    #[allow(clippy::cast_possible_truncation, reason = "rank is bounded to [0, n-1] immediately below")]
    let rank = ((percentile_rank / 100.0 * n as f64).ceil() as isize - 1).clamp(0, n as isize - 1) as usize;
    ordered[rank]
}

fn sign_changes(values: &[f64]) -> i64 {
    let mut last_sign = 0_i8;
    let mut changes = 0_i64;
    for &value in values {
        let sign = match value.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => 1,
            Some(std::cmp::Ordering::Less) => -1,
            _ => 0,
        };
        if sign == 0 {
            continue;
        }
        if last_sign != 0 && sign != last_sign {
            changes += 1;
        }
        last_sign = sign;
    }
    changes
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::CellValue;
    use crate::model::MetricValue;
    use crate::model::Run;
    use crate::model::Scenario;
    use crate::model::Stream;

    fn twist_stream(name: &str, t: Vec<f64>, vx: Vec<f64>, vy: Vec<f64>) -> Stream {
        let mut data = BTreeMap::new();
        data.insert("vx".to_string(), vx.into_iter().map(CellValue::Float).collect());
        data.insert("vy".to_string(), vy.into_iter().map(CellValue::Float).collect());
        Stream::new(name, t, data).expect("valid stream")
    }

    fn ctx_with_stream<'a>(run: &'a Run, scenario: &'a Scenario) -> MetricContext<'a> {
        MetricContext { run, scenario, streams: run.streams.clone(), events: vec![], config: BTreeMap::new() }
    }

    #[test]
    fn constant_velocity_has_zero_jerk() {
        let stream = twist_stream("state.twist2d", vec![0.0, 1.0, 2.0, 3.0], vec![1.0; 4], vec![0.0; 4]);
        let mut streams = BTreeMap::new();
        streams.insert("state.twist2d".to_string(), stream);
        let run = Run::new("r1", BTreeMap::new(), streams, vec![]);
        let scenario = Scenario::new("s:1", "r1", 0.0, 3.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = ctx_with_stream(&run, &scenario);

        let p95 = jerk_p95(&ctx).expect("computed");
        let p99 = jerk_p99(&ctx).expect("computed");
        assert_eq!(p95.value, MetricValue::Float(0.0));
        assert_eq!(p99.value, MetricValue::Float(0.0));
    }

    #[test]
    fn oscillating_command_has_positive_score() {
        let mut data = BTreeMap::new();
        data.insert(
            "vx".to_string(),
            vec![1.0, -1.0, 1.0, -1.0, 1.0].into_iter().map(CellValue::Float).collect(),
        );
        let stream = Stream::new("command.twist2d", vec![0.0, 0.5, 1.0, 1.5, 2.0], data).expect("valid stream");
        let mut streams = BTreeMap::new();
        streams.insert("command.twist2d".to_string(), stream);
        let run = Run::new("r1", BTreeMap::new(), streams, vec![]);
        let scenario = Scenario::new("s:1", "r1", 0.0, 2.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = ctx_with_stream(&run, &scenario);

        let result = oscillation_score(&ctx).expect("computed");
        assert!(result.valid);
        assert_eq!(result.units.as_deref(), Some("1/s"));
        match result.value {
            MetricValue::Float(value) => assert!(value > 0.0),
            other => panic!("expected float value, got {other:?}"),
        }
    }
}
