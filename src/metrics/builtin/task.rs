// src/metrics/builtin/task.rs
// ============================================================================
// Module: Robometrics Task Metrics
// Description: Mission success, time-to-goal, progress rate, recovery count.
// Purpose: Reference implementations fixing the engine's numerical contract.
// Dependencies: none
// ============================================================================

use crate::metrics::builtin::util::distance;
use crate::metrics::context::MetricContext;
use crate::metrics::context::MetricError;
use crate::model::CellValue;
use crate::model::Direction;
use crate::model::MetricResult;

/// `true` iff the last `mission.status` sample is `"succeeded"`.
pub fn success(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let stream = &ctx.streams["mission.status"];
    let Some(statuses) = stream.data.get("status") else {
        return Ok(MetricResult::invalid(Direction::Higher, "missing status samples"));
    };
    let Some(last) = statuses.last() else {
        return Ok(MetricResult::invalid(Direction::Higher, "missing status samples"));
    };
    Ok(MetricResult::valid(status_str(last) == "succeeded", None, Direction::Higher))
}

/// Seconds from the first `"active"` status to the first `"succeeded"`
/// status, substituting the scenario bounds when either is missing.
pub fn time_to_goal(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let stream = &ctx.streams["mission.status"];
    let Some(statuses) = stream.data.get("status") else {
        return Ok(MetricResult::invalid(Direction::Lower, "missing status samples"));
    };
    if stream.t.is_empty() || statuses.is_empty() {
        return Ok(MetricResult::invalid(Direction::Lower, "missing status samples"));
    }

    let t_active = stream
        .t
        .iter()
        .zip(statuses.iter())
        .find(|(_, status)| status_str(status) == "active")
        .map_or(ctx.scenario.t0, |(&t, _)| t);
    let t_succeeded = stream
        .t
        .iter()
        .zip(statuses.iter())
        .find(|(_, status)| status_str(status) == "succeeded")
        .map_or(ctx.scenario.t1, |(&t, _)| t);

    Ok(MetricResult::valid((t_succeeded - t_active).max(0.0), Some("s".to_string()), Direction::Lower))
}

/// `(start distance - end distance) / duration` between pose and goal.
pub fn progress_rate(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let state = &ctx.streams["state.pose2d"];
    let goal = &ctx.streams["mission.goal2d"];
    if state.t.is_empty() || goal.t.is_empty() {
        return Ok(MetricResult::invalid(Direction::Higher, "missing pose or goal samples"));
    }
    let (Some(state_x), Some(state_y)) = (state.column_f64("x"), state.column_f64("y")) else {
        return Ok(MetricResult::invalid(Direction::Higher, "missing pose or goal coordinates"));
    };
    let (Some(goal_x), Some(goal_y)) = (goal.column_f64("x"), goal.column_f64("y")) else {
        return Ok(MetricResult::invalid(Direction::Higher, "missing pose or goal coordinates"));
    };
    if state_x.is_empty() || goal_x.is_empty() {
        return Ok(MetricResult::invalid(Direction::Higher, "missing pose or goal coordinates"));
    }

    let duration = state.t[state.t.len() - 1] - state.t[0];
    if duration <= 0.0 {
        return Ok(MetricResult::invalid(Direction::Higher, "non-positive duration"));
    }

    let start_dist = distance(state_x[0], state_y[0], goal_x[0], goal_y[0]);
    let end_dist = distance(
        state_x[state_x.len() - 1],
        state_y[state_y.len() - 1],
        goal_x[goal_x.len() - 1],
        goal_y[goal_y.len() - 1],
    );

    Ok(MetricResult::valid((start_dist - end_dist) / duration, Some("m/s".to_string()), Direction::Higher))
}

/// Counts `task.recovery` events in the scenario window.
pub fn recovery_count(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    let count = ctx.events.iter().filter(|event| event.name == "task.recovery").count();
    Ok(MetricResult::valid(count as i64, None, Direction::Lower))
}

fn status_str(value: &CellValue) -> String {
    match value {
        CellValue::Str(s) => s.clone(),
        other => other.as_f64().map_or_else(String::new, |v| v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::MetricValue;
    use crate::model::Run;
    use crate::model::Scenario;
    use crate::model::Stream;

    fn status_stream(t: Vec<f64>, statuses: Vec<&str>) -> Stream {
        let mut data = BTreeMap::new();
        data.insert("status".to_string(), statuses.into_iter().map(|s| CellValue::Str(s.to_string())).collect());
        Stream::new("mission.status", t, data).expect("valid stream")
    }

    #[test]
    fn success_is_true_when_last_status_succeeded() {
        let stream = status_stream(vec![0.0, 1.0, 2.0], vec!["active", "active", "succeeded"]);
        let mut streams = BTreeMap::new();
        streams.insert("mission.status".to_string(), stream);
        let run = Run::new("r1", BTreeMap::new(), streams, vec![]);
        let scenario = Scenario::new("s:1", "r1", 0.0, 2.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = MetricContext { run: &run, scenario: &scenario, streams: run.streams.clone(), events: vec![], config: BTreeMap::new() };
        let result = success(&ctx).expect("computed");
        assert_eq!(result.value, MetricValue::Bool(true));
    }

    #[test]
    fn time_to_goal_measures_active_to_succeeded_span() {
        let stream = status_stream(vec![0.0, 1.0, 4.0], vec!["active", "active", "succeeded"]);
        let mut streams = BTreeMap::new();
        streams.insert("mission.status".to_string(), stream);
        let run = Run::new("r1", BTreeMap::new(), streams, vec![]);
        let scenario = Scenario::new("s:1", "r1", 0.0, 4.0, "fallback", BTreeMap::new(), None).expect("scenario");
        let ctx = MetricContext { run: &run, scenario: &scenario, streams: run.streams.clone(), events: vec![], config: BTreeMap::new() };
        let result = time_to_goal(&ctx).expect("computed");
        assert_eq!(result.value, MetricValue::Float(4.0));
    }
}
