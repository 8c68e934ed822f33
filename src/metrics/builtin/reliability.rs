// src/metrics/builtin/reliability.rs
// ============================================================================
// Module: Robometrics Reliability Metrics
// Description: System-reliability event counts.
// Purpose: Reference implementations fixing the engine's numerical contract.
// Dependencies: none
// ============================================================================

use crate::metrics::context::MetricContext;
use crate::metrics::context::MetricError;
use crate::model::Direction;
use crate::model::MetricResult;

/// Counts `sys.deadline_miss` events in the scenario window.
pub fn deadline_miss_count(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    Ok(count_events(ctx, "sys.deadline_miss"))
}

/// Counts `sys.sensor_degraded` events in the scenario window.
pub fn sensor_degraded_count(ctx: &MetricContext) -> Result<MetricResult, MetricError> {
    Ok(count_events(ctx, "sys.sensor_degraded"))
}

fn count_events(ctx: &MetricContext, name: &str) -> MetricResult {
    let count = ctx.events.iter().filter(|event| event.name == name).count();
    MetricResult::valid(count as i64, None, Direction::Lower)
}
