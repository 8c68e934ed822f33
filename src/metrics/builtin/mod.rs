// src/metrics/builtin/mod.rs
// ============================================================================
// Module: Robometrics Built-in Metric Pack
// Description: The declarative specs and functions registered at startup.
// Purpose: Fix the numerical contracts the engine must honor.
// Dependencies: none
// ============================================================================

mod efficiency;
mod motion;
mod reliability;
mod safety;
mod task;
mod util;

use crate::metrics::context::MetricSpec;
use crate::model::MetricName;

/// Every built-in [`MetricSpec`], in no particular order; the registry
/// sorts them into its internal map on registration.
#[must_use]
pub fn specs() -> Vec<MetricSpec> {
    vec![
        MetricSpec {
            name: MetricName::new("eff.path_efficiency"),
            requires_streams: vec!["state.pose2d".to_string(), "mission.goal2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Straight-line distance to goal divided by path length.".to_string()),
            func: efficiency::path_efficiency,
        },
        MetricSpec {
            name: MetricName::new("eff.stop_time_ratio"),
            requires_streams: vec!["state.twist2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Ratio of time with linear_speed < stop_speed_mps.".to_string()),
            func: efficiency::stop_time_ratio,
        },
        MetricSpec {
            name: MetricName::new("motion.jerk_p95"),
            requires_streams: vec!["state.twist2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("95th percentile of linear jerk magnitude from vx/vy.".to_string()),
            func: motion::jerk_p95,
        },
        MetricSpec {
            name: MetricName::new("motion.jerk_p99"),
            requires_streams: vec!["state.twist2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("99th percentile of linear jerk magnitude from vx/vy.".to_string()),
            func: motion::jerk_p99,
        },
        MetricSpec {
            name: MetricName::new("motion.angular_jerk_p95"),
            requires_streams: vec!["state.twist2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("95th percentile of angular jerk magnitude from wz.".to_string()),
            func: motion::angular_jerk_p95,
        },
        MetricSpec {
            name: MetricName::new("motion.oscillation_score"),
            requires_streams: vec!["command.twist2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Sign-change rate of command.vx per second.".to_string()),
            func: motion::oscillation_score,
        },
        MetricSpec {
            name: MetricName::new("safety.fallback_count"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: vec!["safety.fallback".to_string()],
            description: Some("Count of safety.fallback events.".to_string()),
            func: safety::fallback_count,
        },
        MetricSpec {
            name: MetricName::new("safety.estop_count"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: vec!["safety.estop".to_string()],
            description: Some("Count of safety.estop events.".to_string()),
            func: safety::estop_count,
        },
        MetricSpec {
            name: MetricName::new("safety.contact_count"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: vec!["safety.contact".to_string()],
            description: Some("Count of safety.contact events.".to_string()),
            func: safety::contact_count,
        },
        MetricSpec {
            name: MetricName::new("safety.speed_limit_violations"),
            requires_streams: vec!["state.twist2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Count of samples exceeding configured speed limit.".to_string()),
            func: safety::speed_limit_violations,
        },
        MetricSpec {
            name: MetricName::new("safety.min_clearance"),
            requires_streams: vec!["obstacle".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Minimum obstacle clearance.".to_string()),
            func: safety::min_clearance,
        },
        MetricSpec {
            name: MetricName::new("sys.deadline_miss_count"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: vec!["sys.deadline_miss".to_string()],
            description: Some("Count of sys.deadline_miss events.".to_string()),
            func: reliability::deadline_miss_count,
        },
        MetricSpec {
            name: MetricName::new("sys.sensor_degraded_count"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: vec!["sys.sensor_degraded".to_string()],
            description: Some("Count of sys.sensor_degraded events.".to_string()),
            func: reliability::sensor_degraded_count,
        },
        MetricSpec {
            name: MetricName::new("task.success"),
            requires_streams: vec!["mission.status".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Whether the mission status ends in succeeded.".to_string()),
            func: task::success,
        },
        MetricSpec {
            name: MetricName::new("task.time_to_goal"),
            requires_streams: vec!["mission.status".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("Seconds from first active to first succeeded.".to_string()),
            func: task::time_to_goal,
        },
        MetricSpec {
            name: MetricName::new("task.progress_rate"),
            requires_streams: vec!["state.pose2d".to_string(), "mission.goal2d".to_string()],
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: Some("(start distance - end distance) / duration.".to_string()),
            func: task::progress_rate,
        },
        MetricSpec {
            name: MetricName::new("task.recovery_count"),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: vec!["task.recovery".to_string()],
            description: Some("Count of task.recovery events.".to_string()),
            func: task::recovery_count,
        },
    ]
}
