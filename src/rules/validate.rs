// src/rules/validate.rs
// ============================================================================
// Module: Robometrics Ruleset Validation
// Description: Semantic checks a deserialized Ruleset must still pass.
// Purpose: Catch malformed rules with a uniform, rule-scoped error message.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! `serde` deserialization only checks shape (types, required fields). The
//! checks here are semantic: non-empty/unique `rule_id`, exactly one of
//! `event`/`threshold`, non-negative durations, and a recognized `op`. Every
//! message produced here is prefixed with `"Rule '<rule_id>': "`, matching
//! the wire format external loaders (e.g. a YAML rule file) are expected to
//! surface to their own callers.

use thiserror::Error;

use crate::rules::model::Ruleset;

/// Errors raised while validating a [`Ruleset`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A rule's `rule_id` was empty.
    #[error("rule at index {0}: rule_id must be a non-empty string")]
    EmptyRuleId(usize),
    /// Two or more rules shared the same `rule_id`.
    #[error("Rule '{0}': duplicate rule id")]
    DuplicateRuleId(String),
    /// A rule defined zero or both of `event`/`threshold`.
    #[error("Rule '{0}': must define exactly one of event or threshold")]
    ExactlyOneTrigger(String),
    /// A window's `pre_s`/`post_s` was negative.
    #[error("Rule '{0}': window values must be >= 0")]
    NegativeWindow(String),
    /// A threshold's `op` was not `lt`/`le`/`gt`/`ge`.
    #[error("Rule '{0}': threshold.op must be one of lt/le/gt/ge")]
    UnknownOp(String),
    /// A threshold's `for_s` was negative.
    #[error("Rule '{0}': threshold.for_s must be >= 0")]
    NegativeForS(String),
    /// A threshold's `min_gap_s` was negative.
    #[error("Rule '{0}': threshold.min_gap_s must be >= 0")]
    NegativeMinGap(String),
    /// A threshold's `cooldown_s` was negative.
    #[error("Rule '{0}': threshold.cooldown_s must be >= 0")]
    NegativeCooldown(String),
}

/// Validates every semantic constraint `"4.2 Ruleset"` places on a
/// deserialized [`Ruleset`], returning the first violation found.
pub fn validate_ruleset(ruleset: &Ruleset) -> Result<(), RuleError> {
    let mut seen = std::collections::HashSet::new();
    for (index, rule) in ruleset.scenarios.iter().enumerate() {
        let rule_id = rule.rule_id.as_str();
        if rule_id.is_empty() {
            return Err(RuleError::EmptyRuleId(index));
        }
        if !seen.insert(rule_id) {
            return Err(RuleError::DuplicateRuleId(rule_id.to_string()));
        }
        ensure_exactly_one_trigger(rule_id, rule.event.is_some(), rule.threshold.is_some())?;
        ensure_non_negative_window(rule_id, rule.window.pre_s, rule.window.post_s)?;
        if let Some(threshold) = &rule.threshold {
            ensure_known_op(rule_id, &threshold.op)?;
            ensure_non_negative_for_s(rule_id, threshold.for_s)?;
            ensure_non_negative_min_gap(rule_id, threshold.min_gap_s)?;
            ensure_non_negative_cooldown(rule_id, threshold.cooldown_s)?;
        }
    }
    Ok(())
}

fn ensure_exactly_one_trigger(rule_id: &str, has_event: bool, has_threshold: bool) -> Result<(), RuleError> {
    if has_event == has_threshold {
        return Err(RuleError::ExactlyOneTrigger(rule_id.to_string()));
    }
    Ok(())
}

fn ensure_non_negative_window(rule_id: &str, pre_s: f64, post_s: f64) -> Result<(), RuleError> {
    if pre_s < 0.0 || post_s < 0.0 {
        return Err(RuleError::NegativeWindow(rule_id.to_string()));
    }
    Ok(())
}

fn ensure_known_op(rule_id: &str, op: &str) -> Result<(), RuleError> {
    if crate::rules::model::Op::parse(op).is_none() {
        return Err(RuleError::UnknownOp(rule_id.to_string()));
    }
    Ok(())
}

fn ensure_non_negative_for_s(rule_id: &str, for_s: f64) -> Result<(), RuleError> {
    if for_s < 0.0 {
        return Err(RuleError::NegativeForS(rule_id.to_string()));
    }
    Ok(())
}

fn ensure_non_negative_min_gap(rule_id: &str, min_gap_s: Option<f64>) -> Result<(), RuleError> {
    if min_gap_s.is_some_and(|v| v < 0.0) {
        return Err(RuleError::NegativeMinGap(rule_id.to_string()));
    }
    Ok(())
}

fn ensure_non_negative_cooldown(rule_id: &str, cooldown_s: Option<f64>) -> Result<(), RuleError> {
    if cooldown_s.is_some_and(|v| v < 0.0) {
        return Err(RuleError::NegativeCooldown(rule_id.to_string()));
    }
    Ok(())
}
