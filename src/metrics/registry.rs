// src/metrics/registry.rs
// ============================================================================
// Module: Robometrics Metric Registry
// Description: Process-wide name to MetricSpec mapping.
// Purpose: Give the engine and plugin loader a single source of truth.
// Dependencies: thiserror, tracing
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::OnceLock;

use thiserror::Error;

use crate::metrics::context::MetricSpec;
use crate::model::MetricName;

/// Errors raised while mutating the [`MetricRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A metric with this name is already registered.
    #[error("metric already registered: {0}")]
    DuplicateName(String),
}

/// A name to [`MetricSpec`] mapping. The process-wide instance ([`global`])
/// starts out with the built-in pack already registered; a plugin loader
/// extends it before evaluation begins.
#[derive(Default)]
pub struct MetricRegistry {
    specs: BTreeMap<MetricName, MetricSpec>,
}

impl MetricRegistry {
    /// An empty registry with no metrics registered.
    #[must_use]
    pub fn empty() -> Self {
        Self { specs: BTreeMap::new() }
    }

    fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for spec in crate::metrics::builtin::specs() {
            if registry.register(spec).is_err() {
                unreachable!("built-in metric names are unique by construction");
            }
        }
        registry
    }

    /// Registers `spec`, rejecting a name that already exists.
    pub fn register(&mut self, spec: MetricSpec) -> Result<(), RegistryError> {
        if self.specs.contains_key(&spec.name) {
            tracing::warn!(metric = %spec.name, "duplicate metric registration rejected");
            return Err(RegistryError::DuplicateName(spec.name.to_string()));
        }
        self.specs.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Looks up a registered metric by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MetricSpec> {
        self.specs.get(&MetricName::new(name)).cloned()
    }
}

static REGISTRY: OnceLock<Mutex<MetricRegistry>> = OnceLock::new();

/// The process-wide registry, initialized on first access with the
/// built-in pack already registered.
pub fn global() -> &'static Mutex<MetricRegistry> {
    REGISTRY.get_or_init(|| Mutex::new(MetricRegistry::with_builtins()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::context::MetricContext;

    fn dummy_spec(name: &str) -> MetricSpec {
        fn func(_ctx: &MetricContext) -> Result<crate::model::MetricResult, crate::metrics::context::MetricError> {
            Ok(crate::model::MetricResult::valid(1_i64, None, crate::model::Direction::Higher))
        }
        MetricSpec {
            name: MetricName::new(name),
            requires_streams: Vec::new(),
            optional_streams: Vec::new(),
            requires_events: Vec::new(),
            optional_events: Vec::new(),
            description: None,
            func,
        }
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut registry = MetricRegistry::empty();
        registry.register(dummy_spec("custom.one")).expect("first registration");
        let err = registry.register(dummy_spec("custom.one")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("custom.one".to_string()));
    }

    #[test]
    fn global_registry_has_builtins_preloaded() {
        let registry = global().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        assert!(registry.get("eff.path_efficiency").is_some());
    }
}
