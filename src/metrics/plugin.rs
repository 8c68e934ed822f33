// src/metrics/plugin.rs
// ============================================================================
// Module: Robometrics Plugin Registration
// Description: The boundary an external dynamic loader implements.
// Purpose: Let a plugin register metrics through the same path builtins use.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate does not load `.so`/`.dylib`/`.dll` files itself; that is an
//! adapter-layer concern (e.g. a `libloading`-based loader). It defines the
//! [`PluginSource`] trait such a loader implements, and [`load_plugin`],
//! which drives it: load specs from `path`, then register every one.

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::metrics::context::MetricSpec;
use crate::metrics::registry::global;
use crate::metrics::registry::RegistryError;

/// Errors raised while loading or registering a plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin file does not exist.
    #[error("plugin not found: {0}")]
    NotFound(PathBuf),
    /// The plugin file exists but could not be loaded.
    #[error("failed to load plugin {path}: {reason}")]
    LoadFailed {
        /// Path to the plugin that failed to load.
        path: PathBuf,
        /// Loader-supplied reason.
        reason: String,
    },
    /// A spec returned by the loader could not be registered.
    #[error("failed to register metric from plugin: {0}")]
    Registration(#[from] RegistryError),
}

/// Implemented by an external dynamic loader to resolve a plugin file into
/// the [`MetricSpec`]s it contributes.
pub trait PluginSource {
    /// Loads `path`, returning the metric specs it registers.
    ///
    /// # Errors
    /// Returns [`PluginError::NotFound`] if `path` does not exist, or
    /// [`PluginError::LoadFailed`] if it exists but cannot be loaded.
    fn load(&self, path: &Path) -> Result<Vec<MetricSpec>, PluginError>;
}

/// Loads `path` through `source`, then registers every spec it returns.
///
/// # Errors
/// Propagates [`PluginError`] from `source.load`, or
/// [`PluginError::Registration`] if a returned spec's name collides with
/// one already registered.
pub fn load_plugin(source: &dyn PluginSource, path: &Path) -> Result<(), PluginError> {
    let specs = source.load(path)?;
    let mut registry = global().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    for spec in specs {
        let name = spec.name.clone();
        registry.register(spec)?;
        tracing::info!(metric = %name, path = %path.display(), "registered plugin metric");
    }
    Ok(())
}
