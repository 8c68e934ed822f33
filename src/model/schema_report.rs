// src/model/schema_report.rs
// ============================================================================
// Module: Robometrics Schema Report
// Description: Accumulated structural diagnostics from adapters and mining.
// Purpose: Give callers a serializable record of non-fatal diagnostics.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

/// Accumulated structural diagnostics.
///
/// Adapters append both `errors` (fatal: missing required columns,
/// unreadable files) and `warnings` (missing optional columns, non-finite
/// values). The miner only ever appends warnings (missing stream, missing
/// signal, empty window after clamping); it never adds an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Fatal structural problems.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Non-fatal structural diagnostics.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl SchemaReport {
    /// Returns true if no errors have been recorded. Warnings do not affect
    /// this.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Appends a fatal error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Appends a non-fatal warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_true_with_only_warnings() {
        let mut report = SchemaReport::default();
        report.add_warning("missing stream 'pose'");
        assert!(report.ok());
    }

    #[test]
    fn ok_is_false_with_an_error() {
        let mut report = SchemaReport::default();
        report.add_error("unreadable file");
        assert!(!report.ok());
    }
}
