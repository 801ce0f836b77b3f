// 🔎 Validation Engine - the orchestrator
// split lines → parse fields → classify → validate record → fold tally → reconcile
//
// Pure and synchronous: same text in, same report out. The scan is
// sequential because the trailer count check needs the data records
// seen before it.

use crate::config::ValidatorConfig;
use crate::diagnostics::{Diagnostic, ValidationReport};
use crate::parser::{parse_fields, split_lines};
use crate::reconciliation::{check_min_lines, reconcile, Tally};
use crate::records::{classify, RecordContext};
use tracing::debug;

// ============================================================================
// VALIDATION ENGINE
// ============================================================================

pub struct ValidationEngine {
    config: ValidatorConfig,
}

impl ValidationEngine {
    pub fn new() -> Self {
        ValidationEngine {
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        ValidationEngine { config }
    }

    /// Validate the full text of one Zengin file
    ///
    /// Never fails: empty or garbage input still yields a complete report.
    ///
    /// Example:
    /// ```
    /// use zengin_validator::ValidationEngine;
    ///
    /// let report = ValidationEngine::new().validate("");
    /// assert!(!report.valid);
    /// assert_eq!(report.summary.total_lines, 0);
    /// ```
    pub fn validate(&self, content: &str) -> ValidationReport {
        let lines = split_lines(content);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        // Structural pre-check, recorded before any line is looked at
        diagnostics.extend(check_min_lines(lines.len(), self.config.min_lines));

        let tally = lines.iter().fold(Tally::new(), |tally, line| {
            let fields = parse_fields(line.text);
            let Some(kind) = classify(&fields) else {
                return tally;
            };

            let ctx = RecordContext {
                fields: &fields,
                line: line.number,
                data_seen: tally.data_count,
                config: &self.config,
            };
            let check = kind.validate(&ctx);

            debug!(
                line = line.number,
                kind = kind.name(),
                issues = check.diagnostics.len(),
                "record checked"
            );

            let tally = tally.record(&kind, &check);
            diagnostics.extend(check.diagnostics);
            tally
        });

        diagnostics.extend(reconcile(&tally));

        let report = ValidationReport::new(diagnostics, tally.into_summary(lines.len()));
        debug!(
            lines = report.summary.total_lines,
            diagnostics = report.diagnostics.len(),
            valid = report.valid,
            "validation finished"
        );
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the standard rules
pub fn validate(content: &str) -> ValidationReport {
    ValidationEngine::new().validate(content)
}

// ============================================================================
// TESTS
// ============================================================================
