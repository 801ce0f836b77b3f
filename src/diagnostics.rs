// 🩺 Diagnostics - What the engine reports
// Every problem found in a file is data, never a panic or an Err.
//
// Order matters: diagnostics are kept in discovery order and the report
// is a pure function of the input text.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Which grammar a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Line shape does not match the record grammar
    Syntax,
    /// File is internally inconsistent (cardinality, reconciliation)
    Logic,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::Logic => "logic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,   // File is invalid
    Warning, // Advisory only, no current rule emits it
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

// ============================================================================
// DIAGNOSTIC
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Non-empty line number (1-based); 0 means file-level
    pub line: usize,
    /// Field label, when the problem is tied to one field
    pub field: Option<String>,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::Syntax,
            line,
            field: None,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn logic(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::Logic,
            line,
            field: None,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Builder pattern: attach a field label
    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    /// Builder pattern: downgrade to an advisory
    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_file_level(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_file_level() {
            write!(f, "[file]")?;
        } else {
            write!(f, "[line {}]", self.line)?;
        }

        write!(f, " {}/{}", self.kind.as_str(), self.severity.as_str())?;

        if let Some(field) = &self.field {
            write!(f, " {}:", field)?;
        }

        write!(f, " {}", self.message)
    }
}

// ============================================================================
// SUMMARY & REPORT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of non-empty lines
    pub total_lines: usize,
    pub header_count: usize,
    pub data_count: usize,
    pub trailer_count: usize,
    pub end_count: usize,
    /// Sum of amounts from data records that passed the amount rule
    pub total_data_amount: u64,
    /// Total amount field read from the trailer record
    pub declared_total_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Build a report; `valid` is derived, never passed in
    pub fn new(diagnostics: Vec<Diagnostic>, summary: ValidationSummary) -> Self {
        let valid = !diagnostics.iter().any(Diagnostic::is_error);
        ValidationReport {
            valid,
            diagnostics,
            summary,
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn summary(&self) -> String {
        let s = &self.summary;
        format!(
            "{}: {} lines (header {}, data {}, trailer {}, end {}), amount {} / declared {}, {} errors, {} warnings",
            if self.valid { "VALID" } else { "INVALID" },
            s.total_lines,
            s.header_count,
            s.data_count,
            s.trailer_count,
            s.end_count,
            format_amount(s.total_data_amount),
            format_amount(s.declared_total_amount),
            self.error_count(),
            self.warning_count()
        )
    }
}

/// Render an amount with thousands separators: 1234567 → "1,234,567"
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
