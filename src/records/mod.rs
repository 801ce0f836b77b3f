// Record Kinds - one validator per record kind
//
// A Zengin file is header → data* → trailer → end. The first field of each
// line selects the kind; the kind selects the validator.

pub mod data;
pub mod end;
pub mod header;
pub mod trailer;

use crate::config::ValidatorConfig;
use crate::diagnostics::Diagnostic;
use crate::parser::field_value;

// ============================================================================
// RECORD KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    /// "1" - originator, execution date
    Header,
    /// "2" - one transfer instruction
    Data,
    /// "8" - declared count and total
    Trailer,
    /// "9" - terminal marker
    End,
    /// Anything else, with the offending value
    Unknown(String),
}

impl RecordKind {
    /// Classify by the quote-stripped first field
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => RecordKind::Header,
            "2" => RecordKind::Data,
            "8" => RecordKind::Trailer,
            "9" => RecordKind::End,
            other => RecordKind::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RecordKind::Header => "header",
            RecordKind::Data => "data",
            RecordKind::Trailer => "trailer",
            RecordKind::End => "end",
            RecordKind::Unknown(_) => "unknown",
        }
    }
}

/// Classify a parsed line
///
/// Returns None for an empty field list (nothing to classify).
pub fn classify(fields: &[String]) -> Option<RecordKind> {
    if fields.is_empty() {
        return None;
    }
    Some(RecordKind::from_code(&field_value(fields, 0)))
}

// ============================================================================
// VALIDATION CONTEXT & OUTCOME
// ============================================================================

/// Everything a record validator may look at
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub fields: &'a [String],
    /// Non-empty line number
    pub line: usize,
    /// Data records seen before this line
    pub data_seen: usize,
    pub config: &'a ValidatorConfig,
}

/// Uniform result of validating one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCheck {
    pub diagnostics: Vec<Diagnostic>,
    /// Data: validated transfer amount. Trailer: declared total. Else 0.
    pub amount: u64,
}

impl RecordCheck {
    pub fn new(diagnostics: Vec<Diagnostic>, amount: u64) -> Self {
        RecordCheck {
            diagnostics,
            amount,
        }
    }

    /// A check that stopped at the field-count guard
    pub fn rejected(diagnostic: Diagnostic) -> Self {
        RecordCheck {
            diagnostics: vec![diagnostic],
            amount: 0,
        }
    }
}

impl RecordKind {
    /// Run the kind's validator
    pub fn validate(&self, ctx: &RecordContext<'_>) -> RecordCheck {
        match self {
            RecordKind::Header => header::validate(ctx),
            RecordKind::Data => data::validate(ctx),
            RecordKind::Trailer => trailer::validate(ctx),
            RecordKind::End => end::validate(ctx),
            RecordKind::Unknown(value) => RecordCheck::rejected(
                Diagnostic::syntax(ctx.line, format!("invalid record kind: {}", value))
                    .with_field("record kind"),
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
