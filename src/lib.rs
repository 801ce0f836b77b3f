// Zengin Validator - Core Library
// Validation engine for Zengin bank-transfer batch files, used by the CLI and the API server

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod parser;
pub mod reconciliation;
pub mod records;
pub mod rules;

// Re-export commonly used types
pub use config::{AppConfig, ValidatorConfig};
pub use diagnostics::{
    Diagnostic, DiagnosticKind, Severity, ValidationReport, ValidationSummary,
};
pub use engine::{validate, ValidationEngine};
pub use parser::{parse_fields, split_lines, strip_quotes, SourceLine};
pub use reconciliation::Tally;
pub use records::{classify, RecordCheck, RecordContext, RecordKind};
pub use rules::{FieldCheck, FieldRule};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
