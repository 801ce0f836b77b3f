// Trailer record ("8") - declared request count and total amount
//
// The count is checked against data records seen BEFORE the trailer.
// The declared total is returned and reconciled at file level.

use super::{RecordCheck, RecordContext};
use crate::diagnostics::Diagnostic;
use crate::parser::field_value;
use crate::rules::{check_field_count, parse_digits};

pub const MIN_FIELDS: usize = 4;

const COUNT_MAX_DIGITS: usize = 6;
const TOTAL_MAX_DIGITS: usize = 12;

pub fn validate(ctx: &RecordContext<'_>) -> RecordCheck {
    if let Some(diag) = check_field_count(ctx.fields, MIN_FIELDS, "trailer", ctx.line) {
        return RecordCheck::rejected(diag);
    }

    let mut diagnostics = Vec::new();

    let raw_count = field_value(ctx.fields, 1);
    match parse_digits(&raw_count, COUNT_MAX_DIGITS) {
        Some(declared) if declared != ctx.data_seen as u64 => {
            diagnostics.push(
                Diagnostic::logic(
                    ctx.line,
                    format!(
                        "request count mismatch (expected {}, actual {})",
                        ctx.data_seen, declared
                    ),
                )
                .with_field("request count"),
            );
        }
        Some(_) => {}
        None => {
            diagnostics.push(
                Diagnostic::syntax(
                    ctx.line,
                    format!(
                        "request count must be 1-{} digits (actual: \"{}\")",
                        COUNT_MAX_DIGITS, raw_count
                    ),
                )
                .with_field("request count"),
            );
        }
    }

    let raw_total = field_value(ctx.fields, 2);
    let declared_total = match parse_digits(&raw_total, TOTAL_MAX_DIGITS) {
        Some(total) => total,
        None => {
            diagnostics.push(
                Diagnostic::syntax(
                    ctx.line,
                    format!(
                        "request total amount must be 1-{} digits (actual: \"{}\")",
                        TOTAL_MAX_DIGITS, raw_total
                    ),
                )
                .with_field("request total amount"),
            );
            0
        }
    };

    RecordCheck::new(diagnostics, declared_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::parse_fields;

    fn run(line: &str, data_seen: usize) -> RecordCheck {
        let config = ValidatorConfig::default();
        let fields = parse_fields(line);
        validate(&RecordContext {
            fields: &fields,
            line: 3,
            data_seen,
            config: &config,
        })
    }

    #[test]
    fn test_valid_trailer_returns_declared_total() {
        let check = run("8,1,1000,", 1);

        assert!(check.diagnostics.is_empty(), "{:?}", check.diagnostics);
        assert_eq!(check.amount, 1000);
    }

    #[test]
    fn test_missing_fields() {
        let check = run("8,1,1000", 1);

        assert_eq!(check.diagnostics.len(), 1);
        assert!(check.diagnostics[0].message.contains("missing fields"));
        assert_eq!(check.amount, 0);
    }

    #[test]
    fn test_count_mismatch_is_logic_error() {
        let check = run("8,2,1000,", 1);

        assert_eq!(check.diagnostics.len(), 1);
        let diag = &check.diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::Logic);
        assert_eq!(diag.message, "request count mismatch (expected 1, actual 2)");
        assert_eq!(check.amount, 1000);
    }

    #[test]
    fn test_malformed_count_skips_mismatch() {
        let check = run("8,abc,1000,", 5);

        assert_eq!(check.diagnostics.len(), 1);
        assert_eq!(check.diagnostics[0].kind, DiagnosticKind::Syntax);
        assert_eq!(check.diagnostics[0].field.as_deref(), Some("request count"));
    }

    #[test]
    fn test_count_too_long() {
        let check = run("8,0000001,1000,", 1);

        assert_eq!(check.diagnostics.len(), 1);
        assert_eq!(check.diagnostics[0].kind, DiagnosticKind::Syntax);
    }

    #[test]
    fn test_malformed_total_returns_zero() {
        let check = run("8,1,1000000000000,", 1);

        assert_eq!(check.diagnostics.len(), 1);
        assert_eq!(
            check.diagnostics[0].field.as_deref(),
            Some("request total amount")
        );
        assert_eq!(check.amount, 0);
    }

    #[test]
    fn test_both_fields_malformed() {
        let check = run("8,,x,", 0);

        assert_eq!(check.diagnostics.len(), 2);
        assert_eq!(check.amount, 0);
    }

    #[test]
    fn test_zero_count_matches_no_data() {
        let check = run("8,000000,0,", 0);

        assert!(check.diagnostics.is_empty());
        assert_eq!(check.amount, 0);
    }
}
