// 📏 Field Rules - Rules as Data
// Shape predicates shared by every record validator
//
// Digit rules are exact: ASCII '0'..='9' only, length inside the bounds.
// Full-width or other Unicode digits are rejected.

use crate::diagnostics::Diagnostic;
use crate::parser::field_value;

// ============================================================================
// PREDICATES
// ============================================================================

/// True when `value` is between `min` and `max` ASCII digits long
pub fn is_ascii_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a value that already passed `is_ascii_digits`
///
/// Returns None for anything else, including overflow.
pub fn parse_digits(value: &str, max: usize) -> Option<u64> {
    if !is_ascii_digits(value, 1, max) {
        return None;
    }
    value.parse::<u64>().ok()
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must equal the literal
    Literal(String),
    /// Value must be `min..=max` ASCII digits
    Digits { min: usize, max: usize },
    /// Value must be one of the listed literals
    OneOf(&'static [&'static str]),
}

impl FieldRule {
    pub fn literal(value: &str) -> Self {
        FieldRule::Literal(value.to_string())
    }

    pub fn digits(count: usize) -> Self {
        FieldRule::Digits {
            min: count,
            max: count,
        }
    }

    pub fn digits_between(min: usize, max: usize) -> Self {
        FieldRule::Digits { min, max }
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FieldRule::Literal(expected) => value == expected,
            FieldRule::Digits { min, max } => is_ascii_digits(value, *min, *max),
            FieldRule::OneOf(allowed) => allowed.contains(&value),
        }
    }

    /// Failure message for `value`
    pub fn describe_failure(&self, label: &str, value: &str) -> String {
        match self {
            FieldRule::Literal(expected) => {
                format!("{} must be \"{}\" (actual: \"{}\")", label, expected, value)
            }
            FieldRule::Digits { min, max } if min == max => {
                format!("{} must be exactly {} digits (actual: \"{}\")", label, min, value)
            }
            FieldRule::Digits { min, max } => {
                format!("{} must be {}-{} digits (actual: \"{}\")", label, min, max, value)
            }
            FieldRule::OneOf(allowed) => {
                let quoted: Vec<String> = allowed.iter().map(|a| format!("\"{}\"", a)).collect();
                format!(
                    "{} must be one of {} (actual: \"{}\")",
                    label,
                    quoted.join(", "),
                    value
                )
            }
        }
    }
}

/// A rule bound to a field position
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub index: usize,
    pub label: &'static str,
    pub rule: FieldRule,
}

impl FieldCheck {
    pub fn new(index: usize, label: &'static str, rule: FieldRule) -> Self {
        FieldCheck { index, label, rule }
    }

    /// Run the check against a parsed line; None when the field passes
    pub fn check(&self, fields: &[String], line: usize) -> Option<Diagnostic> {
        let value = field_value(fields, self.index);
        if self.rule.accepts(&value) {
            return None;
        }

        Some(
            Diagnostic::syntax(line, self.rule.describe_failure(self.label, &value))
                .with_field(self.label),
        )
    }
}

/// Run every check independently, in order
pub fn run_checks(checks: &[FieldCheck], fields: &[String], line: usize) -> Vec<Diagnostic> {
    checks
        .iter()
        .filter_map(|c| c.check(fields, line))
        .collect()
}

/// The field-count guard every record validator starts with
pub fn check_field_count(
    fields: &[String],
    minimum: usize,
    record_name: &str,
    line: usize,
) -> Option<Diagnostic> {
    if fields.len() >= minimum {
        return None;
    }

    Some(Diagnostic::syntax(
        line,
        format!(
            "{} record has missing fields (expected at least {}, found {})",
            record_name,
            minimum,
            fields.len()
        ),
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fields;

    #[test]
    fn test_is_ascii_digits_bounds() {
        assert!(is_ascii_digits("0036", 4, 4));
        assert!(!is_ascii_digits("036", 4, 4));
        assert!(!is_ascii_digits("00360", 4, 4));
        assert!(!is_ascii_digits("", 1, 7));
        assert!(is_ascii_digits("1234567", 1, 7));
        assert!(!is_ascii_digits("12345678", 1, 7));
    }

    #[test]
    fn test_is_ascii_digits_rejects_non_ascii_digits() {
        // Full-width digits
        assert!(!is_ascii_digits("０６０１", 4, 4));
        // Arabic-Indic digits
        assert!(!is_ascii_digits("٠٦٠١", 4, 4));
        assert!(!is_ascii_digits("06 1", 4, 4));
        assert!(!is_ascii_digits("-601", 4, 4));
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("0001000", 10), Some(1000));
        assert_eq!(parse_digits("999999999999", 12), Some(999_999_999_999));
        assert_eq!(parse_digits("12a", 10), None);
        assert_eq!(parse_digits("12345678901", 10), None);
    }

    #[test]
    fn test_rule_accepts() {
        assert!(FieldRule::literal("21").accepts("21"));
        assert!(!FieldRule::literal("21").accepts("021"));
        assert!(FieldRule::OneOf(&["1", "2", "4"]).accepts("4"));
        assert!(!FieldRule::OneOf(&["1", "2", "4"]).accepts("3"));
        assert!(FieldRule::digits(3).accepts("001"));
        assert!(FieldRule::digits_between(1, 7).accepts("7"));
    }

    #[test]
    fn test_describe_failure_reports_expected_and_actual() {
        let msg = FieldRule::literal("0036").describe_failure("originator bank code", "0005");
        assert!(msg.contains("\"0036\""));
        assert!(msg.contains("\"0005\""));

        let msg = FieldRule::digits(10).describe_failure("client code", "123");
        assert_eq!(msg, "client code must be exactly 10 digits (actual: \"123\")");

        let msg = FieldRule::OneOf(&["1", "2", "4"]).describe_failure("deposit type", "9");
        assert!(msg.contains("\"1\", \"2\", \"4\""));
    }

    #[test]
    fn test_field_check_strips_quotes() {
        let fields = parse_fields("1,\"21\"");
        let check = FieldCheck::new(1, "type code", FieldRule::literal("21"));

        assert!(check.check(&fields, 1).is_none());
    }

    #[test]
    fn test_run_checks_reports_each_failure() {
        let fields = parse_fields("x,1,2");
        let checks = vec![
            FieldCheck::new(1, "a", FieldRule::literal("9")),
            FieldCheck::new(2, "b", FieldRule::literal("2")),
            FieldCheck::new(0, "c", FieldRule::digits(1)),
        ];

        let diags = run_checks(&checks, &fields, 7);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].field.as_deref(), Some("a"));
        assert_eq!(diags[1].field.as_deref(), Some("c"));
        assert!(diags.iter().all(|d| d.line == 7));
    }

    #[test]
    fn test_check_field_count() {
        let fields = parse_fields("9");
        let diag = check_field_count(&fields, 2, "end", 4).unwrap();

        assert!(diag.message.contains("missing fields"));
        assert_eq!(diag.line, 4);
        assert!(check_field_count(&parse_fields("9,"), 2, "end", 4).is_none());
    }
}
