// Data record ("2") - one transfer instruction per payee
//
// Layout (0-based):
//   1 payee bank code   3 payee branch code   6 deposit type
//   7 account number    9 transfer amount    10 new-registration code

use super::{RecordCheck, RecordContext};
use crate::diagnostics::Diagnostic;
use crate::parser::field_value;
use crate::rules::{check_field_count, parse_digits, run_checks, FieldCheck, FieldRule};

pub const MIN_FIELDS: usize = 15;

/// 1 = ordinary, 2 = current, 4 = savings
pub const DEPOSIT_TYPES: &[&str] = &["1", "2", "4"];

pub const AMOUNT_INDEX: usize = 9;
pub const AMOUNT_MAX_DIGITS: usize = 10;

fn data_checks() -> Vec<FieldCheck> {
    vec![
        FieldCheck::new(1, "payee bank code", FieldRule::digits(4)),
        FieldCheck::new(3, "payee branch code", FieldRule::digits(3)),
        FieldCheck::new(6, "deposit type", FieldRule::OneOf(DEPOSIT_TYPES)),
        FieldCheck::new(7, "payee account number", FieldRule::digits_between(1, 7)),
    ]
}

/// Validated amount, or None when the field is malformed or zero
fn transfer_amount(raw: &str) -> Option<u64> {
    parse_digits(raw, AMOUNT_MAX_DIGITS).filter(|amount| *amount > 0)
}

pub fn validate(ctx: &RecordContext<'_>) -> RecordCheck {
    if let Some(diag) = check_field_count(ctx.fields, MIN_FIELDS, "data", ctx.line) {
        return RecordCheck::rejected(diag);
    }

    let mut diagnostics = run_checks(&data_checks(), ctx.fields, ctx.line);

    let raw_amount = field_value(ctx.fields, AMOUNT_INDEX);
    let amount = match transfer_amount(&raw_amount) {
        Some(amount) => amount,
        None => {
            diagnostics.push(
                Diagnostic::syntax(
                    ctx.line,
                    format!(
                        "transfer amount must be a positive number of 1-{} digits (actual: \"{}\")",
                        AMOUNT_MAX_DIGITS, raw_amount
                    ),
                )
                .with_field("transfer amount"),
            );
            0
        }
    };

    let new_code = FieldCheck::new(10, "new-registration code", FieldRule::literal("1"));
    diagnostics.extend(new_code.check(ctx.fields, ctx.line));

    RecordCheck::new(diagnostics, amount)
}
