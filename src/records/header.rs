// Header record ("1") - originator and execution date
//
// Layout (0-based):
//   0 record kind   1 type code        2 character-set code
//   3 client code   4 client name      5 execution date (MMDD)
//   6 originator bank code   7..12 names, branch, account

use super::{RecordCheck, RecordContext};
use crate::rules::{check_field_count, run_checks, FieldCheck, FieldRule};

pub const MIN_FIELDS: usize = 13;

/// Type code for general transfers
pub const TYPE_CODE: &str = "21";

/// Character-set code (JIS)
pub const CHARSET_CODE: &str = "0";

fn header_checks(originator_bank_code: &str) -> Vec<FieldCheck> {
    vec![
        FieldCheck::new(1, "type code", FieldRule::literal(TYPE_CODE)),
        FieldCheck::new(2, "character-set code", FieldRule::literal(CHARSET_CODE)),
        FieldCheck::new(3, "client code", FieldRule::digits(10)),
        FieldCheck::new(5, "execution date", FieldRule::digits(4)),
        FieldCheck::new(
            6,
            "originator bank code",
            FieldRule::literal(originator_bank_code),
        ),
    ]
}

pub fn validate(ctx: &RecordContext<'_>) -> RecordCheck {
    if let Some(diag) = check_field_count(ctx.fields, MIN_FIELDS, "header", ctx.line) {
        return RecordCheck::rejected(diag);
    }

    let checks = header_checks(&ctx.config.originator_bank_code);
    RecordCheck::new(run_checks(&checks, ctx.fields, ctx.line), 0)
}
