// End record ("9") - only the field count is checked

use super::{RecordCheck, RecordContext};
use crate::rules::check_field_count;

pub const MIN_FIELDS: usize = 2;

pub fn validate(ctx: &RecordContext<'_>) -> RecordCheck {
    match check_field_count(ctx.fields, MIN_FIELDS, "end", ctx.line) {
        Some(diag) => RecordCheck::rejected(diag),
        None => RecordCheck::default(),
    }
}
