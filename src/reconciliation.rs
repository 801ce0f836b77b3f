// ⚖️ Reconciliation - Structural aggregator
// Folds record outcomes into a running tally, then checks the file as a whole
//
// File-level checks, in order:
//   1. exactly one header   2. exactly one trailer   3. exactly one end
//   4. sum(data amounts) = trailer total   (skipped when the declared total is 0)
//
// All file-level diagnostics use line 0.

use crate::diagnostics::{format_amount, Diagnostic, ValidationSummary};
use crate::records::{RecordCheck, RecordKind};

// ============================================================================
// TALLY (the accumulator)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub header_count: usize,
    pub data_count: usize,
    pub trailer_count: usize,
    pub end_count: usize,
    /// Sum of validated data-record amounts
    pub total_data_amount: u64,
    /// Declared total from the most recent trailer
    pub declared_total_amount: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified record into the tally
    ///
    /// Unknown records change nothing.
    pub fn record(mut self, kind: &RecordKind, check: &RecordCheck) -> Self {
        match kind {
            RecordKind::Header => self.header_count += 1,
            RecordKind::Data => {
                self.data_count += 1;
                self.total_data_amount = self.total_data_amount.saturating_add(check.amount);
            }
            RecordKind::Trailer => {
                self.trailer_count += 1;
                self.declared_total_amount = check.amount;
            }
            RecordKind::End => self.end_count += 1,
            RecordKind::Unknown(_) => {}
        }
        self
    }

    pub fn into_summary(self, total_lines: usize) -> ValidationSummary {
        ValidationSummary {
            total_lines,
            header_count: self.header_count,
            data_count: self.data_count,
            trailer_count: self.trailer_count,
            end_count: self.end_count,
            total_data_amount: self.total_data_amount,
            declared_total_amount: self.declared_total_amount,
        }
    }
}

// ============================================================================
// FILE-LEVEL CHECKS
// ============================================================================

/// Structural pre-check on the number of non-empty lines
pub fn check_min_lines(total_lines: usize, min_lines: usize) -> Option<Diagnostic> {
    if total_lines >= min_lines {
        return None;
    }

    Some(Diagnostic::syntax(
        0,
        format!(
            "minimum {} lines required (header, data, trailer, end); found {}",
            min_lines, total_lines
        ),
    ))
}

fn check_cardinality(kind: &str, count: usize) -> Option<Diagnostic> {
    if count == 1 {
        return None;
    }

    Some(Diagnostic::logic(
        0,
        format!("exactly one {} record required (found {})", kind, count),
    ))
}

/// Cardinality and amount reconciliation over a finished tally
pub fn reconcile(tally: &Tally) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = [
        check_cardinality("header", tally.header_count),
        check_cardinality("trailer", tally.trailer_count),
        check_cardinality("end", tally.end_count),
    ]
    .into_iter()
    .flatten()
    .collect();

    // Declared total 0 means malformed or missing trailer: already reported there
    if tally.declared_total_amount > 0 && tally.total_data_amount != tally.declared_total_amount {
        diagnostics.push(Diagnostic::logic(
            0,
            format!(
                "total amount mismatch (expected {}, actual {})",
                format_amount(tally.declared_total_amount),
                format_amount(tally.total_data_amount)
            ),
        ));
    }

    diagnostics
}

// ============================================================================
// TESTS
// ============================================================================
