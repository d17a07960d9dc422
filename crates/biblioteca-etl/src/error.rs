//! Per-line parse problems.
//!
//! These never abort a batch: the offending line is dropped and the warning
//! is reported alongside the import summary.

use thiserror::Error;

/// Why a single input line produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line split into fewer than the seven required fields.
    #[error("line has {found} fields (7 required): {line}\nexpected format: {expected}")]
    FieldCount {
        found: usize,
        line: String,
        expected: String,
    },
}

/// A [`ParseError`] tied to its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {error}")]
pub struct LineWarning {
    pub line_number: usize,
    pub error: ParseError,
}
