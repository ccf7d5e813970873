//! Parse error type

use thiserror::Error;

/// A commit message did not match the grammar.
///
/// Positions are 1-based and point at the first unexpected character or
/// condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    /// Line of the failure
    pub line: usize,
    /// Column of the failure, counted in characters
    pub column: usize,
    /// What was expected
    pub message: String,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Position as a `(line, column)` pair
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}
