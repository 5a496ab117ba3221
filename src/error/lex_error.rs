use thiserror::Error;

/// Represents all errors the lexer reports on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `"` was opened but the input ended before the closing quote.
    #[error("Error on line {line}, column {column}: Unterminated string literal.")]
    UnterminatedString {
        /// Line of the opening quote.
        line:   usize,
        /// Column of the opening quote.
        column: usize,
    },
}

impl LexError {
    /// Line where the error starts.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line, .. } => *line,
        }
    }

    /// Column where the error starts.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::UnterminatedString { column, .. } => *column,
        }
    }
}
