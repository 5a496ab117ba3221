use thiserror::Error;

/// Represents all errors that can occur while parsing a token sequence.
///
/// Every variant records the position of the token that triggered it so a
/// front end can point at the offending spot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token other than the one the grammar expects here.
    #[error("Error on line {line}, column {column}: {expected}, found '{found}'.")]
    UnexpectedToken {
        /// What the parser was looking for, phrased for humans.
        expected: String,
        /// Text of the token that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Reached the end of input while a construct was still open.
    #[error("Error on line {line}, column {column}: Unexpected end of input, {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The left side of an assignment is not a plain identifier.
    #[error("Error on line {line}, column {column}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line of the assignment operator.
        line:   usize,
        /// The source column of the assignment operator.
        column: usize,
    },
    /// The lexer produced an `Invalid` token for a character it does not know.
    #[error("Error on line {line}, column {column}: Invalid character '{character}'.")]
    InvalidCharacter {
        /// The rejected character.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// A numeric literal could not be converted, e.g. `1.2.3`.
    #[error("Error on line {line}, column {column}: Invalid number literal '{text}'.")]
    InvalidNumber {
        /// The raw literal text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A complete statement was parsed but more tokens follow it.
    #[error("Error on line {line}, column {column}: Unexpected '{found}' after the end of the statement.")]
    TrailingTokens {
        /// Text of the first extra token.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Parentheses, prefix operators, powers or blocks nested past the
    /// configured limit.
    #[error("Error on line {line}, column {column}: Expression nested more than {limit} levels deep.")]
    NestingTooDeep {
        /// The configured maximum nesting depth.
        limit:  usize,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl ParseError {
    /// Line of the offending token.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::InvalidCharacter { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::TrailingTokens { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }

    /// Column of the offending token.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::UnexpectedToken { column, .. }
            | Self::UnexpectedEndOfInput { column, .. }
            | Self::InvalidAssignmentTarget { column, .. }
            | Self::InvalidCharacter { column, .. }
            | Self::InvalidNumber { column, .. }
            | Self::TrailingTokens { column, .. }
            | Self::NestingTooDeep { column, .. } => *column,
        }
    }

    /// The human-readable part of the error, without the position prefix.
    ///
    /// # Example
    /// ```
    /// use gloss::error::ParseError;
    ///
    /// let error = ParseError::InvalidAssignmentTarget { line: 1, column: 7 };
    /// assert_eq!(error.message(), "Invalid assignment target.");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        let full = self.to_string();
        match full.split_once(": ") {
            Some((_, message)) => message.to_string(),
            None => full,
        }
    }
}
