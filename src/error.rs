use thiserror::Error;

/// Lexing errors.
///
/// The lexer is deliberately forgiving: unknown characters become `Invalid`
/// tokens that the parser rejects later. The only failure the lexer reports
/// itself is a string literal that never closes.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning a token sequence
/// into an AST: unexpected or missing tokens, malformed literals and invalid
/// assignment targets. Every variant carries the line and column of the
/// offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// undefined names, arity mismatches, division by zero or math domain
/// violations.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced by one pass through the pipeline.
///
/// `Interpreter::execute` is the single place where these are caught; all
/// lower layers return their own, narrower error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token sequence is not a valid statement.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
