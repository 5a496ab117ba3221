/// Parser entry points and shared result type.
///
/// Contains `parse` for a single statement, `parse_program` for a sequence of
/// statements with error recovery, and the lowest precedence level.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from assignment down to
/// exponentiation.
pub mod binary;

/// Unary, postfix and primary expression parsing.
///
/// Handles prefix operators, postfix increments, literals, identifiers,
/// calls, parenthesized expressions and conditional expressions.
pub mod unary;

/// Statement parsing.
///
/// Implements `if`, `while`, `for`, `function`, `return` and `print`, falling
/// back to expression statements.
pub mod statement;

/// Block parsing.
///
/// Parses braced statement sequences.
pub mod block;

/// Utility functions for the parser.
///
/// Token lookahead, expectations and the error constructors shared by all
/// levels.
pub mod utils;

pub use self::core::{
    MAX_NESTING_DEPTH, ParseResult, parse, parse_program, parse_program_with_limit,
    parse_with_limit,
};
