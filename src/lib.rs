//! # gloss
//!
//! gloss is a small expression-oriented scripting language interpreter
//! written in Rust. It lexes, parses and evaluates programs with numbers,
//! strings and booleans, variables in nested scopes, loops, conditionals,
//! user-defined functions and a library of math built-ins.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{session::Interpreter, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the operator types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines the node kinds for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Renders nodes back to a readable, fully parenthesized form.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code.
/// Every error carries the source position it refers to and renders as
/// `Error on line N: ...`.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line (and, before evaluation, column) numbers.
/// - Wraps the phase errors in one umbrella type.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representation and runtime state to provide a complete runtime for source
/// code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, context and
///   values.
/// - Provides entry points for running single statements and programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General numeric helpers.
///
/// Locale-independent decimal parsing, the coercion of text to numbers and
/// checked conversion of floats to whole numbers.
pub mod util;

/// Runs a program in a fresh interpreter and returns the value of its last
/// statement.
///
/// `print` output goes to standard output.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use gloss::{get_result, interpreter::value::core::Value};
///
/// let value = get_result("x = 2; y = x ** 3; y + 1").unwrap();
/// assert_eq!(value, Value::Number(9.0));
///
/// // Intentional error: 'z' is not defined.
/// assert!(get_result("y = z + 1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Value, Error> {
    Interpreter::new().execute_program(source)
}
