/// Core evaluation logic.
///
/// Contains the `Evaluator`, its settings and output sinks, the
/// `ControlFlow` signal and the dispatch over node kinds.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, short-circuit logic and the assignment
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, logical NOT and the increment and decrement forms.
pub mod unary;

/// Control flow evaluation.
///
/// Evaluates `if`, `while`, `for` and blocks, managing block scopes.
pub mod control;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
