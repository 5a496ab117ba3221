/// Call dispatch and the built-in function table.
///
/// Resolves a call to a built-in or a user function, checks arity and runs
/// user functions in their own scope.
pub mod core;
/// Single-argument math built-ins.
///
/// Trigonometry, rounding, `sqrt`, `cbrt`, `exp` and `abs`, with domain
/// checks where a real result does not exist.
pub mod builtin;
/// Logarithm built-ins.
///
/// `log` and `ln` (natural), `log10` and `log2`.
pub mod log;
/// `min` and `max`.
pub mod min_max;
/// The `root` and `pow` functions.
///
/// Real n-th roots and exponentiation with domain checks.
pub mod root;
