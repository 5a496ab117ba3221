/// The runtime value type.
///
/// Defines the `Value` enum together with its coercions (`to_number`,
/// `to_bool`, `Display`), equality and ordering rules, and the arithmetic
/// shared by operators, compound assignment and built-ins.
pub mod core;
/// Named mathematical constants.
///
/// The lexer substitutes these names with number tokens, and the evaluator
/// resolves them when an identifier node was built by hand.
pub mod constants;
