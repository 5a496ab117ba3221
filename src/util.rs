/// Numeric conversion helpers.
///
/// Text-to-number coercion used by `Value::to_number` and the parser, and
/// safe float-to-integer classification used by built-ins that care whether
/// an argument is a whole number.
pub mod num;
