use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::numeric_args},
    value::core::Value,
};

/// Computes the minimum or maximum of two numbers.
///
/// The operation is selected by the `name` parameter, which must be `"min"`
/// or `"max"`. Both arguments are coerced to numbers.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let r = min_max("min", &[Value::Number(3.0), Value::Number(7.0)], 1).unwrap();
/// assert_eq!(r, Value::Number(3.0));
///
/// let r = min_max("max", &[Value::from("2.5"), Value::Number(1.0)], 1).unwrap();
/// assert_eq!(r, Value::Number(2.5));
/// ```
pub fn min_max(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let [a, b] = numeric_args(name, args, line)?;

    let result = if name == "min" { a.min(b) } else { a.max(b) };

    Ok(Value::Number(result))
}
