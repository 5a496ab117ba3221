use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::numeric_args},
        value::core::Value,
    },
    util::num::as_whole_number,
};

/// `root(n, x)`: the real `n`-th root of `x`.
///
/// Odd whole-numbered roots of negative numbers are real and negative, so
/// `root(3, -8)` is `-2`.
///
/// # Errors
/// [`RuntimeError::DomainError`] when `n` is zero, or when `x` is negative
/// and `n` is even or not a whole number.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::root::root, value::core::Value};
///
/// let r = root(&[Value::Number(3.0), Value::Number(-8.0)], 1).unwrap();
/// assert_eq!(r, Value::Number(-2.0));
///
/// assert!(root(&[Value::Number(2.0), Value::Number(-4.0)], 1).is_err());
/// assert!(root(&[Value::Number(0.0), Value::Number(4.0)], 1).is_err());
/// ```
pub fn root(args: &[Value], line: usize) -> EvalResult<Value> {
    let [n, x] = numeric_args("root", args, line)?;

    if n == 0.0 {
        return Err(RuntimeError::domain("root", "degree must not be zero", line));
    }

    if x >= 0.0 {
        return Ok(Value::Number(x.powf(n.recip())));
    }

    match as_whole_number(n) {
        Some(degree) if degree % 2 != 0 => Ok(Value::Number(-(-x).powf(n.recip()))),
        Some(_) => {
            Err(RuntimeError::domain("root", format!("even root of negative number {x}"), line))
        },
        None => Err(RuntimeError::domain("root",
                                         format!("fractional root of negative number {x}"),
                                         line)),
    }
}

/// `pow(base, exponent)`, the function form of `**`.
///
/// # Errors
/// [`RuntimeError::DomainError`] when the power is undefined.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::root::pow, value::core::Value};
///
/// let r = pow(&[Value::Number(3.0), Value::Number(2.0)], 1).unwrap();
/// assert_eq!(r, Value::Number(9.0));
/// ```
pub fn pow(args: &[Value], line: usize) -> EvalResult<Value> {
    let [base, exponent] = numeric_args("pow", args, line)?;

    Value::Number(base).power(&Value::Number(exponent), line)
}
