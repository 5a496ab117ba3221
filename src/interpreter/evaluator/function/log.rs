use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::numeric_args},
        value::core::Value,
    },
};

/// Natural logarithm, registered as both `log` and `ln`.
///
/// `name` is the name the function was called by and appears in errors.
///
/// # Errors
/// [`RuntimeError::DomainError`] for zero or negative input.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::log::log, value::core::Value};
///
/// let e = std::f64::consts::E;
/// assert_eq!(log("ln", &[Value::Number(e)], 1).unwrap(), Value::Number(1.0));
/// assert!(log("log", &[Value::Number(0.0)], 1).is_err());
/// ```
pub fn log(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = numeric_args(name, args, line)?;
    check_positive(name, x, line)?;

    Ok(Value::Number(x.ln()))
}

/// Base-10 logarithm.
///
/// # Errors
/// [`RuntimeError::DomainError`] for zero or negative input.
pub fn log10(args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = numeric_args("log10", args, line)?;
    check_positive("log10", x, line)?;

    Ok(Value::Number(x.log10()))
}

/// Base-2 logarithm.
///
/// # Errors
/// [`RuntimeError::DomainError`] for zero or negative input.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::log::log2, value::core::Value};
///
/// assert_eq!(log2(&[Value::Number(8.0)], 1).unwrap(), Value::Number(3.0));
/// ```
pub fn log2(args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = numeric_args("log2", args, line)?;
    check_positive("log2", x, line)?;

    Ok(Value::Number(x.log2()))
}

fn check_positive(function: &str, x: f64, line: usize) -> EvalResult<()> {
    if x > 0.0 {
        Ok(())
    } else {
        Err(RuntimeError::domain(function, format!("{x} is not positive"), line))
    }
}
