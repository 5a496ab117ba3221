use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::numeric_args},
        value::core::Value,
    },
};

/// Applies a unary real function to the numeric coercion of one argument.
///
/// The generated functions accept exactly one argument and never fail on
/// its value.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::builtin::sin, value::core::Value};
///
/// let x = Value::Number(std::f64::consts::PI / 2.0);
/// let r = sin(&[x], 1).unwrap();
///
/// assert_eq!(r, Value::Number(1.0));
/// ```
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            let [x] = numeric_args(stringify!($fname), args, line)?;
            Ok(Value::Number(x.$real_fn()))
        }
    };
}

real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);
real_builtin!(atan, atan);
real_builtin!(cbrt, cbrt);
real_builtin!(exp, exp);
real_builtin!(abs, abs);
real_builtin!(floor, floor);
real_builtin!(ceil, ceil);
real_builtin!(round, round);

/// Square root of a non-negative number.
///
/// # Errors
/// [`RuntimeError::DomainError`] for negative input.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::builtin::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::Number(16.0)], 1).unwrap(), Value::Number(4.0));
/// assert!(sqrt(&[Value::Number(-1.0)], 1).is_err());
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = numeric_args("sqrt", args, line)?;

    if x < 0.0 {
        return Err(RuntimeError::domain("sqrt", format!("{x} is negative"), line));
    }

    Ok(Value::Number(x.sqrt()))
}

/// Arc sine; the argument must lie in `[-1, 1]`.
///
/// # Errors
/// [`RuntimeError::DomainError`] outside of `[-1, 1]`.
pub fn asin(args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = numeric_args("asin", args, line)?;
    check_unit_interval("asin", x, line)?;

    Ok(Value::Number(x.asin()))
}

/// Arc cosine; the argument must lie in `[-1, 1]`.
///
/// # Errors
/// [`RuntimeError::DomainError`] outside of `[-1, 1]`.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::builtin::acos, value::core::Value};
///
/// assert_eq!(acos(&[Value::Number(1.0)], 1).unwrap(), Value::Number(0.0));
/// assert!(acos(&[Value::Number(1.5)], 1).is_err());
/// ```
pub fn acos(args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = numeric_args("acos", args, line)?;
    check_unit_interval("acos", x, line)?;

    Ok(Value::Number(x.acos()))
}

fn check_unit_interval(function: &str, x: f64, line: usize) -> EvalResult<()> {
    if (-1.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(RuntimeError::domain(function, format!("{x} is outside [-1, 1]"), line))
    }
}
