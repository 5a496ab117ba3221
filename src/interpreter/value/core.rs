use std::{cmp::Ordering, fmt};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult, util::num};

/// Represents a runtime value in the interpreter.
///
/// Every expression, assignment, function return and condition produces one
/// of these. Values are immutable; operations build new values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value. Produced by statements, empty blocks and bare
    /// `return`.
    #[default]
    Null,
    /// A boolean value (`true` or `false`).
    Boolean(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A text value.
    String(String),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl Value {
    /// Converts the value to a number.
    ///
    /// Strings are parsed after trimming and yield `0` when they do not hold
    /// a decimal number. Booleans map to `0`/`1`, `null` to `0`.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(" 2.5 ").to_number(), 2.5);
    /// assert_eq!(Value::from("abc").to_number(), 0.0);
    /// assert_eq!(Value::Boolean(true).to_number(), 1.0);
    /// assert_eq!(Value::Null.to_number(), 0.0);
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Boolean(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => num::coerce_decimal(s),
        }
    }

    /// Truthiness of the value.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(-1.0).to_bool());
    /// assert!(!Value::Number(0.0).to_bool());
    /// assert!(Value::from("0").to_bool());
    /// assert!(!Value::from("").to_bool());
    /// assert!(!Value::Null.to_bool());
    /// ```
    #[must_use]
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }

    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Orders two values.
    ///
    /// Two strings compare lexicographically; every other pair compares the
    /// numeric coercions of both sides. `None` when a NaN is involved.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use gloss::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("apple").compare(&Value::from("banana")), Some(Ordering::Less));
    /// assert_eq!(Value::from("10").compare(&Value::Number(9.0)), Some(Ordering::Greater));
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }

    /// `+`: concatenates when either side is a string, adds numerically
    /// otherwise.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.0).sum(&Value::Number(3.0)), Value::Number(5.0));
    /// assert_eq!(Value::from("x = ").sum(&Value::Number(1.5)), Value::from("x = 1.5"));
    /// ```
    #[must_use]
    pub fn sum(&self, other: &Self) -> Self {
        if matches!(self, Self::String(_)) || matches!(other, Self::String(_)) {
            return Self::String(format!("{self}{other}"));
        }

        Self::Number(self.to_number() + other.to_number())
    }

    /// `-`
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self::Number(self.to_number() - other.to_number())
    }

    /// `*`
    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        Self::Number(self.to_number() * other.to_number())
    }

    /// `/`: numeric division.
    ///
    /// # Errors
    /// [`RuntimeError::DivisionByZero`] when the divisor coerces to zero.
    pub fn quotient(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let divisor = other.to_number();
        if divisor == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }

        Ok(Self::Number(self.to_number() / divisor))
    }

    /// `mod`: floating remainder carrying the sign of the dividend.
    ///
    /// # Errors
    /// [`RuntimeError::ModuloByZero`] when the divisor coerces to zero.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::value::core::Value;
    ///
    /// let r = Value::Number(-7.0).remainder(&Value::Number(3.0), 1).unwrap();
    /// assert_eq!(r, Value::Number(-1.0));
    /// ```
    pub fn remainder(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let divisor = other.to_number();
        if divisor == 0.0 {
            return Err(RuntimeError::ModuloByZero { line });
        }

        Ok(Self::Number(self.to_number() % divisor))
    }

    /// `div`: quotient truncated toward zero.
    ///
    /// # Errors
    /// [`RuntimeError::DivisionByZero`] when the divisor coerces to zero.
    pub fn truncated_quotient(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let divisor = other.to_number();
        if divisor == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }

        Ok(Self::Number((self.to_number() / divisor).trunc()))
    }

    /// `**` and `^`.
    ///
    /// # Errors
    /// [`RuntimeError::DomainError`] when zero is raised to a negative power
    /// or the result is undefined (e.g. a negative base with a fractional
    /// exponent).
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::value::core::Value;
    ///
    /// let v = Value::Number(2.0).power(&Value::Number(10.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(1024.0));
    /// assert!(Value::Number(-8.0).power(&Value::Number(0.5), 1).is_err());
    /// ```
    pub fn power(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let base = self.to_number();
        let exponent = other.to_number();

        if base == 0.0 && exponent < 0.0 {
            return Err(RuntimeError::domain("power", "zero raised to a negative power", line));
        }

        let result = base.powf(exponent);
        if result.is_nan() && !base.is_nan() && !exponent.is_nan() {
            return Err(RuntimeError::domain("power", "result is undefined", line));
        }

        Ok(Self::Number(result))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}
