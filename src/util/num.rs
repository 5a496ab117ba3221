/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parses decimal text into an `f64` without consulting any locale.
///
/// Leading and trailing whitespace is ignored. Returns `None` when the text
/// is not a complete number.
///
/// ## Example
/// ```
/// use gloss::util::num::parse_decimal;
///
/// assert_eq!(parse_decimal(" 2.5 "), Some(2.5));
/// assert_eq!(parse_decimal("-7"), Some(-7.0));
/// assert_eq!(parse_decimal("1.2.3"), None);
/// assert_eq!(parse_decimal("abc"), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Coerces text to a number the way the language does: anything that does
/// not parse becomes `0`.
///
/// ## Example
/// ```
/// use gloss::util::num::coerce_decimal;
///
/// assert_eq!(coerce_decimal("42"), 42.0);
/// assert_eq!(coerce_decimal("forty-two"), 0.0);
/// assert_eq!(coerce_decimal(""), 0.0);
/// ```
#[must_use]
pub fn coerce_decimal(text: &str) -> f64 {
    parse_decimal(text).unwrap_or(0.0)
}

/// Returns the value as an `i64` if and only if it is finite, whole and
/// exactly representable.
///
/// ## Example
/// ```
/// use gloss::util::num::as_whole_number;
///
/// assert_eq!(as_whole_number(4.0), Some(4));
/// assert_eq!(as_whole_number(-3.0), Some(-3));
/// assert_eq!(as_whole_number(2.5), None);
/// assert_eq!(as_whole_number(f64::INFINITY), None);
/// assert_eq!(as_whole_number(1e300), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn as_whole_number(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    Some(value as i64)
}
