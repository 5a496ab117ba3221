use std::f64::consts;

/// Every named constant the language knows, with its value.
///
/// `inf` and `NaN` are spelled the way non-finite numbers render, so any
/// rendered number reads back as an equal one.
pub const MATH_CONSTANTS: &[(&str, f64)] = &[("pi", consts::PI),
                                             ("e", consts::E),
                                             ("tau", consts::TAU),
                                             ("phi", 1.618_033_988_749_895),
                                             ("sqrt2", consts::SQRT_2),
                                             ("sqrt3", 1.732_050_807_568_877_2),
                                             ("ln2", consts::LN_2),
                                             ("ln10", consts::LN_10),
                                             ("inf", f64::INFINITY),
                                             ("NaN", f64::NAN)];

/// Looks up a named constant. Names are matched exactly.
///
/// # Example
/// ```
/// use gloss::interpreter::value::constants::lookup_constant;
///
/// assert_eq!(lookup_constant("pi"), Some(std::f64::consts::PI));
/// assert_eq!(lookup_constant("PI"), None);
/// assert_eq!(lookup_constant("inf"), Some(f64::INFINITY));
/// assert!(lookup_constant("NaN").is_some_and(f64::is_nan));
/// assert_eq!(lookup_constant("x"), None);
/// ```
#[must_use]
pub fn lookup_constant(name: &str) -> Option<f64> {
    MATH_CONSTANTS.iter()
                  .find(|(constant, _)| *constant == name)
                  .map(|(_, value)| *value)
}
