//! Numeric validation for retry configuration.
//!
//! Configuration numbers (retry counts, delays) enter the crate as `f64`
//! and are validated into exact integers before use. `f64` is the loosest
//! numeric carrier: it admits the fractional, negative, and non-finite
//! inputs the validators exist to reject, while every integer up to
//! [`MAX_SAFE_INTEGER`] is exactly representable in it.

use std::fmt;

/// The largest magnitude at which every integer is exactly representable
/// in an `f64` (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A configuration number failed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberError {
    /// The value is not a safe integer: non-finite, fractional, or outside
    /// `[-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER]`.
    NotSafeInteger {
        /// The offending value.
        value: f64,
    },
    /// The value is negative.
    Negative {
        /// The offending value.
        value: f64,
    },
}

impl NumberError {
    /// The value that failed validation.
    pub fn value(&self) -> f64 {
        match self {
            Self::NotSafeInteger { value } | Self::Negative { value } => *value,
        }
    }
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSafeInteger { value } => write!(f, "{} is not a safe integer", value),
            Self::Negative { value } => write!(f, "{} is negative", value),
        }
    }
}

impl std::error::Error for NumberError {}

/// Returns true if the value is a safe integer: finite, with no fractional
/// part, and within `[-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER]`.
///
/// NaN and the infinities fail the finiteness check.
///
/// # Example
///
/// ```rust
/// use retrier::num::is_safe_integer;
///
/// assert!(is_safe_integer(0.0));
/// assert!(is_safe_integer(-3.0));
/// assert!(!is_safe_integer(1.5));
/// assert!(!is_safe_integer(f64::NAN));
/// assert!(!is_safe_integer(9_007_199_254_740_992.0)); // 2^53
/// ```
pub fn is_safe_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

/// Returns true if the value is non-negative.
///
/// # Example
///
/// ```rust
/// use retrier::num::is_non_negative;
///
/// assert!(is_non_negative(0.0));
/// assert!(is_non_negative(7.0));
/// assert!(!is_non_negative(-1.0));
/// ```
pub fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Returns the value unchanged if it is a safe integer.
///
/// # Errors
///
/// [`NumberError::NotSafeInteger`] otherwise.
pub fn require_safe_integer(value: f64) -> Result<f64, NumberError> {
    if is_safe_integer(value) {
        Ok(value)
    } else {
        Err(NumberError::NotSafeInteger { value })
    }
}

/// Returns the value unchanged if it is non-negative.
///
/// # Errors
///
/// [`NumberError::Negative`] otherwise.
pub fn require_non_negative(value: f64) -> Result<f64, NumberError> {
    if is_non_negative(value) {
        Ok(value)
    } else {
        Err(NumberError::Negative { value })
    }
}

/// Returns the value unchanged if it is a non-negative safe integer.
///
/// The integer check runs first; whichever check fails first decides the
/// error.
///
/// # Example
///
/// ```rust
/// use retrier::num::{require_non_negative_safe_integer, NumberError};
///
/// assert_eq!(require_non_negative_safe_integer(4.0), Ok(4.0));
/// assert_eq!(
///     require_non_negative_safe_integer(1.5),
///     Err(NumberError::NotSafeInteger { value: 1.5 })
/// );
/// assert_eq!(
///     require_non_negative_safe_integer(-1.0),
///     Err(NumberError::Negative { value: -1.0 })
/// );
/// ```
pub fn require_non_negative_safe_integer(value: f64) -> Result<f64, NumberError> {
    require_non_negative(require_safe_integer(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_integers() {
        assert!(is_safe_integer(0.0));
        assert!(is_safe_integer(-0.0));
        assert!(is_safe_integer(1.0));
        assert!(is_safe_integer(-42.0));
        assert!(is_safe_integer(MAX_SAFE_INTEGER));
        assert!(is_safe_integer(-MAX_SAFE_INTEGER));
    }

    #[test]
    fn test_unsafe_integers() {
        assert!(!is_safe_integer(0.5));
        assert!(!is_safe_integer(-1.5));
        assert!(!is_safe_integer(f64::NAN));
        assert!(!is_safe_integer(f64::INFINITY));
        assert!(!is_safe_integer(f64::NEG_INFINITY));
        assert!(!is_safe_integer(MAX_SAFE_INTEGER + 1.0));
        assert!(!is_safe_integer(-(MAX_SAFE_INTEGER + 1.0)));
    }

    #[test]
    fn test_non_negative() {
        assert!(is_non_negative(0.0));
        assert!(is_non_negative(1.0));
        assert!(is_non_negative(0.5));
        assert!(!is_non_negative(-1.0));
        // NaN compares false against everything
        assert!(!is_non_negative(f64::NAN));
    }

    #[test]
    fn test_require_safe_integer_identity() {
        assert_eq!(require_safe_integer(7.0), Ok(7.0));
        assert_eq!(require_safe_integer(-7.0), Ok(-7.0));
        assert_eq!(
            require_safe_integer(7.5),
            Err(NumberError::NotSafeInteger { value: 7.5 })
        );
    }

    #[test]
    fn test_require_non_negative_identity() {
        assert_eq!(require_non_negative(7.0), Ok(7.0));
        assert_eq!(
            require_non_negative(-7.0),
            Err(NumberError::Negative { value: -7.0 })
        );
    }

    #[test]
    fn test_composed_check_order() {
        // Integer check runs first: -1.5 is both fractional and negative,
        // and reports as a non-integer.
        assert_eq!(
            require_non_negative_safe_integer(-1.5),
            Err(NumberError::NotSafeInteger { value: -1.5 })
        );
        assert_eq!(
            require_non_negative_safe_integer(-1.0),
            Err(NumberError::Negative { value: -1.0 })
        );
        assert_eq!(require_non_negative_safe_integer(0.0), Ok(0.0));
    }

    #[test]
    fn test_number_error_display() {
        let err = NumberError::NotSafeInteger { value: 1.5 };
        assert!(format!("{}", err).contains("not a safe integer"));

        let err = NumberError::Negative { value: -2.0 };
        assert!(format!("{}", err).contains("negative"));
    }

    #[test]
    fn test_number_error_value() {
        assert_eq!(NumberError::NotSafeInteger { value: 1.5 }.value(), 1.5);
        assert_eq!(NumberError::Negative { value: -2.0 }.value(), -2.0);
    }
}
