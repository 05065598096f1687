//! Error types for retry operations.

use crate::num::NumberError;

/// Everything a retry call can fail with.
///
/// Configuration errors (`InvalidInteger`, `InvalidRange`) are produced by
/// construction, setters, and per-call option resolution — always before
/// any attempt runs, and never retried. `Operation` carries the wrapped
/// operation's own error verbatim once the attempt budget is spent.
/// `Hook` carries an error raised by a success or failure hook; when a
/// failure hook errors, its error silently replaces the operation error
/// (hook-wins-on-throw).
///
/// # Examples
///
/// ```rust
/// use retrier::{Retrier, RetryError};
///
/// let retrier = Retrier::<(), String>::new();
/// let result = retrier.retry_sync(|| Err("always fails".to_string()));
///
/// match result {
///     Err(RetryError::Operation(e)) => assert_eq!(e, "always fails"),
///     _ => panic!("expected the operation error"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RetryError<E> {
    /// A supplied retry count or delay is not a safe integer: non-finite,
    /// fractional, or beyond exact `f64` range.
    InvalidInteger {
        /// The offending value.
        value: f64,
    },
    /// A supplied retry count or delay is negative.
    InvalidRange {
        /// The offending value.
        value: f64,
    },
    /// The operation's final error, after all permitted attempts failed.
    Operation(E),
    /// An error raised by a success or failure hook.
    Hook(E),
}

impl<E> RetryError<E> {
    /// Returns true if this is a configuration validation error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInteger { .. } | Self::InvalidRange { .. }
        )
    }

    /// Returns true if this is the operation's own error.
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// Returns true if this error came from a hook.
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }

    /// Get the operation error if present.
    pub fn operation(&self) -> Option<&E> {
        match self {
            Self::Operation(e) => Some(e),
            _ => None,
        }
    }

    /// Extract the operation error, discarding the other cases.
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(e) => Some(e),
            _ => None,
        }
    }

    /// Extract the inner error from either the operation or hook case.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Operation(e) | Self::Hook(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<NumberError> for RetryError<E> {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::NotSafeInteger { value } => Self::InvalidInteger { value },
            NumberError::Negative { value } => Self::InvalidRange { value },
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInteger { value } => {
                write!(f, "invalid retry configuration: {} is not a safe integer", value)
            }
            Self::InvalidRange { value } => {
                write!(f, "invalid retry configuration: {} is negative", value)
            }
            Self::Operation(e) => write!(f, "operation failed after all attempts: {}", e),
            Self::Hook(e) => write!(f, "hook failed: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Operation(e) | Self::Hook(e) => Some(e),
            _ => None,
        }
    }
}
