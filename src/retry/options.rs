//! Per-call option records and their resolution against policy defaults.

use std::fmt;

#[cfg(feature = "async")]
use std::time::Duration;

use crate::num;
use crate::retry::hook::{FailureHook, SuccessHook};
use crate::retry::policy::Retrier;
use crate::retry::RetryError;
use crate::NumberError;

/// A partial override of a [`Retrier`]'s stored defaults.
///
/// Every field is optional: a supplied field wins for exactly one call, an
/// absent field falls back to the policy's current default. The same record
/// also configures a new policy via [`CallOptions::build`] or
/// [`Retrier::from_options`].
///
/// Numeric fields are kept raw and validated at resolution time, before any
/// attempt runs. An explicit `0` is a real override: it forces a single
/// attempt (or no delay) even when the policy default is nonzero.
///
/// # Examples
///
/// ```rust
/// use retrier::{CallOptions, Retrier};
///
/// let retrier = Retrier::<u32, String>::new(); // default budget: 2 retries
///
/// // Override the budget for this one call only.
/// let result = retrier.retry_sync_with(
///     || Err("down".to_string()),
///     CallOptions::new().with_max_retries(0),
/// );
/// assert!(result.is_err());
/// assert_eq!(retrier.max_retries(), 2); // defaults untouched
/// ```
pub struct CallOptions<T, E> {
    pub(crate) max_retries: Option<f64>,
    pub(crate) delay_ms: Option<f64>,
    pub(crate) on_success: Option<SuccessHook<T, E>>,
    pub(crate) on_failure: Option<FailureHook<T, E>>,
}

impl<T, E> CallOptions<T, E> {
    /// An empty record: every field falls back to the policy default.
    pub fn new() -> Self {
        Self {
            max_retries: None,
            delay_ms: None,
            on_success: None,
            on_failure: None,
        }
    }

    /// Override the retry budget (additional attempts after the first).
    ///
    /// The value is validated as a non-negative safe integer when the call
    /// resolves its options.
    pub fn with_max_retries(mut self, n: impl Into<f64>) -> Self {
        self.max_retries = Some(n.into());
        self
    }

    /// Override the delay in milliseconds before each retried asynchronous
    /// attempt. The synchronous path ignores delay entirely.
    pub fn with_delay_ms(mut self, ms: impl Into<f64>) -> Self {
        self.delay_ms = Some(ms.into());
        self
    }

    /// Override the success hook.
    pub fn with_on_success(mut self, hook: SuccessHook<T, E>) -> Self {
        self.on_success = Some(hook);
        self
    }

    /// Override the failure hook.
    pub fn with_on_failure(mut self, hook: FailureHook<T, E>) -> Self {
        self.on_failure = Some(hook);
        self
    }

    /// Build a [`Retrier`] from this record, validating numeric fields and
    /// filling absent ones with the defaults.
    ///
    /// # Errors
    ///
    /// [`RetryError::InvalidInteger`] / [`RetryError::InvalidRange`] for a
    /// bad `max_retries` or `delay_ms`.
    pub fn build(self) -> Result<Retrier<T, E>, RetryError<E>> {
        Retrier::from_options(self)
    }

    /// Overlay this record on a policy's defaults for one synchronous call.
    ///
    /// The synchronous path carries no delay at all, so a `delay_ms`
    /// override is neither validated nor used here.
    pub(crate) fn resolve_sync(
        self,
        policy: &Retrier<T, E>,
    ) -> Result<ResolvedSync<T, E>, NumberError> {
        let max_retries = resolve_count(self.max_retries, policy.max_retries())?;

        Ok(ResolvedSync {
            max_retries,
            on_success: self.on_success.or_else(|| policy.on_success().cloned()),
            on_failure: self.on_failure.or_else(|| policy.on_failure().cloned()),
        })
    }

    /// Overlay this record on a policy's defaults for one asynchronous call.
    #[cfg(feature = "async")]
    pub(crate) fn resolve_async(
        self,
        policy: &Retrier<T, E>,
    ) -> Result<ResolvedAsync<T, E>, NumberError> {
        let max_retries = resolve_count(self.max_retries, policy.max_retries())?;
        let delay = match self.delay_ms {
            Some(raw) => {
                Duration::from_millis(num::require_non_negative_safe_integer(raw)? as u64)
            }
            None => policy.delay(),
        };

        Ok(ResolvedAsync {
            max_retries,
            delay,
            on_success: self.on_success.or_else(|| policy.on_success().cloned()),
            on_failure: self.on_failure.or_else(|| policy.on_failure().cloned()),
        })
    }
}

/// Validate an explicit count override, or fall back to the default.
fn resolve_count(raw: Option<f64>, default: u64) -> Result<u64, NumberError> {
    match raw {
        Some(value) => Ok(num::require_non_negative_safe_integer(value)? as u64),
        None => Ok(default),
    }
}

impl<T, E> Default for CallOptions<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for CallOptions<T, E> {
    fn clone(&self) -> Self {
        Self {
            max_retries: self.max_retries,
            delay_ms: self.delay_ms,
            on_success: self.on_success.clone(),
            on_failure: self.on_failure.clone(),
        }
    }
}

impl<T, E> fmt::Debug for CallOptions<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("max_retries", &self.max_retries)
            .field("delay_ms", &self.delay_ms)
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

/// Fully-populated options consumed by one synchronous engine run.
#[derive(Debug)]
pub(crate) struct ResolvedSync<T, E> {
    pub(crate) max_retries: u64,
    pub(crate) on_success: Option<SuccessHook<T, E>>,
    pub(crate) on_failure: Option<FailureHook<T, E>>,
}

/// Fully-populated options consumed by one asynchronous engine run.
#[cfg(feature = "async")]
#[derive(Debug)]
pub(crate) struct ResolvedAsync<T, E> {
    pub(crate) max_retries: u64,
    pub(crate) delay: Duration,
    pub(crate) on_success: Option<SuccessHook<T, E>>,
    pub(crate) on_failure: Option<FailureHook<T, E>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hook;

    #[test]
    fn test_empty_record_takes_policy_defaults() {
        let retrier = Retrier::<u32, String>::new();
        let resolved = CallOptions::new().resolve_sync(&retrier).unwrap();
        assert_eq!(resolved.max_retries, 2);
        assert!(resolved.on_success.is_none());
        assert!(resolved.on_failure.is_none());
    }

    #[test]
    fn test_explicit_zero_is_an_override() {
        let mut retrier = Retrier::<u32, String>::new();
        retrier.set_max_retries(5).unwrap();

        let resolved = CallOptions::new()
            .with_max_retries(0)
            .resolve_sync(&retrier)
            .unwrap();
        assert_eq!(resolved.max_retries, 0);
    }

    #[test]
    fn test_invalid_override_fails_resolution() {
        let retrier = Retrier::<u32, String>::new();

        let err = CallOptions::new()
            .with_max_retries(1.5)
            .resolve_sync(&retrier)
            .unwrap_err();
        assert_eq!(err, NumberError::NotSafeInteger { value: 1.5 });

        let err = CallOptions::new()
            .with_max_retries(-1)
            .resolve_sync(&retrier)
            .unwrap_err();
        assert_eq!(err, NumberError::Negative { value: -1.0 });
    }

    #[test]
    fn test_per_call_hook_wins_over_policy_hook() {
        let retrier = Retrier::<u32, String>::builder()
            .with_on_success(Hook::overriding(|_| Ok(1)))
            .build()
            .unwrap();

        let resolved = CallOptions::new()
            .with_on_success(Hook::tap(|_| {}))
            .resolve_sync(&retrier)
            .unwrap();
        // The per-call hook is the non-overriding one.
        assert!(!resolved.on_success.unwrap().overrides());
    }

    #[test]
    fn test_resolution_does_not_mutate_policy() {
        let retrier = Retrier::<u32, String>::new();
        let _ = CallOptions::new()
            .with_max_retries(9)
            .resolve_sync(&retrier)
            .unwrap();
        assert_eq!(retrier.max_retries(), 2);
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_async_resolution_carries_delay() {
        let mut retrier = Retrier::<u32, String>::new();
        retrier.set_delay_ms(250).unwrap();

        let resolved = CallOptions::new().resolve_async(&retrier).unwrap();
        assert_eq!(resolved.delay, Duration::from_millis(250));

        let resolved = CallOptions::new()
            .with_delay_ms(0)
            .resolve_async(&retrier)
            .unwrap();
        assert_eq!(resolved.delay, Duration::ZERO);
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_async_resolution_validates_delay() {
        let retrier = Retrier::<u32, String>::new();
        let err = CallOptions::new()
            .with_delay_ms(-10)
            .resolve_async(&retrier)
            .unwrap_err();
        assert_eq!(err, NumberError::Negative { value: -10.0 });
    }
}
