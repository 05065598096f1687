//! The `Retrier` policy object and one-shot entry points.

use std::fmt;
use std::time::Duration;

use crate::num;
use crate::retry::engine;
use crate::retry::hook::{FailureHook, SuccessHook};
use crate::retry::options::{CallOptions, ResolvedSync};
use crate::retry::RetryError;

#[cfg(feature = "async")]
use crate::retry::options::ResolvedAsync;
#[cfg(feature = "async")]
use std::future::Future;

/// Retry budget used when none is configured: 2 retries, 3 total attempts.
pub const DEFAULT_MAX_RETRIES: u64 = 2;

/// Delay used when none is configured: no wait between retried attempts.
pub const DEFAULT_DELAY: Duration = Duration::ZERO;

/// A reusable retry policy for operations yielding `Result<T, E>`.
///
/// A `Retrier` holds default configuration — the retry budget, the delay
/// between retried asynchronous attempts, and optional terminal
/// [`Hook`](crate::Hook)s — and runs operations against it. Each call may
/// overlay a partial [`CallOptions`] record on the stored defaults; the
/// override wins field by field for that call only and the stored defaults
/// are never mutated by a call.
///
/// `max_retries` counts *additional* attempts after the first, so the
/// total attempt count is `max_retries + 1`. The delay applies only to the
/// asynchronous path, before each retried attempt (never before the
/// first); the synchronous path never sleeps, whatever is configured.
///
/// All retry methods take `&self`, so a `Retrier` can be shared freely.
/// Mutating a shared policy's defaults concurrently with calls that are
/// resolving their options needs external synchronization; there is none
/// built in.
///
/// # Examples
///
/// ```rust
/// use retrier::Retrier;
///
/// let retrier = Retrier::<&str, String>::new();
///
/// let mut failures = 2;
/// let result = retrier.retry_sync(|| {
///     if failures > 0 {
///         failures -= 1;
///         Err("transient".to_string())
///     } else {
///         Ok("success")
///     }
/// });
///
/// assert_eq!(result.unwrap(), "success");
/// ```
pub struct Retrier<T, E> {
    max_retries: u64,
    delay: Duration,
    on_success: Option<SuccessHook<T, E>>,
    on_failure: Option<FailureHook<T, E>>,
}

impl<T, E> Retrier<T, E> {
    /// A policy with the default budget and no delay or hooks.
    pub fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_DELAY,
            on_success: None,
            on_failure: None,
        }
    }

    /// Start a [`CallOptions`] record for configuring a new policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrier::Retrier;
    ///
    /// let retrier = Retrier::<u32, String>::builder()
    ///     .with_max_retries(4)
    ///     .with_delay_ms(100)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(retrier.max_retries(), 4);
    /// ```
    pub fn builder() -> CallOptions<T, E> {
        CallOptions::new()
    }

    /// Build a policy from an options record.
    ///
    /// Explicit numeric values are validated even when zero; absent fields
    /// take the defaults.
    ///
    /// # Errors
    ///
    /// [`RetryError::InvalidInteger`] / [`RetryError::InvalidRange`] for a
    /// bad `max_retries` or `delay_ms`; no policy is produced.
    pub fn from_options(options: CallOptions<T, E>) -> Result<Self, RetryError<E>> {
        let mut retrier = Self::new();
        if let Some(raw) = options.max_retries {
            retrier.set_max_retries(raw)?;
        }
        if let Some(raw) = options.delay_ms {
            retrier.set_delay_ms(raw)?;
        }
        if let Some(hook) = options.on_success {
            retrier.set_on_success(hook);
        }
        if let Some(hook) = options.on_failure {
            retrier.set_on_failure(hook);
        }
        Ok(retrier)
    }

    /// Get the retry budget (additional attempts after the first).
    pub fn max_retries(&self) -> u64 {
        self.max_retries
    }

    /// Get the delay applied before each retried asynchronous attempt.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Get the default success hook.
    pub fn on_success(&self) -> Option<&SuccessHook<T, E>> {
        self.on_success.as_ref()
    }

    /// Get the default failure hook.
    pub fn on_failure(&self) -> Option<&FailureHook<T, E>> {
        self.on_failure.as_ref()
    }

    /// Set the retry budget.
    ///
    /// # Errors
    ///
    /// [`RetryError::InvalidInteger`] / [`RetryError::InvalidRange`] if the
    /// value is not a non-negative safe integer; the stored budget is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrier::{Retrier, RetryError};
    ///
    /// let mut retrier = Retrier::<u32, String>::new();
    /// retrier.set_max_retries(5).unwrap();
    /// assert_eq!(retrier.max_retries(), 5);
    ///
    /// assert_eq!(
    ///     retrier.set_max_retries(-1),
    ///     Err(RetryError::InvalidRange { value: -1.0 })
    /// );
    /// assert_eq!(
    ///     retrier.set_max_retries(1.5),
    ///     Err(RetryError::InvalidInteger { value: 1.5 })
    /// );
    /// assert_eq!(retrier.max_retries(), 5); // unchanged on failure
    /// ```
    pub fn set_max_retries(&mut self, n: impl Into<f64>) -> Result<(), RetryError<E>> {
        self.max_retries = num::require_non_negative_safe_integer(n.into())? as u64;
        Ok(())
    }

    /// Set the delay, in milliseconds, before each retried asynchronous
    /// attempt.
    ///
    /// # Errors
    ///
    /// [`RetryError::InvalidInteger`] / [`RetryError::InvalidRange`] if the
    /// value is not a non-negative safe integer; the stored delay is left
    /// unchanged.
    pub fn set_delay_ms(&mut self, ms: impl Into<f64>) -> Result<(), RetryError<E>> {
        self.delay = Duration::from_millis(num::require_non_negative_safe_integer(ms.into())? as u64);
        Ok(())
    }

    /// Set the default success hook.
    pub fn set_on_success(&mut self, hook: SuccessHook<T, E>) {
        self.on_success = Some(hook);
    }

    /// Set the default failure hook.
    pub fn set_on_failure(&mut self, hook: FailureHook<T, E>) {
        self.on_failure = Some(hook);
    }

    /// Retry a synchronous operation under the stored defaults.
    ///
    /// The operation runs up to `max_retries + 1` times. On terminal
    /// success the success hook (if any) fires; on terminal failure the
    /// failure hook (if any) fires, and without an overriding failure hook
    /// the operation's final error comes back verbatim inside
    /// [`RetryError::Operation`].
    pub fn retry_sync<F>(&self, op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.retry_sync_with(op, CallOptions::new())
    }

    /// Retry a synchronous operation, overlaying per-call options on the
    /// stored defaults for this call only.
    ///
    /// An invalid numeric override fails the call before any attempt runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrier::{CallOptions, Hook, Retrier};
    ///
    /// let retrier = Retrier::<u32, String>::new();
    ///
    /// let result = retrier.retry_sync_with(
    ///     || Err("down".to_string()),
    ///     CallOptions::new()
    ///         .with_max_retries(4)
    ///         .with_on_failure(Hook::overriding(|_err| Ok(85))),
    /// );
    /// assert_eq!(result.unwrap(), 85);
    /// ```
    pub fn retry_sync_with<F>(
        &self,
        mut op: F,
        options: CallOptions<T, E>,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        let resolved = options.resolve_sync(self)?;
        engine::run_sync(&mut op, &resolved)
    }

    /// Retry an asynchronous operation under the stored defaults.
    ///
    /// Identical to [`retry_sync`](Self::retry_sync) except that each
    /// attempt is awaited, and a configured delay is slept before every
    /// retried attempt (never before the first).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrier::Retrier;
    ///
    /// # tokio_test::block_on(async {
    /// let retrier = Retrier::<u32, String>::new();
    ///
    /// let mut failures = 1;
    /// let result = retrier
    ///     .retry_async(|| {
    ///         let fail = failures > 0;
    ///         failures -= u32::from(fail);
    ///         async move {
    ///             if fail {
    ///                 Err("transient".to_string())
    ///             } else {
    ///                 Ok(42)
    ///             }
    ///         }
    ///     })
    ///     .await;
    ///
    /// assert_eq!(result.unwrap(), 42);
    /// # });
    /// ```
    #[cfg(feature = "async")]
    pub async fn retry_async<F, Fut>(&self, op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.retry_async_with(op, CallOptions::new()).await
    }

    /// Retry an asynchronous operation with per-call options.
    #[cfg(feature = "async")]
    pub async fn retry_async_with<F, Fut>(
        &self,
        mut op: F,
        options: CallOptions<T, E>,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let resolved = options.resolve_async(self)?;
        engine::run_async(&mut op, &resolved).await
    }
}

impl<T, E> Default for Retrier<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Retrier<T, E> {
    fn clone(&self) -> Self {
        Self {
            max_retries: self.max_retries,
            delay: self.delay,
            on_success: self.on_success.clone(),
            on_failure: self.on_failure.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Retrier<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retrier")
            .field("max_retries", &self.max_retries)
            .field("delay", &self.delay)
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

/// Retry a synchronous operation once-off, without retaining a policy.
///
/// Equivalent to building a throwaway [`Retrier`] with the given budget
/// and calling [`Retrier::retry_sync`]. The hooks are passed directly;
/// a one-shot call has no policy defaults to override.
///
/// # Errors
///
/// [`RetryError::InvalidInteger`] / [`RetryError::InvalidRange`] for a bad
/// `max_retries`, before any attempt runs.
///
/// # Examples
///
/// ```rust
/// use retrier::{retry_once_sync, Hook};
///
/// let result = retry_once_sync(
///     4,
///     || Err("always fails".to_string()),
///     None,
///     Some(Hook::overriding(|_err| Ok::<u32, String>(90 - 5))),
/// );
/// assert_eq!(result.unwrap(), 85);
/// ```
pub fn retry_once_sync<T, E, F>(
    max_retries: impl Into<f64>,
    mut op: F,
    on_success: Option<SuccessHook<T, E>>,
    on_failure: Option<FailureHook<T, E>>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
{
    let max_retries = num::require_non_negative_safe_integer(max_retries.into())? as u64;
    let resolved = ResolvedSync {
        max_retries,
        on_success,
        on_failure,
    };
    engine::run_sync(&mut op, &resolved)
}

/// Retry an asynchronous operation once-off, without retaining a policy.
///
/// `delay_ms` is slept before each retried attempt; pass `0` for none.
///
/// # Errors
///
/// [`RetryError::InvalidInteger`] / [`RetryError::InvalidRange`] for a bad
/// `max_retries` or `delay_ms`, before any attempt runs.
///
/// # Examples
///
/// ```rust
/// use retrier::retry_once_async;
///
/// # tokio_test::block_on(async {
/// let mut failures = 2;
/// let result = retry_once_async(3, 1, || {
///     let fail = failures > 0;
///     failures -= u32::from(fail);
///     async move {
///         if fail {
///             Err("transient".to_string())
///         } else {
///             Ok("success")
///         }
///     }
/// }, None, None)
/// .await;
///
/// assert_eq!(result.unwrap(), "success");
/// # });
/// ```
#[cfg(feature = "async")]
pub async fn retry_once_async<T, E, F, Fut>(
    max_retries: impl Into<f64>,
    delay_ms: impl Into<f64>,
    mut op: F,
    on_success: Option<SuccessHook<T, E>>,
    on_failure: Option<FailureHook<T, E>>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_retries = num::require_non_negative_safe_integer(max_retries.into())? as u64;
    let delay =
        Duration::from_millis(num::require_non_negative_safe_integer(delay_ms.into())? as u64);
    let resolved = ResolvedAsync {
        max_retries,
        delay,
        on_success,
        on_failure,
    };
    engine::run_async(&mut op, &resolved).await
}
