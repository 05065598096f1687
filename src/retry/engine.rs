//! The retry loop and terminal settling.
//!
//! One invocation is a small state machine: attempt, and on failure either
//! consume one unit of budget and attempt again (after an optional delay on
//! the async path), or settle through the failure hook. Success settles
//! through the success hook. Hooks fire at most once, only on the terminal
//! outcome, and are never retried.
//!
//! The budget is consumed by a bounded loop rather than recursion, so a
//! large `max_retries` cannot grow the call stack.

use crate::invoke;
use crate::retry::hook::{FailureHook, SuccessHook};
use crate::retry::options::ResolvedSync;
use crate::retry::RetryError;

#[cfg(feature = "async")]
use crate::retry::options::ResolvedAsync;
#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::time::Duration;

/// Run a synchronous operation under resolved options.
pub(crate) fn run_sync<T, E, F>(
    op: &mut F,
    options: &ResolvedSync<T, E>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
{
    let mut remaining = options.max_retries;
    loop {
        match invoke::invoke_sync(op) {
            Ok(value) => return settle_success(value, options.on_success.as_ref()),
            Err(error) => {
                if remaining == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempts = options.max_retries + 1, "retry budget spent");
                    return settle_failure(error, options.on_failure.as_ref());
                }
                remaining -= 1;
                #[cfg(feature = "tracing")]
                tracing::trace!(remaining, "attempt failed, retrying");
            }
        }
    }
}

/// Run an asynchronous operation under resolved options.
///
/// Identical to [`run_sync`] except that each attempt is awaited and, when
/// a nonzero delay is configured, the engine sleeps before every retried
/// attempt. The delay is never applied before the first attempt.
#[cfg(feature = "async")]
pub(crate) async fn run_async<T, E, F, Fut>(
    op: &mut F,
    options: &ResolvedAsync<T, E>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut remaining = options.max_retries;
    loop {
        match invoke::invoke_async(op).await {
            Ok(value) => return settle_success(value, options.on_success.as_ref()),
            Err(error) => {
                if remaining == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempts = options.max_retries + 1, "retry budget spent");
                    return settle_failure(error, options.on_failure.as_ref());
                }
                remaining -= 1;
                #[cfg(feature = "tracing")]
                tracing::trace!(remaining, delay_ms = options.delay.as_millis() as u64, "attempt failed, retrying");
                if options.delay > Duration::ZERO {
                    tokio::time::sleep(options.delay).await;
                }
            }
        }
    }
}

/// Settle a terminal success through the success hook.
///
/// A hook error discards the already-obtained primary result.
fn settle_success<T, E>(
    value: T,
    hook: Option<&SuccessHook<T, E>>,
) -> Result<T, RetryError<E>> {
    match hook {
        None => Ok(value),
        Some(hook) => match hook.fire(&value) {
            Ok(Some(replacement)) => Ok(replacement),
            Ok(None) => Ok(value),
            Err(error) => Err(RetryError::Hook(error)),
        },
    }
}

/// Settle a terminal failure through the failure hook.
///
/// An overriding hook resolves the call with its own value; a hook error
/// replaces the operation error (hook-wins-on-throw); otherwise the
/// operation error comes back verbatim.
fn settle_failure<T, E>(
    error: E,
    hook: Option<&FailureHook<T, E>>,
) -> Result<T, RetryError<E>> {
    match hook {
        None => Err(RetryError::Operation(error)),
        Some(hook) => match hook.fire(&error) {
            Ok(Some(replacement)) => Ok(replacement),
            Ok(None) => Err(RetryError::Operation(error)),
            Err(hook_error) => Err(RetryError::Hook(hook_error)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hook;

    fn options<T, E>(max_retries: u64) -> ResolvedSync<T, E> {
        ResolvedSync {
            max_retries,
            on_success: None,
            on_failure: None,
        }
    }

    #[test]
    fn test_zero_budget_means_one_attempt() {
        let mut calls = 0;
        let mut op = || {
            calls += 1;
            Err::<u32, _>("boom".to_string())
        };

        let result = run_sync(&mut op, &options(0));
        assert_eq!(result, Err(RetryError::Operation("boom".to_string())));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_budget_bounds_attempts() {
        let mut calls = 0u32;
        let mut op = || {
            calls += 1;
            Err::<u32, _>(format!("failure {}", calls))
        };

        let result = run_sync(&mut op, &options(3));
        // The final attempt's error is the one that comes back.
        assert_eq!(result, Err(RetryError::Operation("failure 4".to_string())));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_success_stops_retrying() {
        let mut calls = 0u32;
        let mut op = || {
            calls += 1;
            if calls < 3 {
                Err("transient".to_string())
            } else {
                Ok(calls)
            }
        };

        assert_eq!(run_sync(&mut op, &options(10)), Ok(3));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_settle_success_observe_keeps_result() {
        let result = settle_success::<_, String>(42, Some(&Hook::tap(|_| {})));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_settle_success_override_replaces_result() {
        let hook = Hook::overriding(|value: &u32| Ok::<_, String>(value * 10));
        assert_eq!(settle_success(4, Some(&hook)), Ok(40));
    }

    #[test]
    fn test_settle_success_hook_error_discards_result() {
        let hook: SuccessHook<u32, String> = Hook::observe(|_| Err("hook down".to_string()));
        assert_eq!(
            settle_success(4, Some(&hook)),
            Err(RetryError::Hook("hook down".to_string()))
        );
    }

    #[test]
    fn test_settle_failure_observe_keeps_error() {
        let hook: FailureHook<u32, String> = Hook::tap(|_| {});
        assert_eq!(
            settle_failure("boom".to_string(), Some(&hook)),
            Err(RetryError::Operation("boom".to_string()))
        );
    }

    #[test]
    fn test_settle_failure_override_resolves() {
        let hook: FailureHook<u32, String> = Hook::overriding(|_| Ok(7));
        assert_eq!(settle_failure("boom".to_string(), Some(&hook)), Ok(7));
    }

    #[test]
    fn test_settle_failure_hook_error_wins() {
        let hook: FailureHook<u32, String> = Hook::observe(|_| Err("hook boom".to_string()));
        assert_eq!(
            settle_failure("original".to_string(), Some(&hook)),
            Err(RetryError::Hook("hook boom".to_string()))
        );
    }
}
