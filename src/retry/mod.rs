//! Bounded retry with terminal hooks.
//!
//! The pieces, leaves first:
//!
//! - [`RetryError`] — the four ways a retry call fails: invalid
//!   configuration numbers, the operation's own final error, or a hook
//!   error.
//! - [`Hook`] — an optional side effect fired once on the terminal success
//!   or terminal failure of a sequence, optionally overriding the outcome.
//! - [`CallOptions`] — a partial per-call override of a policy's stored
//!   defaults, resolved (and validated) before the first attempt.
//! - [`Retrier`] — the policy object: default budget, delay, and hooks,
//!   plus the `retry_sync`/`retry_async` entry points.
//! - [`retry_once_sync`] / [`retry_once_async`] — one-shot variants for
//!   callers who don't want to keep a policy around.
//!
//! # Quick Start
//!
//! ```rust
//! use retrier::{CallOptions, Hook, Retrier};
//!
//! let retrier = Retrier::<u32, String>::new();
//!
//! // Always-failing operation, per-call budget of 4 retries, and an
//! // overriding failure hook that turns exhaustion into a fallback value.
//! let result = retrier.retry_sync_with(
//!     || Err("unreachable host".to_string()),
//!     CallOptions::new()
//!         .with_max_retries(4)
//!         .with_on_failure(Hook::overriding(|_err| Ok(0))),
//! );
//!
//! assert_eq!(result.unwrap(), 0);
//! ```

mod engine;
mod error;
mod hook;
mod options;
mod policy;

pub use error::RetryError;
pub use hook::{FailureHook, Hook, SuccessHook};
pub use options::CallOptions;
pub use policy::{retry_once_sync, Retrier, DEFAULT_DELAY, DEFAULT_MAX_RETRIES};

#[cfg(feature = "async")]
pub use policy::retry_once_async;
