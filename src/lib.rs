//! # Retrier
//!
//! Bounded retry for synchronous and asynchronous operations.
//!
//! A [`Retrier`] wraps a single fallible operation and re-invokes it on
//! failure up to a configured budget, optionally sleeping a fixed delay
//! between asynchronous attempts, and optionally firing [`Hook`]s on the
//! terminal success or terminal failure of the whole sequence. It is a
//! small, composable policy ("try up to N times"), not a resilience
//! framework: no jitter, no exponential backoff, no circuit breaking,
//! no per-error classification.
//!
//! ## Quick Example
//!
//! ```rust
//! use retrier::Retrier;
//!
//! let retrier = Retrier::<u32, String>::new(); // 3 attempts total by default
//!
//! let mut remaining_failures = 2;
//! let result = retrier.retry_sync(|| {
//!     if remaining_failures > 0 {
//!         remaining_failures -= 1;
//!         Err("transient".to_string())
//!     } else {
//!         Ok(42)
//!     }
//! });
//!
//! assert_eq!(result.unwrap(), 42);
//! ```
//!
//! Hooks observe or override the terminal outcome:
//!
//! ```rust
//! use retrier::{Hook, Retrier};
//!
//! let retrier = Retrier::builder()
//!     .with_max_retries(4)
//!     .with_on_failure(Hook::overriding(|_err: &String| Ok::<u32, String>(0)))
//!     .build()
//!     .unwrap();
//!
//! // The operation never succeeds, but the overriding failure hook
//! // turns the exhausted error into a fallback value.
//! let result = retrier.retry_sync(|| Err("down".to_string()));
//! assert_eq!(result.unwrap(), 0);
//! ```
//!
//! The asynchronous variant lives behind the `async` feature and supports a
//! fixed delay between retried attempts; the synchronous path never sleeps.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod invoke;
pub mod num;
pub mod retry;

// Re-exports
pub use num::NumberError;
pub use retry::{
    retry_once_sync, CallOptions, FailureHook, Hook, Retrier, RetryError, SuccessHook,
};

#[cfg(feature = "async")]
pub use retry::retry_once_async;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::num::NumberError;
    pub use crate::retry::{
        retry_once_sync, CallOptions, FailureHook, Hook, Retrier, RetryError, SuccessHook,
    };

    #[cfg(feature = "async")]
    pub use crate::retry::retry_once_async;
}
