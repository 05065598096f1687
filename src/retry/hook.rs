//! Terminal side-effect hooks.

use std::fmt;
use std::sync::Arc;

/// A side effect to run when a retry sequence finally settles.
///
/// A hook fires at most once per retry call: a success hook when the
/// operation finally succeeds, a failure hook when the attempt budget is
/// spent. `In` is the triggering value the hook receives (the primary
/// result for success hooks, the operation error for failure hooks),
/// `Out` the value an overriding hook substitutes for the outcome, and
/// `E` the error channel shared with the operation.
///
/// The original outcome's fate depends on how the hook was built:
///
/// - [`Hook::observe`] / [`Hook::tap`] — the hook runs purely for its side
///   effect and the primary outcome is preserved. An error from the hook
///   still replaces the outcome (see [`RetryError::Hook`]).
/// - [`Hook::overriding`] — the hook's `Ok` value becomes the final result
///   of the whole retry call, even on the failure path.
///
/// Extra arguments beyond the triggering value are closure captures; the
/// triggering value itself is always the callback's explicit parameter.
///
/// Hooks are immutable values; cloning shares the underlying callback.
///
/// [`RetryError::Hook`]: crate::RetryError::Hook
///
/// # Examples
///
/// ```rust
/// use retrier::Hook;
///
/// // Side effect only: the retry call's outcome is untouched.
/// let log: Hook<u32, u32, String> = Hook::tap(|value| {
///     println!("settled with {}", value);
/// });
/// assert!(!log.overrides());
///
/// // Overriding: the hook's return value wins.
/// let replace: Hook<u32, u32, String> = Hook::overriding(|value| Ok(value + 1));
/// assert!(replace.overrides());
/// ```
pub struct Hook<In, Out, E> {
    action: Action<In, Out, E>,
}

enum Action<In, Out, E> {
    Observe(Arc<dyn Fn(&In) -> Result<(), E> + Send + Sync>),
    Override(Arc<dyn Fn(&In) -> Result<Out, E> + Send + Sync>),
}

/// A hook fired on terminal success; receives the primary result.
pub type SuccessHook<T, E> = Hook<T, T, E>;

/// A hook fired on terminal failure; receives the operation error. An
/// overriding failure hook resolves the call with a `T` instead of failing.
pub type FailureHook<T, E> = Hook<E, T, E>;

impl<In, Out, E> Hook<In, Out, E> {
    /// A non-overriding hook: runs for its side effect, may fail.
    pub fn observe<F>(callback: F) -> Self
    where
        F: Fn(&In) -> Result<(), E> + Send + Sync + 'static,
    {
        Self {
            action: Action::Observe(Arc::new(callback)),
        }
    }

    /// A non-overriding, infallible hook.
    pub fn tap<F>(callback: F) -> Self
    where
        F: Fn(&In) + Send + Sync + 'static,
    {
        Self::observe(move |input| {
            callback(input);
            Ok(())
        })
    }

    /// An overriding hook: its `Ok` value replaces the primary outcome.
    pub fn overriding<F>(callback: F) -> Self
    where
        F: Fn(&In) -> Result<Out, E> + Send + Sync + 'static,
    {
        Self {
            action: Action::Override(Arc::new(callback)),
        }
    }

    /// Returns true if this hook's return value replaces the primary
    /// outcome.
    pub fn overrides(&self) -> bool {
        matches!(self.action, Action::Override(_))
    }

    /// Fire the hook with the triggering value.
    ///
    /// `Ok(Some(v))` means an overriding hook produced a replacement,
    /// `Ok(None)` means a non-overriding hook ran cleanly, and `Err` is
    /// the hook's own failure.
    pub(crate) fn fire(&self, trigger: &In) -> Result<Option<Out>, E> {
        match &self.action {
            Action::Observe(callback) => callback(trigger).map(|()| None),
            Action::Override(callback) => callback(trigger).map(Some),
        }
    }
}

impl<In, Out, E> Clone for Hook<In, Out, E> {
    fn clone(&self) -> Self {
        let action = match &self.action {
            Action::Observe(callback) => Action::Observe(Arc::clone(callback)),
            Action::Override(callback) => Action::Override(Arc::clone(callback)),
        };
        Self { action }
    }
}

impl<In, Out, E> fmt::Debug for Hook<In, Out, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("overrides", &self.overrides())
            .finish_non_exhaustive()
    }
}
