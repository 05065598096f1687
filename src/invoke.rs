//! Uniform invocation of wrapped operations.
//!
//! The retry engine calls operations only through these helpers, which
//! propagate the operation's own error untouched: no wrapping, no
//! swallowing. An operation's arguments are closure captures; the engine
//! re-invokes the same closure for every attempt, so operations take
//! `FnMut`.

#[cfg(feature = "async")]
use std::future::Future;

/// Invoke a synchronous operation once.
///
/// # Example
///
/// ```rust
/// use retrier::invoke::invoke_sync;
///
/// let mut op = || Ok::<_, String>(21 * 2);
/// assert_eq!(invoke_sync(&mut op), Ok(42));
/// ```
pub fn invoke_sync<T, E, F>(op: &mut F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
{
    op()
}

/// Invoke an asynchronous operation once and await its completion.
///
/// The operation produces a fresh future per call; the engine awaits it to
/// settlement before deciding whether to retry.
#[cfg(feature = "async")]
pub async fn invoke_async<T, E, F, Fut>(op: &mut F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    op().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_sync_result_passes_through() {
        let mut op = || Ok::<_, String>("value");
        assert_eq!(invoke_sync(&mut op), Ok("value"));
    }

    #[test]
    fn test_invoke_sync_error_passes_through() {
        let mut op = || Err::<(), _>("boom".to_string());
        assert_eq!(invoke_sync(&mut op), Err("boom".to_string()));
    }

    #[test]
    fn test_invoke_sync_captures_mutable_state() {
        let mut count = 0;
        let mut op = || {
            count += 1;
            Ok::<_, String>(count)
        };
        assert_eq!(invoke_sync(&mut op), Ok(1));
        assert_eq!(invoke_sync(&mut op), Ok(2));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_invoke_async_passes_through() {
        let mut op = || async { Ok::<_, String>(7) };
        assert_eq!(invoke_async(&mut op).await, Ok(7));

        let mut failing = || async { Err::<(), _>("rejected".to_string()) };
        assert_eq!(invoke_async(&mut failing).await, Err("rejected".to_string()));
    }
}
