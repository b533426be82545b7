use crate::RateLimited;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io::ErrorKind;
use std::time::Duration;
use tracing::warn;


/// Bounded retry policy for remote lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: usize,
    /// Pause before each retry in milliseconds, the last entry repeats
    #[serde(default)]
    pub backoff_ms: Vec<u64>
}


impl RetryPolicy {
    pub fn new(max_attempts: usize, backoff_ms: Vec<u64>) -> Self {
        Self {
            max_attempts,
            backoff_ms
        }
    }

    /// Single attempt, failures propagate right away.
    pub fn no_retries() -> Self {
        Self::new(1, vec![])
    }

    /// One immediate retry after a transient failure.
    pub fn retry_once() -> Self {
        Self::new(2, vec![0])
    }

    pub fn pause(&self, retry: usize) -> Duration {
        let ms = if self.backoff_ms.is_empty() {
            0
        } else {
            self.backoff_ms[std::cmp::min(retry, self.backoff_ms.len() - 1)]
        };
        Duration::from_millis(ms)
    }
}


impl Default for RetryPolicy {
    fn default() -> Self {
        Self::retry_once()
    }
}


/// Runs `op` until it succeeds, fails with a permanent error,
/// or the policy runs out of attempts.
pub async fn with_retries<R, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut op: F
) -> anyhow::Result<R>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<R>>
{
    let mut attempt = 0;
    loop {
        let err = match op().await {
            Ok(res) => return Ok(res),
            Err(err) => err
        };

        attempt += 1;
        if attempt >= policy.max_attempts || !is_transient(&err) {
            return Err(err)
        }

        let pause = policy.pause(attempt - 1);

        warn!(
            request = what,
            attempt,
            error = ?err,
            "remote lookup failed, will retry in {} ms",
            pause.as_millis()
        );

        if !pause.is_zero() {
            futures_timer::Delay::new(pause).await;
        }
    }
}


pub fn is_transient(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if cause.is::<RateLimited>() {
            return true
        }
        if let Some(http_err) = cause.downcast_ref::<reqwest::Error>() {
            return http_err.is_timeout() || http_err.is_connect()
        }
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            return is_retryable_io(io_err)
        }
        false
    })
}


fn is_retryable_io(err: &std::io::Error) -> bool {
    match err.kind() {
        ErrorKind::ConnectionReset => true,
        ErrorKind::ConnectionAborted => true,
        ErrorKind::TimedOut => true,
        _ => false
    }
}
