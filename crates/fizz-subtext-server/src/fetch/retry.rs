//! Fixed-delay retry policy and the loop that applies it.

use std::future::Future;
use std::time::Duration;

use crate::config::{DEFAULT_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};
use crate::types::{ServerError, ServerResult};

/// How many times to try a logical call and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Attempts actually made. A call is always tried at least once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, Duration::from_millis(DEFAULT_RETRY_DELAY_MS))
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the budget runs out.
///
/// Waits `policy.delay` between attempts. Running out of attempts yields
/// [`ServerError::RetriesExhausted`] carrying the last failure.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, target: &str, mut op: F) -> ServerResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ServerResult<T>>,
{
    let attempts = policy.attempts();
    let mut remaining = attempts;

    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => e,
        };

        remaining -= 1;
        tracing::warn!(
            target_url = target,
            attempts_left = remaining,
            "Cannot reach upstream: {err}"
        );

        if remaining == 0 {
            return Err(ServerError::RetriesExhausted {
                target: target.to_string(),
                attempts,
                last: err.to_string(),
            });
        }

        tokio::time::sleep(policy.delay).await;
    }
}
