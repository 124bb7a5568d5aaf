//! The shared retry policy for backend calls.
//!
//! One policy, applied uniformly: rate-limited calls back off
//! exponentially (with a little jitter so parallel callers spread out)
//! and retry a bounded number of times. Every other error is final and
//! handed straight back to the caller, whose job is to fall back.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::error::ContentError;

/// Bounded exponential backoff for rate-limited backend calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, first try included. 1 means no retries.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each retry after that.
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to every delay.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Run an operation under this policy.
    ///
    /// Only [`ContentError::RateLimited`] is retried; any other error
    /// (and success) returns immediately.
    ///
    /// # Errors
    ///
    /// Returns the last error once the attempt budget is spent, or the
    /// first non-retryable error.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ContentError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ContentError>>,
    {
        let mut delay = self.base_delay;
        let mut attempt: u32 = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(ContentError::RateLimited) if attempt < self.max_attempts => {
                    let pause = delay.saturating_add(self.jitter());
                    let pause_ms = u64::try_from(pause.as_millis()).unwrap_or(u64::MAX);
                    debug!(attempt, pause_ms, "rate limited, backing off");
                    tokio::time::sleep(pause).await;
                    delay = delay.saturating_mul(2);
                    attempt = attempt.saturating_add(1);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// A random jitter in `0..=max_jitter`.
    fn jitter(&self) -> Duration {
        let cap = self.max_jitter.as_millis().min(u128::from(u64::MAX));
        let cap = u64::try_from(cap).unwrap_or(u64::MAX);
        if cap == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=cap))
    }
}
