//! Exponential Backoff
//!
//! Only transport failures are retried. A response with an HTTP error
//! status is returned to the caller on the first attempt so it can be
//! classified (401, 404, validation, ...) instead of being retried.

use std::future::Future;

use crate::transport::TransportError;

/// Pauses the current task (gloo-timers in the browser, a recorder in tests)
#[allow(async_fn_in_trait)]
pub trait Sleep {
    async fn sleep(&self, ms: u32);
}

impl<S: Sleep> Sleep for &S {
    async fn sleep(&self, ms: u32) {
        (**self).sleep(ms).await
    }
}

/// Retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that issues exactly one attempt
    pub fn single() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay after the failed attempt `attempt` (0-based): 1s, 2s, 4s, ...
    pub fn delay_for(&self, attempt: u32) -> u32 {
        self.base_delay_ms.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Sum of all delays a persistently failing call waits through
    pub fn total_delay(&self) -> u32 {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_for(attempt))
            .sum()
    }
}

/// Run `op` until it succeeds or `policy.max_attempts` transport failures
/// have happened. The last failure is returned.
pub async fn with_backoff<T, F, Fut, S>(
    policy: RetryPolicy,
    sleeper: &S,
    mut op: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
    S: Sleep,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt + 1 >= attempts => {
                log::error!("[HTTP] giving up after {} attempts: {}", attempts, err);
                return Err(err);
            }
            Err(err) => {
                let delay = policy.delay_for(attempt);
                log::warn!(
                    "[HTTP] attempt {}/{} failed ({}), retrying in {} ms",
                    attempt + 1,
                    attempts,
                    err,
                    delay
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
