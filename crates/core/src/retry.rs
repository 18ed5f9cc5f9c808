//! Exponential backoff for outbound calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(2000),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, multiplier: u32) -> Self {
        Self {
            max_retries,
            base_delay,
            multiplier,
        }
    }

    /// Delay slept before retry number `retry` (0-based): `base * multiplier^retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry);
        self.base_delay.saturating_mul(factor)
    }

    /// Sum of every delay the policy can sleep before giving up.
    pub fn total_delay(&self) -> Duration {
        (0..self.max_retries).map(|k| self.delay_for(k)).sum()
    }

    /// Runs `operation` until it succeeds or the retries are exhausted,
    /// returning the last error in the latter case. Attempts are strictly
    /// sequential.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut retry = 0;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) if retry < self.max_retries => {
                    let delay = self.delay_for(retry);
                    warn!(
                        "{} failed ({}), retry attempt {} after {}ms",
                        operation,
                        err,
                        retry + 1,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
