//! Retry with fixed delay
//!
//! Wraps an arbitrary async operation with bounded retry attempts and a
//! fixed delay between them. Deliberately simple: no exponential growth and
//! no jitter, so the timing of a flaky-endpoint test stays predictable.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiprobe::retry::RetryPolicy;
//!
//! let policy = RetryPolicy::default().with_max_attempts(3);
//! let response = policy.execute(|| async { auth.login(&creds, None).await }).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::error::{ProbeError, Result};

/// Default number of attempts (initial call included)
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay between attempts (1 second)
const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Fixed-delay retry policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, counting the first call
    pub max_attempts: u32,
    /// Delay between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit attempts and delay
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Set the total attempt count
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between attempts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Execute an operation, retrying on failure.
    ///
    /// Returns the first success immediately. Each failure is logged and
    /// followed by the fixed delay (no delay after the final attempt);
    /// after exhausting all attempts the last error is propagated
    /// unchanged. A zero attempt count is rejected up front as a
    /// configuration error rather than silently doing nothing.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.max_attempts == 0 {
            return Err(ProbeError::Config {
                reason: "retry max_attempts must be at least 1".to_string(),
            });
        }

        for attempt in 1..self.max_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Retry attempt failed"
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }

        // Final attempt: its error is the caller's error, unchanged
        operation().await.map_err(|e| {
            tracing::warn!(
                attempt = self.max_attempts,
                max_attempts = self.max_attempts,
                error = %e,
                "Retry attempts exhausted"
            );
            e
        })
    }
}
