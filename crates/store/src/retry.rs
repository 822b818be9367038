//! Bounded retry wrapper for transient store failures.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use analytics_core::limits::{MAX_STORE_ATTEMPTS, STORE_RETRY_BACKOFF_MS};
use analytics_core::{Error, Result};
use telemetry::metrics;

/// Retry policy for store operations.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_STORE_ATTEMPTS,
            backoff: Duration::from_millis(STORE_RETRY_BACKOFF_MS),
        }
    }
}

/// Runs `op` up to `policy.max_attempts` times, pausing between
/// attempts. Only transient errors are retried; validation and
/// permanent storage errors surface immediately.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, op_name: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last_err: Option<Error> = None;

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                metrics().store_retries.inc();
                warn!(
                    op = op_name,
                    attempt = attempt,
                    error = %err,
                    "Transient store error, retrying"
                );
                last_err = Some(err);
                tokio::time::sleep(policy.backoff).await;
            }
            Err(err) => return Err(err),
        }
    }

    // Unreachable with attempts >= 1; the loop always returns.
    Err(last_err.unwrap_or_else(|| Error::internal(format!("{} exhausted retries", op_name))))
}
