//! Retry configuration and the shared retry helper.
//!
//! [`RetryConfig`] controls bounded re-attempts with exponential backoff
//! and jitter; [`with_retry()`] wraps a single logical call. Which failures
//! are worth retrying is decided by a classifier function passed in by the
//! caller, not hard-wired to the transport library — the default is
//! [`ClickUpError::is_transient()`].

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::telemetry;
use crate::{ClickUpError, Result};

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff with optional jitter:
///
/// ```rust
/// # use clickup_gateway::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(true);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 1s.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 10s.
    pub max_delay: Duration,
    /// Whether to add random jitter to delays. Default: true.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enable or disable jitter.
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Calculate the backoff for a given attempt number (0-indexed):
    /// `initial_delay * 2^attempt`, capped at `max_delay`. Does NOT
    /// include jitter — see [`effective_delay()`](Self::effective_delay).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Calculate the effective delay, respecting remote `retry_after`
    /// hints.
    ///
    /// A `retry_after` duration (from a `RateLimited` error) takes
    /// precedence over the calculated backoff and is used as-is; jitter is
    /// applied only to our own backoff.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint;
        }
        let delay = self.delay_for_attempt(attempt);
        if self.jitter {
            delay.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
        } else {
            delay
        }
    }
}

/// Execute an async operation with retry logic.
///
/// Invokes `f` up to `config.max_attempts` times. Errors for which
/// `classify` returns `true` are retried after a backoff; everything else
/// propagates immediately without consuming retry budget. After exhaustion
/// the last observed error is surfaced unchanged in kind.
pub(crate) async fn with_retry<F, Fut, T, C>(
    config: &RetryConfig,
    endpoint: &str,
    classify: C,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    C: Fn(&ClickUpError) -> bool,
{
    let mut last_err = None;
    for attempt in 0..config.max_attempts {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if classify(&e) => {
                if attempt + 1 < config.max_attempts {
                    metrics::counter!(telemetry::RETRIES_TOTAL, "endpoint" => endpoint.to_owned())
                        .increment(1);
                    let delay = config.effective_delay(attempt, e.retry_after());
                    warn!(
                        endpoint,
                        attempt = attempt + 1,
                        max_attempts = config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e), // permanent error, no retry
        }
    }
    Err(last_err.unwrap_or(ClickUpError::Configuration(
        "retry executed zero attempts".into(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_exponentially_and_caps() {
        let config = RetryConfig::new()
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(10));
        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(5), Duration::from_secs(10));
    }

    #[test]
    fn retry_after_hint_takes_precedence() {
        let config = RetryConfig::new().jitter(false);
        let hint = Some(Duration::from_secs(7));
        assert_eq!(config.effective_delay(0, hint), Duration::from_secs(7));
        assert_eq!(config.effective_delay(0, None), Duration::from_secs(1));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let config = RetryConfig::new().initial_delay(Duration::from_secs(2));
        for _ in 0..50 {
            let d = config.effective_delay(0, None);
            assert!(d >= Duration::from_secs(1) && d <= Duration::from_secs(2));
        }
    }
}
