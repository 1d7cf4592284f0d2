//! Sliding-window rate limiting for outbound calls.
//!
//! [`RateLimiter::acquire()`] suspends the calling task until admitting the
//! call would not exceed `max_requests` admissions within the trailing
//! `window`, then records the admission. Calls are delayed, never dropped,
//! and no distinction is made between call types — everything going through
//! the executor shares one quota.
//!
//! Uses `tokio::time::Instant` throughout so tests can drive the clock with
//! `tokio::time::pause()`.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use crate::telemetry;

/// Sliding-window admission control. One instance is shared by all calls
/// through a [`RequestExecutor`](crate::executor::RequestExecutor).
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    admissions: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `max_requests` per `window`.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            admissions: Mutex::new(VecDeque::new()),
        }
    }

    /// Suspend until an admission slot is free, then record the admission.
    ///
    /// On backlog the wait is `oldest + window − now`; after sleeping the
    /// window is re-checked before admission, so concurrent acquirers can
    /// never over-admit past the quota.
    pub async fn acquire(&self) {
        let started = Instant::now();
        loop {
            let wait = {
                let mut admissions = self.admissions.lock().await;
                let now = Instant::now();
                while let Some(&oldest) = admissions.front() {
                    if now.duration_since(oldest) >= self.window {
                        admissions.pop_front();
                    } else {
                        break;
                    }
                }
                if admissions.len() < self.max_requests {
                    admissions.push_back(now);
                    let waited = started.elapsed();
                    if !waited.is_zero() {
                        metrics::histogram!(telemetry::RATE_LIMIT_WAIT_SECONDS)
                            .record(waited.as_secs_f64());
                    }
                    return;
                }
                // Quota full: earliest slot opens when the oldest admission
                // leaves the window.
                admissions
                    .front()
                    .map(|&oldest| (oldest + self.window).saturating_duration_since(now))
                    .unwrap_or(self.window)
            };
            warn!(
                wait_ms = wait.as_millis() as u64,
                max_requests = self.max_requests,
                "rate limit reached, delaying call"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Admissions currently inside the trailing window.
    pub async fn in_flight(&self) -> usize {
        let mut admissions = self.admissions.lock().await;
        let now = Instant::now();
        while let Some(&oldest) = admissions.front() {
            if now.duration_since(oldest) >= self.window {
                admissions.pop_front();
            } else {
                break;
            }
        }
        admissions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn admits_up_to_quota_without_delay() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let before = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert_eq!(Instant::now(), before);
        assert_eq!(limiter.in_flight().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delays_calls_past_quota() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        limiter.acquire().await;
        limiter.acquire().await;

        let before = Instant::now();
        limiter.acquire().await;
        // Third call must have waited for the oldest admission to expire.
        assert!(Instant::now().duration_since(before) >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn window_slides() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        limiter.acquire().await;
        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(limiter.in_flight().await, 0);
        let before = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(Instant::now(), before);
    }
}
