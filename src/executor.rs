//! The request executor — orchestration hub of the pipeline.
//!
//! Composes cache → rate limiter → retry → transport into one call path:
//!
//! 1. compute the cache key; a fresh entry short-circuits everything below
//!    (the primary latency and quota benefit),
//! 2. acquire rate-limiter admission,
//! 3. perform the HTTP call under the retry policy,
//! 4. on success store GET responses in the cache, or invalidate the
//!    affected key space after a mutation,
//! 5. propagate the terminal error otherwise.
//!
//! The whole sequence runs under one deadline; exceeding it yields
//! [`ClickUpError::DeadlineExceeded`], which is terminal for that call.
//! All shared state (cache, rate window) lives inside this struct — it is
//! injected at construction, never reached through globals.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::cache::{CacheClass, ResponseCache};
use crate::endpoint::Endpoint;
use crate::limiter::RateLimiter;
use crate::retry::{RetryConfig, with_retry};
use crate::telemetry;
use crate::transport::Transport;
use crate::{ClickUpError, GatewayConfig, Result};

/// The only integration point a domain operation needs.
pub struct RequestExecutor {
    transport: Transport,
    cache: ResponseCache,
    limiter: RateLimiter,
    retry: RetryConfig,
    token: String,
    call_deadline: Duration,
}

impl RequestExecutor {
    pub fn new(config: &GatewayConfig, token: String) -> Self {
        Self {
            transport: Transport::new(config),
            cache: ResponseCache::new(&config.structure_cache, &config.volatile_cache),
            limiter: RateLimiter::new(config.rate_limit_requests, config.rate_limit_window),
            retry: config.retry.clone(),
            token,
            call_deadline: config.call_deadline,
        }
    }

    /// Execute one logical call: cached GETs are served without network
    /// activity; everything else goes through admission, retry, and the
    /// pooled transport.
    pub async fn execute(&self, endpoint: &Endpoint, class: CacheClass) -> Result<Value> {
        tokio::time::timeout(self.call_deadline, self.execute_inner(endpoint, class))
            .await
            .map_err(|_| ClickUpError::DeadlineExceeded)?
    }

    async fn execute_inner(&self, endpoint: &Endpoint, class: CacheClass) -> Result<Value> {
        let key = endpoint.cache_key();
        if endpoint.is_get() {
            if let Some(value) = self.cache.get(class, &key).await {
                return Ok(value);
            }
        }

        self.limiter.acquire().await;

        let label = endpoint.label();
        let started = Instant::now();
        let result = with_retry(&self.retry, &label, ClickUpError::is_transient, || {
            self.transport.send(endpoint, &self.token)
        })
        .await;

        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "endpoint" => label.clone())
            .record(started.elapsed().as_secs_f64());
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "endpoint" => label,
            "status" => status,
        )
        .increment(1);

        let value = result?;
        if endpoint.is_get() {
            self.cache.put(class, key, value.clone()).await;
        } else {
            // A mutation makes every cached read under the same resource
            // suspect; drop them rather than serve stale data inside the
            // TTL window.
            self.cache.invalidate_resource(&endpoint.resource_needles());
        }
        Ok(value)
    }
}
