//! Pooled HTTP transport.
//!
//! One shared `reqwest::Client` is built lazily on the first call and
//! reused for the process lifetime — never per call. The connect timeout is
//! distinct from the total request timeout, and a semaphore bounds the
//! number of concurrent in-flight requests. Per-call timeout overrides are
//! clamped by [`Endpoint::timeout()`](crate::endpoint::Endpoint::timeout).
//!
//! Status mapping follows the error taxonomy in [`crate::error`]: 5xx and
//! 429 are transient; 401/403 are auth failures; 402/405 are capability
//! rejections; other 4xx carry the remote's `err` message and `ECODE`
//! diagnostic verbatim.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use tokio::sync::{OnceCell, Semaphore};
use tracing::debug;

use crate::endpoint::{ApiVersion, Endpoint};
use crate::{ClickUpError, GatewayConfig, Result};

/// Owns the lazily-created connection pool and the concurrency ceiling.
pub struct Transport {
    client: OnceCell<Client>,
    permits: Semaphore,
    connect_timeout: Duration,
    request_timeout: Duration,
    pool_max_idle_per_host: usize,
    base_url_v2: String,
    base_url_v3: String,
}

impl Transport {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: OnceCell::new(),
            permits: Semaphore::new(config.max_concurrent_requests),
            connect_timeout: config.connect_timeout,
            request_timeout: config.request_timeout,
            pool_max_idle_per_host: config.pool_max_idle_per_host,
            base_url_v2: config.base_url_v2.clone(),
            base_url_v3: config.base_url_v3.clone(),
        }
    }

    /// The shared client, built on first use.
    async fn client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .connect_timeout(self.connect_timeout)
                    .timeout(self.request_timeout)
                    .pool_max_idle_per_host(self.pool_max_idle_per_host)
                    .build()
                    .map_err(|e| {
                        ClickUpError::Configuration(format!("failed to build HTTP client: {e}"))
                    })
            })
            .await
    }

    fn base_url(&self, version: ApiVersion) -> &str {
        match version {
            ApiVersion::V2 => &self.base_url_v2,
            ApiVersion::V3 => &self.base_url_v3,
        }
    }

    /// Perform one HTTP call for the given endpoint and decode the body.
    ///
    /// This is a single attempt: retry lives above it in the executor.
    pub async fn send(&self, endpoint: &Endpoint, token: &str) -> Result<Value> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ClickUpError::Http("request limiter closed".into()))?;

        let url = format!("{}{}", self.base_url(endpoint.version()), endpoint.path());
        debug!(endpoint = %endpoint.label(), "upstream call");

        let mut request = self
            .client()
            .await?
            .request(endpoint.method().clone(), &url)
            .header(reqwest::header::AUTHORIZATION, token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(endpoint.query_pairs());

        if let Some(body) = endpoint.json_body() {
            request = request.json(body);
        }
        if let Some(timeout) = endpoint.timeout_override() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClickUpError::Timeout
            } else {
                ClickUpError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            // DELETE and some mutations answer 204 with an empty body.
            if status == StatusCode::NO_CONTENT {
                return Ok(json!({"success": true}));
            }
            return response.json().await.map_err(|e| {
                ClickUpError::Http(format!("failed to decode response body: {e}"))
            });
        }

        Err(self.map_failure(endpoint, response).await)
    }

    /// Map a non-2xx response to the error taxonomy, preserving the
    /// remote's diagnostic message and `ECODE` where present.
    async fn map_failure(&self, endpoint: &Endpoint, response: Response) -> ClickUpError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("err")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("upstream returned {status}"));
        let err_code = body
            .get("ECODE")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match status.as_u16() {
            401 | 403 => ClickUpError::AuthenticationFailed,
            402 | 405 => ClickUpError::Capability {
                endpoint: endpoint.label(),
                message,
            },
            429 => ClickUpError::RateLimited { retry_after },
            s if s >= 500 => ClickUpError::Server {
                status: s,
                message,
            },
            s => ClickUpError::Api {
                status: s,
                message,
                err_code,
            },
        }
    }
}
