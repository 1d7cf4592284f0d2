//! Telemetry metric name constants.
//!
//! Centralised metric names for gateway operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `clickup_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint` — logical endpoint label (e.g. "GET /list/{id}/task")
//! - `status` — outcome: "ok" or "error"
//! - `class` — cache volatility class: "structure" or "volatile"

/// Total requests dispatched through the executor (cache hits excluded).
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "clickup_requests_total";

/// Upstream call duration in seconds, including retries.
///
/// Labels: `endpoint`.
pub const REQUEST_DURATION_SECONDS: &str = "clickup_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `endpoint`.
pub const RETRIES_TOTAL: &str = "clickup_retries_total";

/// Total cache hits.
///
/// Labels: `class`.
pub const CACHE_HITS_TOTAL: &str = "clickup_cache_hits_total";

/// Total cache misses.
///
/// Labels: `class`.
pub const CACHE_MISSES_TOTAL: &str = "clickup_cache_misses_total";

/// Seconds spent waiting for rate-limiter admission.
pub const RATE_LIMIT_WAIT_SECONDS: &str = "clickup_rate_limit_wait_seconds";
