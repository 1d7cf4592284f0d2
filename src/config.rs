//! Gateway configuration.
//!
//! All tunables of the request pipeline live in [`GatewayConfig`]: timeout
//! bounds, cache TTLs per volatility class, rate-limiter quota and window,
//! retry attempt count and backoff bounds, and the operational mode.
//!
//! Configuration is an explicit, fully-enumerated structure validated at
//! the boundary — there are no ambient globals. [`GatewayConfig::from_env()`]
//! reads the optional environment overrides (`DEFAULT_TIMEOUT`,
//! `CACHE_TTL_STRUCTURE`, `CACHE_TTL_TASKS`, `READ_ONLY_MODE`); the bearer
//! token itself is supplied to the builder, not read here.

use std::time::Duration;

use crate::retry::RetryConfig;
use crate::{ClickUpError, Result};

/// Lower bound for a per-call timeout override.
pub const MIN_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound for a per-call timeout override.
pub const MAX_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings for one cache partition.
#[derive(Debug, Clone)]
pub struct CachePartition {
    /// Time-to-live for entries in this partition.
    pub ttl: Duration,
    /// Maximum number of entries; excess triggers eviction.
    pub capacity: u64,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Total timeout for a single HTTP request. Default: 30s.
    pub request_timeout: Duration,
    /// TCP connect timeout, distinct from the total timeout. Default: 5s.
    pub connect_timeout: Duration,
    /// Overall deadline for one logical call (cache lookup + admission wait
    /// + retries). Default: equal to 4x `request_timeout`.
    pub call_deadline: Duration,
    /// Maximum idle pooled connections per host. Default: 10.
    pub pool_max_idle_per_host: usize,
    /// Ceiling on concurrent in-flight requests. Default: 20.
    pub max_concurrent_requests: usize,

    /// Slow-changing structural metadata (workspaces, spaces, folders,
    /// lists). Default: 300s TTL, 100 entries.
    pub structure_cache: CachePartition,
    /// Frequently-mutated resources (tasks, comments, time entries).
    /// Default: 60s TTL, 50 entries.
    pub volatile_cache: CachePartition,

    /// Rate-limiter quota: admissions per trailing window. Default: 100.
    pub rate_limit_requests: usize,
    /// Rate-limiter trailing window. Default: 60s.
    pub rate_limit_window: Duration,

    /// Retry policy for transient failures.
    pub retry: RetryConfig,

    /// When set, all write operations are rejected before any network call.
    pub read_only: bool,

    /// Base URL for the v2 API surface.
    pub base_url_v2: String,
    /// Base URL for the v3 API surface.
    pub base_url_v3: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            call_deadline: Duration::from_secs(120),
            pool_max_idle_per_host: 10,
            max_concurrent_requests: 20,
            structure_cache: CachePartition {
                ttl: Duration::from_secs(300),
                capacity: 100,
            },
            volatile_cache: CachePartition {
                ttl: Duration::from_secs(60),
                capacity: 50,
            },
            rate_limit_requests: 100,
            rate_limit_window: Duration::from_secs(60),
            retry: RetryConfig::default(),
            read_only: false,
            base_url_v2: "https://api.clickup.com/api/v2".to_string(),
            base_url_v3: "https://api.clickup.com/api/v3".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a config with the defaults above.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults, then apply environment overrides.
    ///
    /// Recognised variables: `DEFAULT_TIMEOUT` (seconds, clamped to
    /// [5, 120]), `CACHE_TTL_STRUCTURE` and `CACHE_TTL_TASKS` (seconds),
    /// `READ_ONLY_MODE` ("true"/"false"). Unparsable values are a
    /// [`ClickUpError::Configuration`] — fail fast rather than run with a
    /// half-applied config.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(secs) = parse_env_u64("DEFAULT_TIMEOUT")? {
            let timeout = Duration::from_secs(secs)
                .clamp(MIN_CALL_TIMEOUT, MAX_CALL_TIMEOUT);
            config.request_timeout = timeout;
            config.call_deadline = timeout * 4;
        }
        if let Some(secs) = parse_env_u64("CACHE_TTL_STRUCTURE")? {
            config.structure_cache.ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_env_u64("CACHE_TTL_TASKS")? {
            config.volatile_cache.ttl = Duration::from_secs(secs);
        }
        if let Ok(v) = std::env::var("READ_ONLY_MODE") {
            config.read_only = v.eq_ignore_ascii_case("true");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency. Called by the builder before any state
    /// is constructed from the config.
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_requests == 0 {
            return Err(ClickUpError::Configuration(
                "rate_limit_requests must be at least 1".into(),
            ));
        }
        if self.rate_limit_window.is_zero() {
            return Err(ClickUpError::Configuration(
                "rate_limit_window must be non-zero".into(),
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ClickUpError::Configuration(
                "max_concurrent_requests must be at least 1".into(),
            ));
        }
        if self.request_timeout < MIN_CALL_TIMEOUT || self.request_timeout > MAX_CALL_TIMEOUT {
            return Err(ClickUpError::Configuration(format!(
                "request_timeout must be within {:?}..={:?}",
                MIN_CALL_TIMEOUT, MAX_CALL_TIMEOUT
            )));
        }
        if self.call_deadline < self.request_timeout {
            return Err(ClickUpError::Configuration(
                "call_deadline must be at least request_timeout".into(),
            ));
        }
        Ok(())
    }
}

fn parse_env_u64(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            ClickUpError::Configuration(format!("{name} must be an integer, got '{raw}'"))
        }),
        Err(_) => Ok(None),
    }
}
