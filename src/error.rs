//! Gateway error types

use std::time::Duration;

/// Errors surfaced by the gateway.
///
/// Every variant carries enough structure (status, endpoint, remote error
/// code) to be logged and shown to the end user verbatim. Classification
/// into transient vs. permanent drives the retry policy — see
/// [`ClickUpError::is_transient()`].
#[derive(Debug, thiserror::Error)]
pub enum ClickUpError {
    // Network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timed out")]
    Timeout,

    /// The caller's overall deadline for one logical call elapsed.
    /// Terminal: it covers admission wait and all retry attempts, so it is
    /// never itself retried.
    #[error("call deadline exceeded")]
    DeadlineExceeded,

    // Remote errors
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    /// Remote rejected an otherwise valid operation because the target
    /// resource's plan or current state does not support it.
    #[error("operation not supported by remote resource ({endpoint}): {message}")]
    Capability { endpoint: String, message: String },

    /// Remote 4xx other than 401/402/403/405/429. The ClickUp diagnostic
    /// code (`ECODE`) is preserved when present.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        err_code: Option<String>,
    },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape from {endpoint}")]
    UnexpectedShape { endpoint: String },

    // Caller errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation '{0}' blocked: gateway is in read-only mode")]
    ReadOnly(&'static str),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClickUpError {
    /// Whether this error is expected to resolve itself on retry.
    ///
    /// Transient: connect/reset failures, request timeouts, remote 5xx,
    /// and 429. Everything else — validation errors, auth failures,
    /// capability rejections, deadline exhaustion — is permanent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClickUpError::Http(_)
                | ClickUpError::Timeout
                | ClickUpError::Server { .. }
                | ClickUpError::RateLimited { .. }
        )
    }

    /// The remote's pacing hint, if it supplied one on a 429.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ClickUpError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, ClickUpError>;
