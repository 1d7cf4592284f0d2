//! Builder for configuring gateway instances.

use super::ClickUpGateway;
use crate::config::GatewayConfig;
use crate::retry::RetryConfig;
use crate::{ClickUpError, Result};

/// Main entry point for creating gateway instances.
pub struct ClickUp;

impl ClickUp {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> ClickUpBuilder {
        ClickUpBuilder::new()
    }

    /// Build a gateway from the environment: token from `CLICKUP_API_KEY`,
    /// tunables from the optional override variables.
    pub fn from_env() -> Result<ClickUpGateway> {
        let token = std::env::var("CLICKUP_API_KEY").map_err(|_| {
            ClickUpError::Configuration("CLICKUP_API_KEY is not set".into())
        })?;
        Self::builder()
            .token(token)
            .config(GatewayConfig::from_env()?)
            .build()
    }
}

/// Builder for configuring gateway instances.
pub struct ClickUpBuilder {
    token: Option<String>,
    config: GatewayConfig,
}

impl ClickUpBuilder {
    pub fn new() -> Self {
        Self {
            token: None,
            config: GatewayConfig::default(),
        }
    }

    /// Set the API bearer token. Required.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the retry policy only.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Reject all write operations before any network call.
    pub fn read_only(mut self, enabled: bool) -> Self {
        self.config.read_only = enabled;
        self
    }

    /// Point both API surfaces at one base URL. Intended for tests against
    /// a local mock server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url_v2 = url.clone();
        self.config.base_url_v3 = url;
        self
    }

    /// Validate the configuration and construct the gateway.
    pub fn build(self) -> Result<ClickUpGateway> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClickUpError::Configuration("API token is required".into()))?;
        self.config.validate()?;
        Ok(ClickUpGateway::new(self.config, token))
    }
}

impl Default for ClickUpBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_token() {
        assert!(matches!(
            ClickUp::builder().build(),
            Err(ClickUpError::Configuration(_))
        ));
        assert!(matches!(
            ClickUp::builder().token("").build(),
            Err(ClickUpError::Configuration(_))
        ));
        assert!(ClickUp::builder().token("pk_1").build().is_ok());
    }

    #[test]
    fn build_rejects_invalid_config() {
        let config = GatewayConfig {
            rate_limit_requests: 0,
            ..GatewayConfig::default()
        };
        assert!(ClickUp::builder().token("pk_1").config(config).build().is_err());
    }
}
