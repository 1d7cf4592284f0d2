//! The gateway handle shared by all domain operations.

use serde_json::Value;

use crate::cache::CacheClass;
use crate::config::GatewayConfig;
use crate::endpoint::Endpoint;
use crate::executor::RequestExecutor;
use crate::render::RenderConfig;
use crate::{ClickUpError, Result};

/// A configured gateway. All domain operations hang off this type; they
/// build an [`Endpoint`] and delegate to the shared executor.
pub struct ClickUpGateway {
    executor: RequestExecutor,
    render: RenderConfig,
    read_only: bool,
}

impl ClickUpGateway {
    pub(crate) fn new(config: GatewayConfig, token: String) -> Self {
        Self {
            executor: RequestExecutor::new(&config, token),
            render: RenderConfig::default(),
            read_only: config.read_only,
        }
    }

    pub(crate) async fn execute(&self, endpoint: &Endpoint, class: CacheClass) -> Result<Value> {
        self.executor.execute(endpoint, class).await
    }

    /// Execute a list endpoint and unwrap its envelope into items.
    pub(crate) async fn execute_list(
        &self,
        endpoint: &Endpoint,
        class: CacheClass,
    ) -> Result<Vec<Value>> {
        let body = self.execute(endpoint, class).await?;
        endpoint.decode_items(&body)
    }

    /// Reject a write operation up front when the gateway is read-only.
    pub(crate) fn ensure_writable(&self, operation: &'static str) -> Result<()> {
        if self.read_only {
            return Err(ClickUpError::ReadOnly(operation));
        }
        Ok(())
    }

    pub(crate) fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Whether write operations are rejected before any network call.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}
