//! clickup-gateway - Resilient client layer for the ClickUp API
//!
//! This crate mediates between an interactive assistant and the ClickUp
//! REST API. Every call goes through one pipeline: a TTL cache partitioned
//! by data volatility, a sliding-window rate limiter, a bounded retry
//! policy for transient failures, and a pooled HTTP transport. Results are
//! rendered in a bounded shape so an arbitrarily large result set can
//! never flood the consumer's context window.
//!
//! # Example
//!
//! ```rust,no_run
//! use clickup_gateway::{ClickUp, OutputMode, PageOptions, TaskFilter};
//!
//! #[tokio::main]
//! async fn main() -> clickup_gateway::Result<()> {
//!     let gateway = ClickUp::builder()
//!         .token("pk_your_token")
//!         .build()?;
//!
//!     let tasks = gateway
//!         .list_tasks(
//!             "901201234",
//!             &TaskFilter::default(),
//!             &PageOptions::new(OutputMode::Compact).limit(25),
//!         )
//!         .await?;
//!
//!     println!("{tasks}");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
mod executor;
pub mod gateway;
mod limiter;
pub mod ops;
pub mod render;
mod retry;
pub mod telemetry;
mod transport;
pub mod types;

// Re-export main types at crate root
pub use cache::CacheClass;
pub use config::{CachePartition, GatewayConfig};
pub use endpoint::{ApiVersion, Endpoint};
pub use error::{ClickUpError, Result};
pub use gateway::{ClickUp, ClickUpBuilder, ClickUpGateway};
pub use ops::{
    CreateList, CreateTask, CreateTimeEntry, PageOptions, TaskFilter, TimeEntryFilter,
    UpdateTask,
};
pub use render::{DEFAULT_LIMIT, MAX_LIMIT, OutputMode, Render, RenderConfig, RenderRequest};
pub use retry::RetryConfig;
