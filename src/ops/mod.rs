//! Domain operations.
//!
//! Each submodule adds methods to [`ClickUpGateway`] for one resource
//! family. Every method follows the same shape: validate input, build an
//! [`Endpoint`], hand it to the executor with a cache class, and render the
//! decoded result in the requested output mode. Write operations call
//! [`ClickUpGateway::ensure_writable()`] before anything touches the
//! network.

mod checklists;
mod comments;
mod docs;
mod fields;
mod folders;
mod lists;
mod relations;
mod spaces;
mod tags;
mod tasks;
mod templates;
mod time;
mod workspaces;

pub use lists::CreateList;
pub use tasks::{CreateTask, TaskFilter, UpdateTask};
pub use time::{CreateTimeEntry, TimeEntryFilter};

use serde::de::DeserializeOwned;

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::{OutputMode, Render, RenderRequest, render_list_with, render_one};
use crate::{ClickUpError, Result};

/// Output shaping shared by every list operation: mode, per-page limit,
/// and page index.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub mode: OutputMode,
    /// Clamped to `[1, 100]`; defaults to 25 when absent.
    pub limit: Option<usize>,
    pub page: usize,
}

impl PageOptions {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    fn to_request(&self) -> RenderRequest {
        RenderRequest::new(self.mode, self.limit, self.page)
    }
}

impl ClickUpGateway {
    /// Fetch a list endpoint and render it: decode the envelope, truncate
    /// to the limit, format per mode. These surfaces return pages without
    /// declaring a total, so none is claimed and a full page renders the
    /// advisory with `?`.
    pub(crate) async fn list_rendered<T>(
        &self,
        endpoint: &Endpoint,
        class: CacheClass,
        options: &PageOptions,
    ) -> Result<String>
    where
        T: Render + DeserializeOwned,
    {
        let items = self.execute_list(endpoint, class).await?;
        render_list_with::<T>(&items, &options.to_request(), self.render_config())
    }

    /// Fetch a single-record endpoint and render it.
    pub(crate) async fn one_rendered<T>(
        &self,
        endpoint: &Endpoint,
        class: CacheClass,
        mode: OutputMode,
    ) -> Result<String>
    where
        T: Render + DeserializeOwned,
    {
        let body = self.execute(endpoint, class).await?;
        render_one::<T>(&body, mode)
    }
}

/// Reject empty resource identifiers before they become malformed paths.
fn require_id(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClickUpError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ids_are_rejected() {
        assert!(require_id("9hx", "list_id").is_ok());
        assert!(matches!(
            require_id("  ", "list_id"),
            Err(ClickUpError::InvalidInput(_))
        ));
    }
}
