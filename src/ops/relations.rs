//! Task dependencies and links.

use serde_json::json;

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::Result;

use super::require_id;

impl ClickUpGateway {
    /// Declare that `task_id` is blocked by `depends_on`.
    pub async fn add_dependency(&self, task_id: &str, depends_on: &str) -> Result<String> {
        self.ensure_writable("add_dependency")?;
        require_id(task_id, "task_id")?;
        require_id(depends_on, "depends_on")?;
        let endpoint = Endpoint::post(format!("/task/{task_id}/dependency"))
            .body(json!({"depends_on": depends_on}));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Task `{task_id}` now depends on `{depends_on}`."))
    }

    pub async fn remove_dependency(&self, task_id: &str, depends_on: &str) -> Result<String> {
        self.ensure_writable("remove_dependency")?;
        require_id(task_id, "task_id")?;
        require_id(depends_on, "depends_on")?;
        let endpoint = Endpoint::delete(format!("/task/{task_id}/dependency"))
            .query("depends_on", depends_on);
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Dependency on `{depends_on}` removed from `{task_id}`."))
    }

    /// Create an undirected link between two tasks.
    pub async fn link_tasks(&self, task_id: &str, links_to: &str) -> Result<String> {
        self.ensure_writable("link_tasks")?;
        require_id(task_id, "task_id")?;
        require_id(links_to, "links_to")?;
        let endpoint = Endpoint::post(format!("/task/{task_id}/link/{links_to}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Task `{task_id}` linked to `{links_to}`."))
    }

    pub async fn unlink_tasks(&self, task_id: &str, links_to: &str) -> Result<String> {
        self.ensure_writable("unlink_tasks")?;
        require_id(task_id, "task_id")?;
        require_id(links_to, "links_to")?;
        let endpoint = Endpoint::delete(format!("/task/{task_id}/link/{links_to}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Link between `{task_id}` and `{links_to}` removed."))
    }
}
