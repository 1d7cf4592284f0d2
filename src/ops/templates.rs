//! Task templates.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::types::TaskTemplate;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the task templates of a workspace.
    pub async fn list_templates(
        &self,
        workspace_id: &str,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = Endpoint::get(format!("/team/{workspace_id}/taskTemplate"))
            .items_in("templates")
            .query("page", options.page);
        self.list_rendered::<TaskTemplate>(&endpoint, CacheClass::Structure, options)
            .await
    }

    /// Instantiate a template as a new task in a list.
    pub async fn create_task_from_template(
        &self,
        list_id: &str,
        template_id: &str,
        name: &str,
    ) -> Result<String> {
        self.ensure_writable("create_task_from_template")?;
        require_id(list_id, "list_id")?;
        require_id(template_id, "template_id")?;
        require_id(name, "name")?;
        let endpoint = Endpoint::post(format!("/list/{list_id}/taskTemplate/{template_id}"))
            .body(json!({"name": name}));
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let id = data
            .get("task")
            .and_then(|t| t.get("id"))
            .or_else(|| data.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("?");
        Ok(format!("Task '{name}' created from template.\n- **ID:** `{id}`"))
    }
}
