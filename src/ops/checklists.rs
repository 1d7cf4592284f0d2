//! Task checklists and their items.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::{RenderRequest, render_list_with};
use crate::types::Checklist;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the checklists embedded in a task.
    pub async fn list_checklists(&self, task_id: &str, options: &PageOptions) -> Result<String> {
        require_id(task_id, "task_id")?;
        let endpoint = Endpoint::get(format!("/task/{task_id}"));
        let task = self.execute(&endpoint, CacheClass::Volatile).await?;
        let checklists = task
            .get("checklists")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        // The task carries its complete checklist set, so the count is a
        // real total.
        let request = RenderRequest::new(options.mode, options.limit, options.page)
            .total(Some(checklists.len()));
        render_list_with::<Checklist>(&checklists, &request, self.render_config())
    }

    pub async fn create_checklist(&self, task_id: &str, name: &str) -> Result<String> {
        self.ensure_writable("create_checklist")?;
        require_id(task_id, "task_id")?;
        require_id(name, "name")?;
        let endpoint =
            Endpoint::post(format!("/task/{task_id}/checklist")).body(json!({"name": name}));
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let id = data
            .get("checklist")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("?");
        Ok(format!("Checklist '{name}' created.\n- **ID:** `{id}`"))
    }

    pub async fn update_checklist(&self, checklist_id: &str, name: &str) -> Result<String> {
        self.ensure_writable("update_checklist")?;
        require_id(checklist_id, "checklist_id")?;
        require_id(name, "name")?;
        let endpoint =
            Endpoint::put(format!("/checklist/{checklist_id}")).body(json!({"name": name}));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Checklist renamed to '{name}'."))
    }

    pub async fn delete_checklist(&self, checklist_id: &str) -> Result<String> {
        self.ensure_writable("delete_checklist")?;
        require_id(checklist_id, "checklist_id")?;
        let endpoint = Endpoint::delete(format!("/checklist/{checklist_id}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Checklist `{checklist_id}` deleted."))
    }

    pub async fn create_checklist_item(
        &self,
        checklist_id: &str,
        name: &str,
        assignee: Option<i64>,
    ) -> Result<String> {
        self.ensure_writable("create_checklist_item")?;
        require_id(checklist_id, "checklist_id")?;
        require_id(name, "name")?;
        let mut body = json!({"name": name});
        if let Some(assignee) = assignee {
            body["assignee"] = json!(assignee);
        }
        let endpoint =
            Endpoint::post(format!("/checklist/{checklist_id}/checklist_item")).body(body);
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Item '{name}' added to checklist `{checklist_id}`."))
    }

    /// Rename, resolve, or reassign one checklist item.
    pub async fn update_checklist_item(
        &self,
        checklist_id: &str,
        item_id: &str,
        name: Option<&str>,
        resolved: Option<bool>,
    ) -> Result<String> {
        self.ensure_writable("update_checklist_item")?;
        require_id(checklist_id, "checklist_id")?;
        require_id(item_id, "item_id")?;
        let mut body = json!({});
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        if let Some(resolved) = resolved {
            body["resolved"] = json!(resolved);
        }
        let endpoint = Endpoint::put(format!(
            "/checklist/{checklist_id}/checklist_item/{item_id}"
        ))
        .body(body);
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Checklist item `{item_id}` updated."))
    }

    pub async fn delete_checklist_item(
        &self,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<String> {
        self.ensure_writable("delete_checklist_item")?;
        require_id(checklist_id, "checklist_id")?;
        require_id(item_id, "item_id")?;
        let endpoint = Endpoint::delete(format!(
            "/checklist/{checklist_id}/checklist_item/{item_id}"
        ));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Checklist item `{item_id}` deleted."))
    }
}
