//! List CRUD, in folders and folderless.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::OutputMode;
use crate::types::TaskList;
use crate::{ClickUpError, Result};

use super::{PageOptions, require_id};

/// Where a new list goes and what it starts with.
#[derive(Debug, Clone, Default)]
pub struct CreateList {
    pub name: String,
    /// Exactly one of `folder_id` and `space_id` must be set.
    pub folder_id: Option<String>,
    pub space_id: Option<String>,
    pub content: Option<String>,
    pub due_date: Option<i64>,
    pub priority: Option<u8>,
    pub assignee: Option<i64>,
}

impl ClickUpGateway {
    /// List the lists inside a folder.
    pub async fn list_lists(
        &self,
        folder_id: &str,
        archived: bool,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(folder_id, "folder_id")?;
        let endpoint = Endpoint::get(format!("/folder/{folder_id}/list"))
            .items_in("lists")
            .query("archived", archived);
        self.list_rendered::<TaskList>(&endpoint, CacheClass::Structure, options)
            .await
    }

    /// List the folderless lists of a space.
    pub async fn list_folderless_lists(
        &self,
        space_id: &str,
        archived: bool,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(space_id, "space_id")?;
        let endpoint = Endpoint::get(format!("/space/{space_id}/list"))
            .items_in("lists")
            .query("archived", archived);
        self.list_rendered::<TaskList>(&endpoint, CacheClass::Structure, options)
            .await
    }

    /// Full details of one list.
    pub async fn get_list(&self, list_id: &str, mode: OutputMode) -> Result<String> {
        require_id(list_id, "list_id")?;
        let endpoint = Endpoint::get(format!("/list/{list_id}"));
        self.one_rendered::<TaskList>(&endpoint, CacheClass::Structure, mode)
            .await
    }

    pub async fn create_list(&self, params: &CreateList) -> Result<String> {
        self.ensure_writable("create_list")?;
        require_id(&params.name, "name")?;

        let path = match (&params.folder_id, &params.space_id) {
            (Some(folder_id), None) => {
                require_id(folder_id, "folder_id")?;
                format!("/folder/{folder_id}/list")
            }
            (None, Some(space_id)) => {
                require_id(space_id, "space_id")?;
                format!("/space/{space_id}/list")
            }
            _ => {
                return Err(ClickUpError::InvalidInput(
                    "exactly one of folder_id and space_id must be set".into(),
                ));
            }
        };

        let mut body = json!({"name": params.name});
        if let Some(content) = &params.content {
            body["content"] = json!(content);
        }
        if let Some(due) = params.due_date {
            body["due_date"] = json!(due);
        }
        if let Some(priority) = params.priority {
            body["priority"] = json!(priority);
        }
        if let Some(assignee) = params.assignee {
            body["assignee"] = json!(assignee);
        }

        let endpoint = Endpoint::post(path).body(body);
        let data = self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!(
            "List '{}' created.\n- **ID:** `{}`",
            data.get("name").and_then(Value::as_str).unwrap_or(&params.name),
            data.get("id").and_then(Value::as_str).unwrap_or("?")
        ))
    }

    pub async fn update_list(
        &self,
        list_id: &str,
        name: Option<&str>,
        content: Option<&str>,
    ) -> Result<String> {
        self.ensure_writable("update_list")?;
        require_id(list_id, "list_id")?;
        if name.is_none() && content.is_none() {
            return Err(ClickUpError::InvalidInput(
                "nothing to update: provide name or content".into(),
            ));
        }
        let mut body = json!({});
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        if let Some(content) = content {
            body["content"] = json!(content);
        }
        let endpoint = Endpoint::put(format!("/list/{list_id}")).body(body);
        let data = self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!(
            "List '{}' updated.",
            data.get("name").and_then(Value::as_str).unwrap_or(list_id)
        ))
    }

    pub async fn delete_list(&self, list_id: &str) -> Result<String> {
        self.ensure_writable("delete_list")?;
        require_id(list_id, "list_id")?;
        let endpoint = Endpoint::delete(format!("/list/{list_id}"));
        self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!("List `{list_id}` deleted."))
    }
}
