//! Custom fields: discovery and per-task values.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::types::CustomField;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the custom fields available on a list.
    pub async fn list_custom_fields(
        &self,
        list_id: &str,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(list_id, "list_id")?;
        let endpoint = Endpoint::get(format!("/list/{list_id}/field")).items_in("fields");
        self.list_rendered::<CustomField>(&endpoint, CacheClass::Structure, options)
            .await
    }

    /// Set a custom field value on a task.
    pub async fn set_custom_field(
        &self,
        task_id: &str,
        field_id: &str,
        value: Value,
    ) -> Result<String> {
        self.ensure_writable("set_custom_field")?;
        require_id(task_id, "task_id")?;
        require_id(field_id, "field_id")?;
        let endpoint = Endpoint::post(format!("/task/{task_id}/field/{field_id}"))
            .body(json!({"value": value}));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Field `{field_id}` set on task `{task_id}`."))
    }

    /// Clear a custom field value on a task.
    pub async fn remove_custom_field(&self, task_id: &str, field_id: &str) -> Result<String> {
        self.ensure_writable("remove_custom_field")?;
        require_id(task_id, "task_id")?;
        require_id(field_id, "field_id")?;
        let endpoint = Endpoint::delete(format!("/task/{task_id}/field/{field_id}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Field `{field_id}` cleared on task `{task_id}`."))
    }
}
