//! Folder CRUD.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::types::Folder;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the folders of a space.
    pub async fn list_folders(
        &self,
        space_id: &str,
        archived: bool,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(space_id, "space_id")?;
        let endpoint = Endpoint::get(format!("/space/{space_id}/folder"))
            .items_in("folders")
            .query("archived", archived);
        self.list_rendered::<Folder>(&endpoint, CacheClass::Structure, options)
            .await
    }

    pub async fn create_folder(&self, space_id: &str, name: &str) -> Result<String> {
        self.ensure_writable("create_folder")?;
        require_id(space_id, "space_id")?;
        require_id(name, "name")?;
        let endpoint = Endpoint::post(format!("/space/{space_id}/folder"))
            .body(json!({"name": name}));
        let data = self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!(
            "Folder '{}' created.\n- **ID:** `{}`",
            data.get("name").and_then(Value::as_str).unwrap_or(name),
            data.get("id").and_then(Value::as_str).unwrap_or("?")
        ))
    }

    pub async fn update_folder(&self, folder_id: &str, name: &str) -> Result<String> {
        self.ensure_writable("update_folder")?;
        require_id(folder_id, "folder_id")?;
        require_id(name, "name")?;
        let endpoint =
            Endpoint::put(format!("/folder/{folder_id}")).body(json!({"name": name}));
        let data = self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!(
            "Folder renamed to '{}'.",
            data.get("name").and_then(Value::as_str).unwrap_or(name)
        ))
    }

    pub async fn delete_folder(&self, folder_id: &str) -> Result<String> {
        self.ensure_writable("delete_folder")?;
        require_id(folder_id, "folder_id")?;
        let endpoint = Endpoint::delete(format!("/folder/{folder_id}"));
        self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!("Folder `{folder_id}` deleted."))
    }
}
