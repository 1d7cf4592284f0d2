//! Space tags and task tagging.

use serde_json::json;

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::types::Tag;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the tags defined on a space.
    pub async fn list_tags(&self, space_id: &str, options: &PageOptions) -> Result<String> {
        require_id(space_id, "space_id")?;
        let endpoint = Endpoint::get(format!("/space/{space_id}/tag")).items_in("tags");
        self.list_rendered::<Tag>(&endpoint, CacheClass::Structure, options)
            .await
    }

    pub async fn create_tag(
        &self,
        space_id: &str,
        name: &str,
        fg_color: Option<&str>,
        bg_color: Option<&str>,
    ) -> Result<String> {
        self.ensure_writable("create_tag")?;
        require_id(space_id, "space_id")?;
        require_id(name, "name")?;
        let body = json!({"tag": {
            "name": name,
            "tag_fg": fg_color.unwrap_or("#000000"),
            "tag_bg": bg_color.unwrap_or("#ffffff"),
        }});
        let endpoint = Endpoint::post(format!("/space/{space_id}/tag")).body(body);
        self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!("Tag '{name}' created."))
    }

    pub async fn update_tag(
        &self,
        space_id: &str,
        tag_name: &str,
        new_name: &str,
    ) -> Result<String> {
        self.ensure_writable("update_tag")?;
        require_id(space_id, "space_id")?;
        require_id(tag_name, "tag_name")?;
        require_id(new_name, "new_name")?;
        let body = json!({"tag": {"name": new_name}});
        let endpoint =
            Endpoint::put(format!("/space/{space_id}/tag/{tag_name}")).body(body);
        self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!("Tag '{tag_name}' renamed to '{new_name}'."))
    }

    pub async fn delete_tag(&self, space_id: &str, tag_name: &str) -> Result<String> {
        self.ensure_writable("delete_tag")?;
        require_id(space_id, "space_id")?;
        require_id(tag_name, "tag_name")?;
        let endpoint = Endpoint::delete(format!("/space/{space_id}/tag/{tag_name}"));
        self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!("Tag '{tag_name}' deleted."))
    }

    /// Attach an existing space tag to a task.
    pub async fn tag_task(&self, task_id: &str, tag_name: &str) -> Result<String> {
        self.ensure_writable("tag_task")?;
        require_id(task_id, "task_id")?;
        require_id(tag_name, "tag_name")?;
        let endpoint = Endpoint::post(format!("/task/{task_id}/tag/{tag_name}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Tag '{tag_name}' added to task `{task_id}`."))
    }

    pub async fn untag_task(&self, task_id: &str, tag_name: &str) -> Result<String> {
        self.ensure_writable("untag_task")?;
        require_id(task_id, "task_id")?;
        require_id(tag_name, "tag_name")?;
        let endpoint = Endpoint::delete(format!("/task/{task_id}/tag/{tag_name}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Tag '{tag_name}' removed from task `{task_id}`."))
    }
}
