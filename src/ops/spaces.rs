//! Space listing, details, and structure analysis.

use serde_json::Value;

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::OutputMode;
use crate::types::Space;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the spaces of a workspace.
    pub async fn list_spaces(
        &self,
        workspace_id: &str,
        archived: bool,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = Endpoint::get(format!("/team/{workspace_id}/space"))
            .items_in("spaces")
            .query("archived", archived);
        self.list_rendered::<Space>(&endpoint, CacheClass::Structure, options)
            .await
    }

    /// Full details of one space, including its status definitions.
    pub async fn get_space(&self, space_id: &str, mode: OutputMode) -> Result<String> {
        require_id(space_id, "space_id")?;
        let endpoint = Endpoint::get(format!("/space/{space_id}"));
        self.one_rendered::<Space>(&endpoint, CacheClass::Structure, mode)
            .await
    }

    /// Walk one space and summarize its folder/list topology.
    ///
    /// Three structural reads, all served from the structure cache when
    /// warm. The summary counts folders, foldered lists, folderless lists,
    /// and tasks per list.
    pub async fn analyze_space(&self, space_id: &str) -> Result<String> {
        require_id(space_id, "space_id")?;

        let space = self
            .execute(&Endpoint::get(format!("/space/{space_id}")), CacheClass::Structure)
            .await?;
        let folders = self
            .execute_list(
                &Endpoint::get(format!("/space/{space_id}/folder")).items_in("folders"),
                CacheClass::Structure,
            )
            .await?;
        let folderless = self
            .execute_list(
                &Endpoint::get(format!("/space/{space_id}/list")).items_in("lists"),
                CacheClass::Structure,
            )
            .await?;

        let name = space.get("name").and_then(Value::as_str).unwrap_or("?");
        let foldered_lists: usize = folders
            .iter()
            .map(|f| f.get("lists").and_then(Value::as_array).map_or(0, Vec::len))
            .sum();

        let mut lines = vec![
            format!("# Space: {name}"),
            format!("- **Folders:** {}", folders.len()),
            format!(
                "- **Lists:** {} ({} in folders, {} folderless)",
                foldered_lists + folderless.len(),
                foldered_lists,
                folderless.len()
            ),
        ];
        for folder in &folders {
            let folder_name = folder.get("name").and_then(Value::as_str).unwrap_or("?");
            lines.push(format!("\n## {folder_name}"));
            let lists = folder
                .get("lists")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for list in lists {
                lines.push(format!(
                    "- {} ({} tasks)",
                    list.get("name").and_then(Value::as_str).unwrap_or("?"),
                    list.get("task_count").and_then(Value::as_u64).unwrap_or(0)
                ));
            }
        }
        if !folderless.is_empty() {
            lines.push("\n## Folderless lists".to_string());
            for list in &folderless {
                lines.push(format!(
                    "- {} ({} tasks)",
                    list.get("name").and_then(Value::as_str).unwrap_or("?"),
                    list.get("task_count").and_then(Value::as_u64).unwrap_or(0)
                ));
            }
        }
        Ok(lines.join("\n"))
    }
}
