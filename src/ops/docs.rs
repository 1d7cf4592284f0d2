//! Documents, on the v3 surface.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::{RenderRequest, render_list_with};
use crate::types::Doc;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the documents of a workspace.
    ///
    /// The v3 surface wraps this listing in a `docs` field despite
    /// returning bare collections elsewhere, so the envelope is unwrapped
    /// by hand here.
    pub async fn list_docs(&self, workspace_id: &str, options: &PageOptions) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = Endpoint::get(format!("/workspaces/{workspace_id}/docs"))
            .v3()
            .query("deleted", false)
            .query("archived", false);
        let body = self.execute(&endpoint, CacheClass::Structure).await?;
        let docs = body
            .get("docs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        // Paged upstream; no declared total to pass along.
        let request = RenderRequest::new(options.mode, options.limit, options.page);
        render_list_with::<Doc>(&docs, &request, self.render_config())
    }

    /// Create a document, optionally parented under another doc or page.
    pub async fn create_doc(
        &self,
        workspace_id: &str,
        name: &str,
        visibility: Option<&str>,
    ) -> Result<String> {
        self.ensure_writable("create_doc")?;
        require_id(workspace_id, "workspace_id")?;
        require_id(name, "name")?;
        let mut body = json!({"name": name});
        if let Some(visibility) = visibility {
            body["visibility"] = json!(visibility);
        }
        let endpoint = Endpoint::post(format!("/workspaces/{workspace_id}/docs"))
            .v3()
            .body(body);
        let data = self.execute(&endpoint, CacheClass::Structure).await?;
        Ok(format!(
            "Doc '{}' created.\n- **ID:** `{}`",
            data.get("name").and_then(Value::as_str).unwrap_or(name),
            data.get("id").and_then(Value::as_str).unwrap_or("?")
        ))
    }
}
