//! Workspace listing and membership.

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::{RenderRequest, render_list_with};
use crate::types::{TeamMember, Workspace};
use crate::{ClickUpError, Result};

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List every workspace the token can see.
    pub async fn list_workspaces(&self, options: &PageOptions) -> Result<String> {
        let endpoint = Endpoint::get("/team").items_in("teams");
        self.list_rendered::<Workspace>(&endpoint, CacheClass::Structure, options)
            .await
    }

    /// List the members of one workspace.
    ///
    /// Membership is embedded in the workspace listing; this filters for
    /// the requested workspace rather than issuing a dedicated call.
    pub async fn list_members(
        &self,
        workspace_id: &str,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = Endpoint::get("/team").items_in("teams");
        let teams = self.execute_list(&endpoint, CacheClass::Structure).await?;

        // Workspace ids arrive as strings or numbers depending on surface.
        let members = teams
            .iter()
            .find(|t| match t.get("id") {
                Some(serde_json::Value::String(s)) => s == workspace_id,
                Some(v) => v.to_string() == workspace_id,
                None => false,
            })
            .and_then(|t| t.get("members"))
            .and_then(|m| m.as_array())
            .cloned()
            .ok_or_else(|| ClickUpError::InvalidInput(format!(
                "workspace '{workspace_id}' not found"
            )))?;

        // Membership arrives complete on the workspace record, so the
        // count is a real total.
        let request = RenderRequest::new(options.mode, options.limit, options.page)
            .total(Some(members.len()));
        render_list_with::<TeamMember>(&members, &request, self.render_config())
    }
}
