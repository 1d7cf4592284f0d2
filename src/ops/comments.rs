//! Task comments.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::types::Comment;
use crate::Result;

use super::{PageOptions, require_id};

impl ClickUpGateway {
    /// List the comments on a task, newest first as the upstream returns
    /// them.
    pub async fn list_comments(&self, task_id: &str, options: &PageOptions) -> Result<String> {
        require_id(task_id, "task_id")?;
        let endpoint = Endpoint::get(format!("/task/{task_id}/comment")).items_in("comments");
        self.list_rendered::<Comment>(&endpoint, CacheClass::Volatile, options)
            .await
    }

    /// Post a comment; optionally assign it or notify watchers.
    pub async fn create_comment(
        &self,
        task_id: &str,
        text: &str,
        assignee: Option<i64>,
        notify_all: bool,
    ) -> Result<String> {
        self.ensure_writable("create_comment")?;
        require_id(task_id, "task_id")?;
        require_id(text, "comment text")?;

        let mut body = json!({
            "comment_text": text,
            "notify_all": notify_all,
        });
        if let Some(assignee) = assignee {
            body["assignee"] = json!(assignee);
        }

        let endpoint = Endpoint::post(format!("/task/{task_id}/comment")).body(body);
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let id = data
            .get("id")
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "?".to_string());
        Ok(format!("Comment posted.\n- **ID:** `{id}`"))
    }
}
