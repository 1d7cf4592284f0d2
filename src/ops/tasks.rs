//! Task CRUD, moving, duplication, and search.

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::{OutputMode, RenderRequest, render_list_with};
use crate::types::{Attachment, Task};
use crate::{ClickUpError, Result};

use super::{PageOptions, require_id};

/// Server-side filters for task listing. All fields optional; the
/// timestamp bounds are millisecond epochs.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub archived: bool,
    pub include_closed: bool,
    pub subtasks: bool,
    pub order_by: Option<String>,
    pub reverse: bool,
    pub statuses: Vec<String>,
    pub assignees: Vec<String>,
    /// Workspace-wide search only: restrict to these containers.
    pub space_ids: Vec<String>,
    pub list_ids: Vec<String>,
    pub due_date_gt: Option<i64>,
    pub due_date_lt: Option<i64>,
    pub date_created_gt: Option<i64>,
    pub date_created_lt: Option<i64>,
    pub date_updated_gt: Option<i64>,
    pub date_updated_lt: Option<i64>,
}

impl TaskFilter {
    fn apply(&self, endpoint: Endpoint, page: usize) -> Endpoint {
        endpoint
            .query("archived", self.archived)
            .query("include_closed", self.include_closed)
            .query("subtasks", self.subtasks)
            .query("page", page)
            .query_opt("order_by", self.order_by.as_deref())
            .query_opt("reverse", self.reverse.then_some("true"))
            .query_each("statuses", &self.statuses)
            .query_each("assignees", &self.assignees)
            .query_opt("due_date_gt", self.due_date_gt)
            .query_opt("due_date_lt", self.due_date_lt)
            .query_opt("date_created_gt", self.date_created_gt)
            .query_opt("date_created_lt", self.date_created_lt)
            .query_opt("date_updated_gt", self.date_updated_gt)
            .query_opt("date_updated_lt", self.date_updated_lt)
    }
}

/// Fields for a new task. Only `name` is required.
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    /// 1 (urgent) through 4 (low).
    pub priority: Option<u8>,
    pub assignees: Vec<i64>,
    pub tags: Vec<String>,
    pub due_date: Option<i64>,
    pub due_date_time: bool,
    pub start_date: Option<i64>,
    pub start_date_time: bool,
    /// Milliseconds.
    pub time_estimate: Option<i64>,
    /// Parent task id, for subtasks.
    pub parent: Option<String>,
    pub notify_all: bool,
    pub custom_fields: Option<Value>,
}

impl CreateTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.name, "name")?;
        if let Some(p) = self.priority {
            if !(1..=4).contains(&p) {
                return Err(ClickUpError::InvalidInput(
                    "priority must be between 1 (urgent) and 4 (low)".into(),
                ));
            }
        }
        Ok(())
    }

    fn to_body(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "notify_all": self.notify_all,
        });
        if let Some(description) = &self.description {
            body["description"] = json!(description);
        }
        if let Some(status) = &self.status {
            body["status"] = json!(status);
        }
        if let Some(priority) = self.priority {
            body["priority"] = json!(priority);
        }
        if !self.assignees.is_empty() {
            body["assignees"] = json!(self.assignees);
        }
        if !self.tags.is_empty() {
            body["tags"] = json!(self.tags);
        }
        if let Some(due) = self.due_date {
            body["due_date"] = json!(due);
            body["due_date_time"] = json!(self.due_date_time);
        }
        if let Some(start) = self.start_date {
            body["start_date"] = json!(start);
            body["start_date_time"] = json!(self.start_date_time);
        }
        if let Some(estimate) = self.time_estimate {
            body["time_estimate"] = json!(estimate);
        }
        if let Some(parent) = &self.parent {
            body["parent"] = json!(parent);
        }
        if let Some(fields) = &self.custom_fields {
            body["custom_fields"] = fields.clone();
        }
        body
    }
}

/// Partial update of an existing task. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<u8>,
    pub due_date: Option<i64>,
    pub start_date: Option<i64>,
    pub time_estimate: Option<i64>,
    pub archived: Option<bool>,
}

impl UpdateTask {
    fn to_body(&self) -> Result<Value> {
        let mut body = json!({});
        if let Some(name) = &self.name {
            body["name"] = json!(name);
        }
        if let Some(description) = &self.description {
            body["description"] = json!(description);
        }
        if let Some(status) = &self.status {
            body["status"] = json!(status);
        }
        if let Some(priority) = self.priority {
            if !(1..=4).contains(&priority) {
                return Err(ClickUpError::InvalidInput(
                    "priority must be between 1 (urgent) and 4 (low)".into(),
                ));
            }
            body["priority"] = json!(priority);
        }
        if let Some(due) = self.due_date {
            body["due_date"] = json!(due);
        }
        if let Some(start) = self.start_date {
            body["start_date"] = json!(start);
        }
        if let Some(estimate) = self.time_estimate {
            body["time_estimate"] = json!(estimate);
        }
        if let Some(archived) = self.archived {
            body["archived"] = json!(archived);
        }
        let empty = body.as_object().map(|o| o.is_empty()).unwrap_or(true);
        if empty {
            return Err(ClickUpError::InvalidInput("nothing to update".into()));
        }
        Ok(body)
    }
}

impl ClickUpGateway {
    /// List the tasks of one list, with server-side filters.
    pub async fn list_tasks(
        &self,
        list_id: &str,
        filter: &TaskFilter,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(list_id, "list_id")?;
        let endpoint = filter.apply(
            Endpoint::get(format!("/list/{list_id}/task")).items_in("tasks"),
            options.page,
        );
        self.list_rendered::<Task>(&endpoint, CacheClass::Volatile, options)
            .await
    }

    /// Filtered task search across one whole workspace.
    pub async fn search_tasks(
        &self,
        workspace_id: &str,
        filter: &TaskFilter,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = filter
            .apply(
                Endpoint::get(format!("/team/{workspace_id}/task")).items_in("tasks"),
                options.page,
            )
            .query_each("space_ids", &filter.space_ids)
            .query_each("list_ids", &filter.list_ids);
        self.list_rendered::<Task>(&endpoint, CacheClass::Volatile, options)
            .await
    }

    /// Case-insensitive substring match over workspace task names.
    ///
    /// The match runs locally over the fetched page; the upstream has no
    /// name-contains filter on this surface.
    pub async fn find_tasks_by_name(
        &self,
        workspace_id: &str,
        query: &str,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        require_id(query, "query")?;
        let endpoint = Endpoint::get(format!("/team/{workspace_id}/task"))
            .items_in("tasks")
            .query("page", options.page)
            .query("include_closed", "true");
        let items = self.execute_list(&endpoint, CacheClass::Volatile).await?;

        let needle = query.to_lowercase();
        let matched: Vec<Value> = items
            .into_iter()
            .filter(|t| {
                t.get("name")
                    .and_then(Value::as_str)
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect();

        // Matches within one fetched page, not a workspace-wide total.
        let request = RenderRequest::new(options.mode, options.limit, options.page);
        render_list_with::<Task>(&matched, &request, self.render_config())
    }

    /// Full details of one task.
    pub async fn get_task(
        &self,
        task_id: &str,
        include_subtasks: bool,
        mode: OutputMode,
    ) -> Result<String> {
        require_id(task_id, "task_id")?;
        let endpoint = Endpoint::get(format!("/task/{task_id}"))
            .query("include_subtasks", include_subtasks);
        self.one_rendered::<Task>(&endpoint, CacheClass::Volatile, mode)
            .await
    }

    /// List the attachments embedded in a task. The upstream has no
    /// standalone attachment listing; they arrive on the task body.
    pub async fn list_attachments(&self, task_id: &str, options: &PageOptions) -> Result<String> {
        require_id(task_id, "task_id")?;
        let endpoint = Endpoint::get(format!("/task/{task_id}"));
        let task = self.execute(&endpoint, CacheClass::Volatile).await?;
        let attachments = task
            .get("attachments")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        // The task carries its complete attachment set, so the count is a
        // real total.
        let request = RenderRequest::new(options.mode, options.limit, options.page)
            .total(Some(attachments.len()));
        render_list_with::<Attachment>(&attachments, &request, self.render_config())
    }

    pub async fn create_task(&self, list_id: &str, params: &CreateTask) -> Result<String> {
        self.ensure_writable("create_task")?;
        require_id(list_id, "list_id")?;
        params.validate()?;
        let endpoint =
            Endpoint::post(format!("/list/{list_id}/task")).body(params.to_body());
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!(
            "Task '{}' created.\n- **ID:** `{}`\n- **URL:** {}",
            data.get("name").and_then(Value::as_str).unwrap_or(&params.name),
            data.get("id").and_then(Value::as_str).unwrap_or("?"),
            data.get("url").and_then(Value::as_str).unwrap_or("-")
        ))
    }

    pub async fn update_task(&self, task_id: &str, params: &UpdateTask) -> Result<String> {
        self.ensure_writable("update_task")?;
        require_id(task_id, "task_id")?;
        let endpoint = Endpoint::put(format!("/task/{task_id}")).body(params.to_body()?);
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!(
            "Task '{}' updated.",
            data.get("name").and_then(Value::as_str).unwrap_or(task_id)
        ))
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<String> {
        self.ensure_writable("delete_task")?;
        require_id(task_id, "task_id")?;
        let endpoint = Endpoint::delete(format!("/task/{task_id}"));
        self.execute(&endpoint, CacheClass::Volatile).await?;
        Ok(format!("Task `{task_id}` deleted."))
    }

    /// Move a task to another list.
    ///
    /// The upstream has no native move; this adds the task to the target
    /// list and removes it from its current one, reading the current list
    /// first.
    pub async fn move_task(&self, task_id: &str, target_list_id: &str) -> Result<String> {
        self.ensure_writable("move_task")?;
        require_id(task_id, "task_id")?;
        require_id(target_list_id, "target_list_id")?;

        let task = self
            .execute(&Endpoint::get(format!("/task/{task_id}")), CacheClass::Volatile)
            .await?;
        let current_list = task
            .get("list")
            .and_then(|l| l.get("id"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        self.execute(
            &Endpoint::post(format!("/list/{target_list_id}/task/{task_id}")),
            CacheClass::Volatile,
        )
        .await?;

        if let Some(current) = current_list.filter(|c| c != target_list_id) {
            self.execute(
                &Endpoint::delete(format!("/list/{current}/task/{task_id}")),
                CacheClass::Volatile,
            )
            .await?;
        }
        Ok(format!("Task `{task_id}` moved to list `{target_list_id}`."))
    }

    /// Copy a task into a list, preserving its main fields.
    pub async fn duplicate_task(
        &self,
        task_id: &str,
        list_id: &str,
        name: Option<&str>,
    ) -> Result<String> {
        self.ensure_writable("duplicate_task")?;
        require_id(task_id, "task_id")?;
        require_id(list_id, "list_id")?;

        let original = self
            .execute(&Endpoint::get(format!("/task/{task_id}")), CacheClass::Volatile)
            .await?;

        let copy_name = name.map(str::to_owned).unwrap_or_else(|| {
            format!(
                "Copy of {}",
                original.get("name").and_then(Value::as_str).unwrap_or("task")
            )
        });
        let mut body = json!({"name": copy_name});
        if let Some(description) = original.get("description").and_then(Value::as_str) {
            body["description"] = json!(description);
        }
        if let Some(priority) = original
            .get("priority")
            .and_then(|p| p.get("id"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<u8>().ok())
        {
            body["priority"] = json!(priority);
        }
        if let Some(due) = original
            .get("due_date")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok())
        {
            body["due_date"] = json!(due);
        }
        let tags: Vec<&str> = original
            .get("tags")
            .and_then(Value::as_array)
            .map(|ts| {
                ts.iter()
                    .filter_map(|t| t.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        if !tags.is_empty() {
            body["tags"] = json!(tags);
        }

        let data = self
            .execute(
                &Endpoint::post(format!("/list/{list_id}/task")).body(body),
                CacheClass::Volatile,
            )
            .await?;
        Ok(format!(
            "Task duplicated.\n- **New ID:** `{}`\n- **Name:** {}",
            data.get("id").and_then(Value::as_str).unwrap_or("?"),
            data.get("name").and_then(Value::as_str).unwrap_or(&copy_name)
        ))
    }
}
