//! Time tracking: entries, timers, and the billable report.

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::cache::CacheClass;
use crate::endpoint::Endpoint;
use crate::gateway::ClickUpGateway;
use crate::render::{OutputMode, format_timestamp};
use crate::types::TimeEntry;
use crate::{ClickUpError, Result};

use super::{PageOptions, require_id};

/// Server-side filters for time entry queries. Bounds are millisecond
/// epochs.
#[derive(Debug, Clone, Default)]
pub struct TimeEntryFilter {
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub assignee: Option<i64>,
}

impl TimeEntryFilter {
    fn apply(&self, endpoint: Endpoint) -> Endpoint {
        endpoint
            .query_opt("start_date", self.start_date)
            .query_opt("end_date", self.end_date)
            .query_opt("assignee", self.assignee)
    }
}

/// A new time entry. `start` and `duration` are milliseconds.
#[derive(Debug, Clone, Default)]
pub struct CreateTimeEntry {
    pub start: i64,
    pub duration: i64,
    pub billable: bool,
    pub description: Option<String>,
    pub task_id: Option<String>,
    pub tags: Vec<String>,
}

impl ClickUpGateway {
    /// List time entries for a workspace.
    pub async fn list_time_entries(
        &self,
        workspace_id: &str,
        filter: &TimeEntryFilter,
        options: &PageOptions,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = filter.apply(
            Endpoint::get(format!("/team/{workspace_id}/time_entries")).items_in("data"),
        );
        self.list_rendered::<TimeEntry>(&endpoint, CacheClass::Volatile, options)
            .await
    }

    pub async fn create_time_entry(
        &self,
        workspace_id: &str,
        params: &CreateTimeEntry,
    ) -> Result<String> {
        self.ensure_writable("create_time_entry")?;
        require_id(workspace_id, "workspace_id")?;
        if params.duration <= 0 {
            return Err(ClickUpError::InvalidInput(
                "duration must be positive milliseconds".into(),
            ));
        }

        let mut body = json!({
            "start": params.start,
            "duration": params.duration,
            "billable": params.billable,
        });
        if let Some(task_id) = &params.task_id {
            body["tid"] = json!(task_id);
        }
        if let Some(description) = &params.description {
            body["description"] = json!(description);
        }
        if !params.tags.is_empty() {
            let tags: Vec<Value> = params.tags.iter().map(|t| json!({"name": t})).collect();
            body["tags"] = json!(tags);
        }

        let endpoint =
            Endpoint::post(format!("/team/{workspace_id}/time_entries")).body(body);
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let id = data
            .get("data")
            .and_then(|d| d.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("?");
        Ok(format!(
            "Time entry created.\n- **ID:** `{id}`\n- **Duration:** {} min\n- **Billable:** {}",
            params.duration / 60_000,
            if params.billable { "yes" } else { "no" }
        ))
    }

    /// Start a running timer, optionally attached to a task.
    pub async fn start_timer(
        &self,
        workspace_id: &str,
        task_id: Option<&str>,
    ) -> Result<String> {
        self.ensure_writable("start_timer")?;
        require_id(workspace_id, "workspace_id")?;
        let mut body = json!({});
        if let Some(task_id) = task_id {
            require_id(task_id, "task_id")?;
            body["tid"] = json!(task_id);
        }
        let endpoint =
            Endpoint::post(format!("/team/{workspace_id}/time_entries/start")).body(body);
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let id = data
            .get("data")
            .and_then(|d| d.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("?");
        Ok(format!("Timer started.\n- **ID:** `{id}`"))
    }

    /// Stop the running timer and report the tracked duration.
    pub async fn stop_timer(&self, workspace_id: &str) -> Result<String> {
        self.ensure_writable("stop_timer")?;
        require_id(workspace_id, "workspace_id")?;
        let endpoint = Endpoint::post(format!("/team/{workspace_id}/time_entries/stop"));
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let entry = data.get("data").cloned().unwrap_or(Value::Null);
        let minutes = entry
            .get("duration")
            .and_then(|d| match d {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            })
            .filter(|d| *d > 0)
            .map(|d| d / 60_000)
            .unwrap_or(0);
        Ok(format!("Timer stopped.\n- **Tracked:** {minutes} min"))
    }

    /// Show the currently running timer, if any.
    pub async fn running_timer(&self, workspace_id: &str, mode: OutputMode) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = Endpoint::get(format!("/team/{workspace_id}/time_entries/current"));
        let data = self.execute(&endpoint, CacheClass::Volatile).await?;
        let entry = data.get("data").cloned().unwrap_or(Value::Null);
        if entry.is_null() {
            return Ok("No timer running.".to_string());
        }
        if mode == OutputMode::Json {
            return Ok(serde_json::to_string(&entry)?);
        }
        let decoded: TimeEntry = serde_json::from_value(entry)?;
        let since = format_timestamp(decoded.start).unwrap_or_else(|| "-".to_string());
        Ok(format!(
            "Timer running since {since}.\n- **ID:** `{}`",
            decoded.id
        ))
    }

    /// Aggregate billable hours in a period, grouped by user and by task.
    pub async fn billable_report(
        &self,
        workspace_id: &str,
        filter: &TimeEntryFilter,
        mode: OutputMode,
    ) -> Result<String> {
        require_id(workspace_id, "workspace_id")?;
        let endpoint = filter.apply(
            Endpoint::get(format!("/team/{workspace_id}/time_entries")).items_in("data"),
        );
        let entries = self.execute_list(&endpoint, CacheClass::Volatile).await?;
        let fetched = entries.len();

        let billable: Vec<Value> = entries
            .into_iter()
            .filter(|e| e.get("billable").and_then(Value::as_bool).unwrap_or(false))
            .collect();

        if mode == OutputMode::Json {
            return Ok(serde_json::to_string(&json!({
                "total_entries": fetched,
                "billable_entries": billable.len(),
                "entries": billable,
            }))?);
        }
        if billable.is_empty() {
            return Ok("No billable hours in the period.".to_string());
        }

        let decoded: Vec<TimeEntry> = billable
            .iter()
            .map(|e| serde_json::from_value(e.clone()))
            .collect::<std::result::Result<_, _>>()?;

        let total_min: i64 = decoded.iter().map(TimeEntry::minutes).sum();
        let mut by_user: HashMap<String, i64> = HashMap::new();
        let mut by_task: HashMap<String, i64> = HashMap::new();
        for entry in &decoded {
            let user = entry
                .user
                .as_ref()
                .map(|u| u.display_name().to_owned())
                .unwrap_or_else(|| "unknown".to_string());
            let task = entry
                .task
                .as_ref()
                .and_then(|t| t.name.clone())
                .unwrap_or_else(|| "no task".to_string());
            *by_user.entry(user).or_default() += entry.minutes();
            *by_task.entry(task).or_default() += entry.minutes();
        }

        if mode == OutputMode::Compact {
            return Ok(format!(
                "**Billable hours** | {}h{:02}min | {} entries | {} users",
                total_min / 60,
                total_min % 60,
                decoded.len(),
                by_user.len()
            ));
        }

        let mut lines = vec![
            "# Billable hours".to_string(),
            format!("- **Total:** {}h {}min", total_min / 60, total_min % 60),
            format!("- **Entries:** {} of {} fetched", decoded.len(), fetched),
            "\n## By user".to_string(),
        ];
        let mut users: Vec<_> = by_user.into_iter().collect();
        users.sort_by(|a, b| b.1.cmp(&a.1));
        for (user, minutes) in users {
            lines.push(format!("- **{user}:** {}h {}min", minutes / 60, minutes % 60));
        }
        lines.push("\n## By task (top 10)".to_string());
        let mut tasks: Vec<_> = by_task.into_iter().collect();
        tasks.sort_by(|a, b| b.1.cmp(&a.1));
        for (task, minutes) in tasks.into_iter().take(10) {
            lines.push(format!("- {task}: {}h {}min", minutes / 60, minutes % 60));
        }
        Ok(lines.join("\n"))
    }
}
