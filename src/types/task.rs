//! The task record and its small embedded references.

use serde::Deserialize;

use crate::render::{Render, RenderConfig, format_date, format_timestamp, truncate};

use super::{Member, ms_timestamp};

/// Status as embedded in a task body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusRef {
    #[serde(default)]
    pub status: String,
}

/// Priority as embedded in a task body.
#[derive(Debug, Clone, Deserialize)]
pub struct PriorityRef {
    #[serde(default)]
    pub priority: String,
}

/// Minimal `{id, name}` reference to a parent container.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Tag as embedded in a task body.
#[derive(Debug, Clone, Deserialize)]
pub struct TagRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<StatusRef>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<PriorityRef>,
    #[serde(default)]
    pub assignees: Vec<Member>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub list: Option<NamedRef>,
    #[serde(default)]
    pub folder: Option<NamedRef>,
    #[serde(default)]
    pub space: Option<NamedRef>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date_created: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date_updated: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date_closed: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub due_date: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub start_date: Option<i64>,
    /// Milliseconds.
    #[serde(default)]
    pub time_estimate: Option<i64>,
    /// Milliseconds.
    #[serde(default)]
    pub time_spent: Option<i64>,
}

impl Task {
    fn status_label(&self) -> &str {
        self.status
            .as_ref()
            .map(|s| s.status.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("?")
    }
}

impl Render for Task {
    const NOUN: &'static str = "tasks";

    /// `[{status}] {name} | {due date} | {id}` within field budgets.
    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "[{}] {} | {} | `{}`",
            truncate(self.status_label(), config.max_status),
            truncate(&self.name, config.max_name),
            format_date(self.due_date),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
            format!("- **Status:** {}", self.status_label()),
        ];
        if let Some(url) = &self.url {
            lines.push(format!("- **URL:** {url}"));
        }
        if let Some(p) = &self.priority {
            lines.push(format!("- **Priority:** {}", p.priority));
        }
        if let Some(created) = format_timestamp(self.date_created) {
            lines.push(format!("- **Created:** {created}"));
        }
        if let Some(updated) = format_timestamp(self.date_updated) {
            lines.push(format!("- **Updated:** {updated}"));
        }
        if let Some(due) = format_timestamp(self.due_date) {
            lines.push(format!("- **Due:** {due}"));
        }
        if let Some(start) = format_timestamp(self.start_date) {
            lines.push(format!("- **Start:** {start}"));
        }
        if let Some(closed) = format_timestamp(self.date_closed) {
            lines.push(format!("- **Closed:** {closed}"));
        }
        if !self.assignees.is_empty() {
            let names: Vec<&str> = self.assignees.iter().map(Member::display_name).collect();
            lines.push(format!("- **Assignees:** {}", names.join(", ")));
        }
        if !self.tags.is_empty() {
            let names: Vec<&str> = self.tags.iter().map(|t| t.name.as_str()).collect();
            lines.push(format!("- **Tags:** {}", names.join(", ")));
        }
        for (label, parent) in [
            ("List", &self.list),
            ("Folder", &self.folder),
            ("Space", &self.space),
        ] {
            if let Some(name) = parent.as_ref().and_then(|p| p.name.as_deref()) {
                lines.push(format!("- **{label}:** {name}"));
            }
        }
        if let Some(estimate) = self.time_estimate {
            lines.push(format!("- **Estimate:** {} min", estimate / 60_000));
        }
        if let Some(spent) = self.time_spent {
            lines.push(format!("- **Tracked:** {} min", spent / 60_000));
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("\n### Description\n{description}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Task {
        serde_json::from_value(json!({
            "id": "abc123",
            "name": "Draft the quarterly report for the steering committee review",
            "status": {"status": "in progress"},
            "due_date": "1700000000000",
            "assignees": [{"id": 1, "username": "ana"}],
            "list": {"id": "9", "name": "Reports"}
        }))
        .unwrap()
    }

    #[test]
    fn compact_line_applies_budgets() {
        let line = sample().compact_line(&RenderConfig::default());
        assert!(line.starts_with("[in progres] "));
        assert!(line.contains("Draft the quarterly report for the steering commit"));
        assert!(line.contains("| 2023-11-14 |"));
        assert!(line.ends_with("`abc123`"));
    }

    #[test]
    fn detailed_block_keeps_full_fields() {
        let block = sample().detailed_block();
        assert!(block.contains("steering committee review"));
        assert!(block.contains("- **Status:** in progress"));
        assert!(block.contains("- **List:** Reports"));
    }

    #[test]
    fn missing_status_renders_placeholder() {
        let task: Task = serde_json::from_value(json!({"id": "t", "name": "n"})).unwrap();
        assert!(task.compact_line(&RenderConfig::default()).starts_with("[?]"));
    }
}
