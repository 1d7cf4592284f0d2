//! Workspace hierarchy records: workspace, space, folder, list.

use serde::Deserialize;

use crate::render::{Render, RenderConfig, format_timestamp, truncate};

use super::{TeamMember, ms_timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Render for Workspace {
    const NOUN: &'static str = "workspaces";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{} | {} members | `{}`",
            truncate(&self.name, config.max_name),
            self.members.len(),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
            format!("- **Members:** {}", self.members.len()),
        ];
        for member in &self.members {
            lines.push(format!("  - {}", member.user.display_name()));
        }
        lines.join("\n")
    }
}

/// A status defined on a space or list.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDef {
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub statuses: Vec<StatusDef>,
}

impl Render for Space {
    const NOUN: &'static str = "spaces";

    fn compact_line(&self, config: &RenderConfig) -> String {
        let visibility = if self.private { "private" } else { "public" };
        format!(
            "{} | {} | `{}`",
            truncate(&self.name, config.max_name),
            visibility,
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
            format!("- **Private:** {}", if self.private { "yes" } else { "no" }),
        ];
        if !self.statuses.is_empty() {
            let names: Vec<&str> = self.statuses.iter().map(|s| s.status.as_str()).collect();
            lines.push(format!("- **Statuses:** {}", names.join(", ")));
        }
        lines.join("\n")
    }
}

/// Bare `{id, name}` of a list as embedded in a folder body.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lists: Vec<ListRef>,
}

impl Render for Folder {
    const NOUN: &'static str = "folders";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{} | {} lists | `{}`",
            truncate(&self.name, config.max_name),
            self.lists.len(),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
        ];
        if !self.lists.is_empty() {
            lines.push("- **Lists:**".to_string());
            for list in &self.lists {
                lines.push(format!("  - {} (`{}`)", list.name, list.id));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task_count: Option<u64>,
    #[serde(default)]
    pub folder: Option<ListRef>,
    #[serde(default)]
    pub space: Option<ListRef>,
    #[serde(default)]
    pub statuses: Vec<StatusDef>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub due_date: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub start_date: Option<i64>,
}

impl Render for TaskList {
    const NOUN: &'static str = "lists";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{} | {} tasks | `{}`",
            truncate(&self.name, config.max_name),
            self.task_count.unwrap_or(0),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
            format!("- **Tasks:** {}", self.task_count.unwrap_or(0)),
        ];
        if let Some(folder) = &self.folder {
            lines.push(format!("- **Folder:** {} (`{}`)", folder.name, folder.id));
        }
        if let Some(space) = &self.space {
            lines.push(format!("- **Space:** {} (`{}`)", space.name, space.id));
        }
        if let Some(due) = format_timestamp(self.due_date) {
            lines.push(format!("- **Due:** {due}"));
        }
        if let Some(start) = format_timestamp(self.start_date) {
            lines.push(format!("- **Start:** {start}"));
        }
        if !self.statuses.is_empty() {
            let names: Vec<&str> = self.statuses.iter().map(|s| s.status.as_str()).collect();
            lines.push(format!("- **Statuses:** {}", names.join(", ")));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn folder_counts_embedded_lists() {
        let folder: Folder = serde_json::from_value(json!({
            "id": "f1",
            "name": "Plans",
            "lists": [{"id": "l1", "name": "A"}, {"id": "l2", "name": "B"}]
        }))
        .unwrap();
        assert_eq!(
            folder.compact_line(&RenderConfig::default()),
            "Plans | 2 lists | `f1`"
        );
    }

    #[test]
    fn space_visibility_label() {
        let space: Space =
            serde_json::from_value(json!({"id": "s", "name": "Ops", "private": true})).unwrap();
        assert!(space.compact_line(&RenderConfig::default()).contains("private"));
    }
}
