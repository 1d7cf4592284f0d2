//! Collaboration records: members, comments, tags, checklists, fields.

use serde::Deserialize;

use crate::render::{Render, RenderConfig, format_timestamp, truncate};

use super::ms_timestamp;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Member {
    /// Username, falling back to email.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

/// Workspace membership entry: the user plus their role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub user: Member,
    #[serde(default)]
    pub role: Option<i64>,
}

impl Render for TeamMember {
    const NOUN: &'static str = "members";

    fn compact_line(&self, config: &RenderConfig) -> String {
        let role = self
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "{} | role {} | `{}`",
            truncate(self.user.display_name(), config.max_name),
            role,
            self.user.id.unwrap_or_default()
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.user.display_name()),
            format!("- **ID:** `{}`", self.user.id.unwrap_or_default()),
        ];
        if let Some(email) = &self.user.email {
            lines.push(format!("- **Email:** {email}"));
        }
        if let Some(role) = self.role {
            lines.push(format!("- **Role:** {role}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub comment_text: String,
    #[serde(default)]
    pub user: Option<Member>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date: Option<i64>,
}

impl Comment {
    fn author(&self) -> &str {
        self.user
            .as_ref()
            .map(Member::display_name)
            .unwrap_or("anonymous")
    }
}

impl Render for Comment {
    const NOUN: &'static str = "comments";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{}: {} | `{}`",
            self.author(),
            truncate(&self.comment_text, config.max_name),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let date = format_timestamp(self.date).unwrap_or_else(|| "-".to_string());
        format!("### {} - {}\n{}", self.author(), date, self.comment_text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag_fg: Option<String>,
    #[serde(default)]
    pub tag_bg: Option<String>,
}

impl Render for Tag {
    const NOUN: &'static str = "tags";

    fn compact_line(&self, config: &RenderConfig) -> String {
        truncate(&self.name, config.max_name)
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![format!("## {}", self.name)];
        if let Some(fg) = &self.tag_fg {
            lines.push(format!("- **Foreground:** {fg}"));
        }
        if let Some(bg) = &self.tag_bg {
            lines.push(format!("- **Background:** {bg}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub assignee: Option<Member>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    fn resolved_count(&self) -> usize {
        self.items.iter().filter(|i| i.resolved).count()
    }
}

impl Render for Checklist {
    const NOUN: &'static str = "checklists";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{} | {}/{} done | `{}`",
            truncate(&self.name, config.max_name),
            self.resolved_count(),
            self.items.len(),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
            format!("- **Progress:** {}/{}", self.resolved_count(), self.items.len()),
        ];
        for item in &self.items {
            let check = if item.resolved { "[x]" } else { "[ ]" };
            let assignee = item
                .assignee
                .as_ref()
                .map(|a| format!(" (@{})", a.display_name()))
                .unwrap_or_default();
            lines.push(format!("  - {} {}{}", check, item.name, assignee));
        }
        lines.join("\n")
    }
}

/// File attached to a task.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date: Option<i64>,
    #[serde(default)]
    pub user: Option<Member>,
}

impl Attachment {
    fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("untitled")
    }

    fn size_kb(&self) -> u64 {
        self.size.unwrap_or(0) / 1024
    }
}

impl Render for Attachment {
    const NOUN: &'static str = "attachments";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{}.{} | {}KB | `{}`",
            truncate(self.display_title(), config.max_name),
            self.extension.as_deref().unwrap_or("?"),
            self.size_kb(),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.display_title()),
            format!("- **ID:** `{}`", self.id),
            format!("- **Extension:** {}", self.extension.as_deref().unwrap_or("-")),
            format!("- **Size:** {} KB", self.size_kb()),
        ];
        if let Some(url) = &self.url {
            lines.push(format!("- **URL:** {url}"));
        }
        if let Some(date) = format_timestamp(self.date) {
            lines.push(format!("- **Uploaded:** {date}"));
        }
        if let Some(user) = &self.user {
            lines.push(format!("- **Uploaded by:** {}", user.display_name()));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
}

impl Render for CustomField {
    const NOUN: &'static str = "custom fields";

    fn compact_line(&self, config: &RenderConfig) -> String {
        let required = if self.required { "required" } else { "optional" };
        format!(
            "{} | {} | {} | `{}`",
            truncate(&self.name, config.max_name),
            self.kind,
            required,
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        [
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
            format!("- **Type:** {}", self.kind),
            format!("- **Required:** {}", if self.required { "yes" } else { "no" }),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_falls_back_to_email() {
        let member: Member =
            serde_json::from_value(json!({"id": 5, "email": "a@b.co"})).unwrap();
        assert_eq!(member.display_name(), "a@b.co");
    }

    #[test]
    fn checklist_progress_counts_resolved() {
        let checklist: Checklist = serde_json::from_value(json!({
            "id": "c1",
            "name": "Launch",
            "items": [
                {"id": "1", "name": "a", "resolved": true},
                {"id": "2", "name": "b", "resolved": false}
            ]
        }))
        .unwrap();
        assert!(
            checklist
                .compact_line(&RenderConfig::default())
                .contains("1/2 done")
        );
    }

    #[test]
    fn attachment_line_shows_size_in_kb() {
        let attachment: Attachment = serde_json::from_value(json!({
            "id": "a1",
            "title": "report",
            "extension": "pdf",
            "size": 5120
        }))
        .unwrap();
        assert_eq!(
            attachment.compact_line(&RenderConfig::default()),
            "report.pdf | 5KB | `a1`"
        );
    }

    #[test]
    fn untitled_attachment_degrades_gracefully() {
        let attachment: Attachment = serde_json::from_value(json!({"id": "a2"})).unwrap();
        assert_eq!(
            attachment.compact_line(&RenderConfig::default()),
            "untitled.? | 0KB | `a2`"
        );
    }

    #[test]
    fn comment_truncates_text_in_compact() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "m1",
            "comment_text": "y".repeat(120),
            "user": {"username": "ana"}
        }))
        .unwrap();
        let line = comment.compact_line(&RenderConfig::default());
        assert!(line.contains(&"y".repeat(50)));
        assert!(!line.contains(&"y".repeat(51)));
    }
}
