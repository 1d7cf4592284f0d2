//! Time-tracking entries.

use serde::Deserialize;

use crate::render::{Render, RenderConfig, format_timestamp, truncate};

use super::{Member, NamedRef, ms_timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub start: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub end: Option<i64>,
    /// Milliseconds; negative while a timer is still running.
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub billable: bool,
    #[serde(default)]
    pub task: Option<NamedRef>,
    #[serde(default)]
    pub user: Option<Member>,
}

impl TimeEntry {
    /// Duration in whole minutes; 0 while running.
    pub fn minutes(&self) -> i64 {
        self.duration.filter(|d| *d > 0).unwrap_or(0) / 60_000
    }

    fn task_name(&self) -> &str {
        self.task
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or("?")
    }
}

impl Render for TimeEntry {
    const NOUN: &'static str = "time entries";

    fn compact_line(&self, config: &RenderConfig) -> String {
        let user = self
            .user
            .as_ref()
            .map(Member::display_name)
            .unwrap_or("?");
        let billable = if self.billable { "billable" } else { "-" };
        format!(
            "{} | {} min | {} | {} | `{}`",
            truncate(self.task_name(), config.max_name),
            self.minutes(),
            user,
            billable,
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## Time entry `{}`", self.id),
            format!("- **Task:** {}", self.task_name()),
            format!("- **Duration:** {} min", self.minutes()),
            format!("- **Billable:** {}", if self.billable { "yes" } else { "no" }),
        ];
        if let Some(user) = &self.user {
            lines.push(format!("- **User:** {}", user.display_name()));
        }
        if let Some(start) = format_timestamp(self.start) {
            lines.push(format!("- **Start:** {start}"));
        }
        if let Some(end) = format_timestamp(self.end) {
            lines.push(format!("- **End:** {end}"));
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("- **Description:** {description}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn running_timer_has_zero_minutes() {
        let entry: TimeEntry =
            serde_json::from_value(json!({"id": "e1", "duration": "-1700000000000"})).unwrap();
        assert_eq!(entry.minutes(), 0);
    }

    #[test]
    fn duration_converts_to_minutes() {
        let entry: TimeEntry =
            serde_json::from_value(json!({"id": "e1", "duration": "1800000", "billable": true}))
                .unwrap();
        assert_eq!(entry.minutes(), 30);
        assert!(entry.compact_line(&RenderConfig::default()).contains("billable"));
    }
}
