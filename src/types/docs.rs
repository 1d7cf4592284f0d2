//! Documents (v3 surface) and task templates.

use serde::Deserialize;

use crate::render::{Render, RenderConfig, format_timestamp, truncate};

use super::ms_timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct Doc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date_created: Option<i64>,
    #[serde(default, deserialize_with = "ms_timestamp")]
    pub date_updated: Option<i64>,
}

impl Render for Doc {
    const NOUN: &'static str = "docs";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{} | `{}`",
            truncate(&self.name, config.max_name),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        let mut lines = vec![
            format!("## {}", self.name),
            format!("- **ID:** `{}`", self.id),
        ];
        if let Some(created) = format_timestamp(self.date_created) {
            lines.push(format!("- **Created:** {created}"));
        }
        if let Some(updated) = format_timestamp(self.date_updated) {
            lines.push(format!("- **Updated:** {updated}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskTemplate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Render for TaskTemplate {
    const NOUN: &'static str = "templates";

    fn compact_line(&self, config: &RenderConfig) -> String {
        format!(
            "{} | `{}`",
            truncate(&self.name, config.max_name),
            self.id
        )
    }

    fn detailed_block(&self) -> String {
        format!("## {}\n- **ID:** `{}`", self.name, self.id)
    }
}
