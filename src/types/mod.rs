//! Domain records decoded from upstream responses.
//!
//! These are deliberately partial views: each struct names only the fields
//! the renderer prints, and `#[serde(default)]` keeps decoding tolerant of
//! fields the upstream omits. The JSON output mode bypasses these types
//! entirely and passes the raw payload through.
//!
//! Timestamps arrive as millisecond epochs encoded inconsistently (string,
//! number, or null) — [`ms_timestamp`] absorbs all three.

mod collab;
mod docs;
mod hierarchy;
mod task;
mod time;

pub use collab::{Attachment, Checklist, ChecklistItem, Comment, CustomField, Member, Tag, TeamMember};
pub use docs::{Doc, TaskTemplate};
pub use hierarchy::{Folder, ListRef, Space, StatusDef, TaskList, Workspace};
pub use task::{NamedRef, PriorityRef, StatusRef, TagRef, Task};
pub use time::TimeEntry;

use serde::{Deserialize, Deserializer};

/// Deserialize a millisecond epoch that may arrive as a JSON string, a
/// number, or null.
pub(crate) fn ms_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
        Null(Option<()>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Some(n),
        Raw::Text(s) => s.parse().ok(),
        Raw::Null(_) => None,
    })
}
