//! Adaptive output rendering.
//!
//! A result set can be arbitrarily large; the consumer of this gateway is a
//! bounded context window. The renderer turns any list of records into one
//! of three shapes, never formatting more than the caller-declared limit:
//!
//! - [`OutputMode::Compact`] — one line per record with hard per-field
//!   truncation budgets. The default, and the only mode with a size
//!   guarantee.
//! - [`OutputMode::Detailed`] — a multi-line block per record, no field
//!   truncation. Opt-in, intended for small sets or single-record views.
//! - [`OutputMode::Json`] — the raw decoded payload for programmatic
//!   consumers, still capped at `limit` items.
//!
//! Pagination is advisory. When a page comes back full the renderer appends
//! one line suggesting the next page index; it never claims to know the
//! true remaining count unless the upstream response declared one.

use chrono::DateTime;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;

/// Default number of records rendered when the caller does not say.
pub const DEFAULT_LIMIT: usize = 25;

/// Hard ceiling on records per page; larger requests are clamped here.
pub const MAX_LIMIT: usize = 100;

/// Requested output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One bounded line per record.
    #[default]
    Compact,
    /// Full multi-line block per record, no truncation.
    Detailed,
    /// Raw decoded payload.
    Json,
}

/// Per-field truncation budgets applied in compact mode.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Budget for status labels. Default: 10.
    pub max_status: usize,
    /// Budget for names and titles. Default: 50.
    pub max_name: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_status: 10,
            max_name: 50,
        }
    }
}

/// One rendering invocation: mode, clamped limit, page index, and the
/// upstream-declared total when one exists.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub mode: OutputMode,
    pub limit: usize,
    pub page: usize,
    pub total: Option<usize>,
}

impl RenderRequest {
    /// Build a request, clamping `limit` to `[1, MAX_LIMIT]` and defaulting
    /// it to [`DEFAULT_LIMIT`] when absent. Clamping happens here, before
    /// any network call is made with the value.
    pub fn new(mode: OutputMode, limit: Option<usize>, page: usize) -> Self {
        Self {
            mode,
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            page,
            total: None,
        }
    }

    /// Attach an upstream-declared total count.
    pub fn total(mut self, total: Option<usize>) -> Self {
        self.total = total;
        self
    }
}

/// A record the renderer knows how to print.
pub trait Render {
    /// Plural noun for headers and empty-set messages, e.g. `"tasks"`.
    const NOUN: &'static str;

    /// One bounded line, compact mode. Field budgets come from `config`.
    fn compact_line(&self, config: &RenderConfig) -> String;

    /// Full multi-line block, detailed mode.
    fn detailed_block(&self) -> String;
}

/// Render a decoded list response.
///
/// The raw items are truncated to `request.limit` first, so no mode can
/// exceed the limit. Compact and detailed modes deserialize each record
/// into `T`; JSON mode serializes the truncated raw items untouched.
pub fn render_list<T>(items: &[Value], request: &RenderRequest) -> Result<String>
where
    T: Render + DeserializeOwned,
{
    render_list_with::<T>(items, request, &RenderConfig::default())
}

pub fn render_list_with<T>(
    items: &[Value],
    request: &RenderRequest,
    config: &RenderConfig,
) -> Result<String>
where
    T: Render + DeserializeOwned,
{
    let page = &items[..items.len().min(request.limit)];

    if request.mode == OutputMode::Json {
        return Ok(serde_json::to_string(page)?);
    }
    if page.is_empty() {
        return Ok(format!("No {} found.", T::NOUN));
    }

    let records: Vec<T> = page
        .iter()
        .map(|item| serde_json::from_value(item.clone()))
        .collect::<std::result::Result<_, _>>()?;

    let mut lines = Vec::new();
    match request.mode {
        OutputMode::Compact => {
            lines.push(format!(
                "**{} {}** (page {}):\n",
                records.len(),
                T::NOUN,
                request.page
            ));
            for (i, record) in records.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, record.compact_line(config)));
            }
        }
        OutputMode::Detailed => {
            for record in &records {
                lines.push(record.detailed_block());
                lines.push(String::new());
            }
        }
        OutputMode::Json => unreachable!(),
    }

    if page.len() >= request.limit {
        let total = request
            .total
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string());
        lines.push(format!(
            "\n_Showing {} of {}. Use `page={}` for more._",
            request.limit,
            total,
            request.page + 1
        ));
    }

    Ok(lines.join("\n"))
}

/// Render a single decoded record: JSON passes the raw body through,
/// everything else uses the detailed block.
pub fn render_one<T>(item: &Value, mode: OutputMode) -> Result<String>
where
    T: Render + DeserializeOwned,
{
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string(item)?);
    }
    let record: T = serde_json::from_value(item.clone())?;
    Ok(record.detailed_block())
}

/// Truncate on a character boundary, not a byte offset.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Millisecond epoch timestamp to `YYYY-MM-DD HH:MM:SS`, or the raw value
/// when it does not parse.
pub fn format_timestamp(ms: Option<i64>) -> Option<String> {
    let ms = ms?;
    Some(match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    })
}

/// Date part only, for compact lines. `-` when absent.
pub fn format_date(ms: Option<i64>) -> String {
    match format_timestamp(ms) {
        Some(ts) => truncate(&ts, 10),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        name: String,
    }

    impl Render for Row {
        const NOUN: &'static str = "rows";

        fn compact_line(&self, config: &RenderConfig) -> String {
            truncate(&self.name, config.max_name)
        }

        fn detailed_block(&self) -> String {
            format!("### {}\n- full", self.name)
        }
    }

    fn rows(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"name": format!("row {i}")})).collect()
    }

    #[test]
    fn compact_never_exceeds_limit() {
        let request = RenderRequest::new(OutputMode::Compact, Some(25), 0);
        let out = render_list::<Row>(&rows(100)[..25], &request).unwrap();
        let record_lines = out.lines().filter(|l| l.contains(". row")).count();
        assert_eq!(record_lines, 25);
        assert!(out.contains("_Showing 25 of ?. Use `page=1` for more._"));
    }

    #[test]
    fn partial_page_has_no_advisory() {
        let request = RenderRequest::new(OutputMode::Compact, Some(25), 0);
        let out = render_list::<Row>(&rows(7), &request).unwrap();
        assert!(!out.contains("Showing"));
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(RenderRequest::new(OutputMode::Compact, Some(200), 0).limit, 100);
        assert_eq!(RenderRequest::new(OutputMode::Compact, Some(0), 0).limit, 1);
        assert_eq!(RenderRequest::new(OutputMode::Compact, None, 0).limit, 25);
    }

    #[test]
    fn empty_set_message() {
        let request = RenderRequest::new(OutputMode::Compact, None, 0);
        let out = render_list::<Row>(&[], &request).unwrap();
        assert_eq!(out, "No rows found.");
    }

    #[test]
    fn json_mode_round_trips_raw_items() {
        let request = RenderRequest::new(OutputMode::Json, Some(2), 0);
        let items = vec![json!({"name": "a", "extra": 1}), json!({"name": "b"})];
        let out = render_list::<Row>(&items, &request).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, items);
    }

    #[test]
    fn long_name_truncated_in_compact_only() {
        let name = "x".repeat(80);
        let items = vec![json!({"name": name})];
        let compact = render_list::<Row>(
            &items,
            &RenderRequest::new(OutputMode::Compact, None, 0),
        )
        .unwrap();
        assert!(compact.contains(&"x".repeat(50)));
        assert!(!compact.contains(&"x".repeat(51)));

        let detailed = render_list::<Row>(
            &items,
            &RenderRequest::new(OutputMode::Detailed, None, 0),
        )
        .unwrap();
        assert!(detailed.contains(&"x".repeat(80)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("café au lait", 4), "café");
        assert_eq!(truncate("ab", 5), "ab");
    }

    #[test]
    fn timestamps_format_and_degrade() {
        assert_eq!(
            format_timestamp(Some(1700000000000)),
            Some("2023-11-14 22:13:20".to_string())
        );
        assert_eq!(format_timestamp(None), None);
        assert_eq!(format_date(Some(1700000000000)), "2023-11-14");
        assert_eq!(format_date(None), "-");
    }
}
