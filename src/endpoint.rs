//! Endpoint descriptors.
//!
//! An [`Endpoint`] is the immutable, per-call description of one upstream
//! request: method, resolved path, query parameters, API version, optional
//! JSON body, and the envelope knowledge needed to decode list responses.
//! Operations build one and hand it to the
//! [`RequestExecutor`](crate::executor::RequestExecutor); nothing else about
//! the transport leaks into the operation layer.
//!
//! Two API surface versions coexist. v2 wraps list responses in a named
//! field (`{"tasks": [...]}`); v3 returns the collection directly. The
//! version tag on the descriptor selects the decoder — no shape-sniffing at
//! call sites.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::config::{MAX_CALL_TIMEOUT, MIN_CALL_TIMEOUT};
use crate::{ClickUpError, Result};

/// Which of the two coexisting API surfaces an endpoint targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Envelope: list responses wrapped in a named field.
    V2,
    /// Envelope: list responses returned directly.
    V3,
}

/// Immutable description of one upstream call.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    version: ApiVersion,
    /// v2 wrapper field holding the items of a list response.
    items_field: Option<&'static str>,
    body: Option<Value>,
    timeout: Option<Duration>,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            version: ApiVersion::V2,
            items_field: None,
            body: None,
            timeout: None,
        }
    }

    /// A GET against the v2 surface.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST against the v2 surface.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// A PUT against the v2 surface.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// A DELETE against the v2 surface.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Target the v3 surface instead of v2.
    pub fn v3(mut self) -> Self {
        self.version = ApiVersion::V3;
        self
    }

    /// Name the v2 wrapper field holding list items (e.g. `"tasks"`).
    pub fn items_in(mut self, field: &'static str) -> Self {
        self.items_field = Some(field);
        self
    }

    /// Append one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append one query parameter per element, with a `[]`-suffixed key.
    pub fn query_each(mut self, key: &str, values: &[String]) -> Self {
        for v in values {
            self.query.push((format!("{key}[]"), v.clone()));
        }
        self
    }

    /// Append a query parameter only when the value is present.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Attach a JSON request body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the per-request timeout, clamped to [5s, 120s].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout.clamp(MIN_CALL_TIMEOUT, MAX_CALL_TIMEOUT));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// Short label for logs and metrics: `"GET /list/{..}/task"` style is
    /// the caller's choice of path; we use the literal resolved path.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Deterministic cache key: version, method, path, and query pairs
    /// sorted by key so parameter order at the call site is irrelevant.
    pub fn cache_key(&self) -> String {
        let version = match self.version {
            ApiVersion::V2 => "v2",
            ApiVersion::V3 => "v3",
        };
        let mut pairs = self.query.clone();
        pairs.sort();
        let qs: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{version}:{}:{}?{}", self.method, self.path, qs.join("&"))
    }

    /// `"/{kind}/{id}"` needles identifying the resources this call
    /// touches. A mutation invalidates every cached entry whose key
    /// contains one of them.
    pub fn resource_needles(&self) -> Vec<String> {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        segments
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| format!("/{}/{}", c[0], c[1]))
            .collect()
    }

    /// Decode the items of a list response according to the version
    /// envelope: v2 unwraps the named field, v3 takes the body directly.
    pub fn decode_items(&self, body: &Value) -> Result<Vec<Value>> {
        let items = match self.version {
            ApiVersion::V2 => {
                let field = self.items_field.ok_or_else(|| ClickUpError::UnexpectedShape {
                    endpoint: self.label(),
                })?;
                body.get(field).and_then(Value::as_array).cloned()
            }
            ApiVersion::V3 => body.as_array().cloned(),
        };
        items.ok_or_else(|| ClickUpError::UnexpectedShape {
            endpoint: self.label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cache_key_deterministic() {
        let a = Endpoint::get("/list/9/task")
            .query("archived", "false")
            .query("page", 0);
        let b = Endpoint::get("/list/9/task")
            .query("page", 0)
            .query("archived", "false");
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn cache_key_differs_on_query() {
        let a = Endpoint::get("/list/9/task").query("page", 0);
        let b = Endpoint::get("/list/9/task").query("page", 1);
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn cache_key_differs_on_version() {
        let a = Endpoint::get("/workspaces/1/docs");
        let b = Endpoint::get("/workspaces/1/docs").v3();
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn decode_v2_unwraps_named_field() {
        let ep = Endpoint::get("/team").items_in("teams");
        let body = json!({"teams": [{"id": "1"}, {"id": "2"}]});
        let items = ep.decode_items(&body).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn decode_v3_takes_body_directly() {
        let ep = Endpoint::get("/workspaces/1/docs").v3();
        let body = json!([{"id": "d1"}]);
        let items = ep.decode_items(&body).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn decode_wrong_shape_is_an_error() {
        let ep = Endpoint::get("/team").items_in("teams");
        let err = ep.decode_items(&json!({"spaces": []})).unwrap_err();
        assert!(matches!(err, ClickUpError::UnexpectedShape { .. }));
    }

    #[test]
    fn resource_needles_pair_segments() {
        let ep = Endpoint::post("/list/9/task");
        assert_eq!(ep.resource_needles(), vec!["/list/9".to_string()]);

        let ep = Endpoint::delete("/checklist/5/checklist_item/7");
        assert_eq!(
            ep.resource_needles(),
            vec!["/checklist/5".to_string(), "/checklist_item/7".to_string()]
        );
    }

    #[test]
    fn timeout_override_clamped() {
        let ep = Endpoint::get("/team").timeout(Duration::from_secs(600));
        assert_eq!(ep.timeout_override(), Some(Duration::from_secs(120)));
        let ep = Endpoint::get("/team").timeout(Duration::from_secs(1));
        assert_eq!(ep.timeout_override(), Some(Duration::from_secs(5)));
    }
}
