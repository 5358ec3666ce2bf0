use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::{Error, Result};

/// Link used when the backend sends an article without one.
pub const MISSING_LINK: &str = "#";

/// One news article as the backend serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: None,
            thumbnail: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = non_empty(Some(summary.into()));
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = non_empty(Some(thumbnail.into()));
        self
    }

    /// Build an article from one loosely shaped backend record.
    ///
    /// Only `title` is required. Optional fields of the wrong shape are
    /// treated as absent so the card falls back to its placeholders.
    pub fn from_value(item: &Value) -> Option<Self> {
        let title = item
            .get("title")
            .and_then(|v| v.as_str())
            .filter(|t| !t.trim().is_empty())?
            .to_string();

        let link = non_empty(string_field(item, "link"))
            .unwrap_or_else(|| MISSING_LINK.to_string());

        let summary = non_empty(string_field(item, "summary"));

        // Flat URL string (`thumbnail` or the backend's `image`), or the
        // Yahoo shape `{ "resolutions": [ { "url": .. } ] }`.
        let thumbnail = item
            .get("thumbnail")
            .or_else(|| item.get("image"))
            .and_then(|t| {
                t.as_str().map(|s| s.to_string()).or_else(|| {
                    t.get("resolutions")
                        .and_then(|r| r.as_array())
                        .and_then(|arr| arr.first())
                        .and_then(|r| r.get("url"))
                        .and_then(|u| u.as_str())
                        .map(|s| s.to_string())
                })
            });

        Some(Self {
            title,
            link,
            summary,
            thumbnail: non_empty(thumbnail),
        })
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Decode a `/api/news` response body.
///
/// An empty body and the falsy JSON values (`null`, `false`, `0`, `""`)
/// all mean "no articles". Anything else that is not an array is rejected.
/// Records without a usable title are skipped, not fatal.
pub fn decode_payload(body: &[u8]) -> Result<Vec<Article>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    match serde_json::from_slice::<Value>(body)? {
        Value::Null | Value::Bool(false) => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(Vec::new()),
        Value::Array(items) => {
            let mut articles = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match Article::from_value(item) {
                    Some(article) => articles.push(article),
                    None => tracing::warn!("Skipping news record {} without a usable title", index),
                }
            }
            Ok(articles)
        }
        other => Err(Error::Payload(format!(
            "expected an array of articles, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
