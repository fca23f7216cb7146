//! Core data types for grok-search
//!
//! Contains the normalized search result record shared by providers,
//! the formatter and the MCP tools.

use serde::Serialize;

/// One search hit
///
/// Always has a non-empty title and url. Fields are private so a
/// constructed result cannot be changed; use the `with_*` builders
/// while constructing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    title: String,
    url: String,
    snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<usize>,
}

impl SearchResult {
    /// Create a result, or `None` when title or url is blank
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Option<Self> {
        let title = title.into().trim().to_string();
        let url = url.into().trim().to_string();
        if title.is_empty() || url.is_empty() {
            return None;
        }

        Some(Self {
            title,
            url,
            snippet: snippet.into().trim().to_string(),
            source: None,
            published_date: None,
            rank: None,
        })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = non_blank(source.into());
        self
    }

    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = non_blank(date.into());
        self
    }

    /// 1-based position in the backend's ordering
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn published_date(&self) -> Option<&str> {
        self.published_date.as_deref()
    }

    pub fn rank(&self) -> Option<usize> {
        self.rank
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
