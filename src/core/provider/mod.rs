//! Search provider abstraction
//!
//! A provider is a pluggable backend that turns a query into a ranked
//! list of [`SearchResult`]s. The server ships one implementation,
//! [`GrokProvider`], which asks an OpenAI-compatible chat completion
//! endpoint to search on its behalf.

pub mod grok;
pub mod parse;
#[cfg(test)]
pub(crate) mod stub;

pub use grok::GrokProvider;

use crate::core::error::{GrokSearchError, Result};
use crate::core::types::SearchResult;
use async_trait::async_trait;
use serde::Serialize;

/// Search capability
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Stable identifier used in logs and tool output
    fn provider_name(&self) -> &str;

    /// Largest `max_results` this provider accepts
    fn max_results_limit(&self) -> usize;

    /// Run `request`, returning at most `request.max_results` results in
    /// backend relevance order
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}

/// One search as asked for by a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    /// Site or community to focus on, e.g. "GitHub" or "Reddit"
    pub platform: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into().trim().to_string(),
            max_results,
            platform: None,
        }
    }

    /// Set the platform focus; blank values leave it unset
    pub fn with_platform(mut self, platform: Option<impl Into<String>>) -> Self {
        self.platform = platform
            .map(Into::into)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }
}

/// Page content capability
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its content as Markdown
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Connectivity check against the backend
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
    async fn probe(&self) -> ConnectionReport;
}

/// Outcome of a connectivity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Ok,
    HttpError,
    Timeout,
    NetworkError,
}

/// Result of [`ConnectionProbe::probe`]
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub status: ConnectionStatus,
    pub message: String,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_models: Vec<String>,
}

/// Check the arguments every provider must enforce
pub fn validate_search_args(query: &str, max_results: usize, limit: usize) -> Result<()> {
    if query.trim().is_empty() {
        return Err(GrokSearchError::ValidationError(
            "Query cannot be empty".to_string(),
        ));
    }

    if max_results == 0 {
        return Err(GrokSearchError::ValidationError(
            "max_results must be at least 1".to_string(),
        ));
    }

    if max_results > limit {
        return Err(GrokSearchError::ValidationError(format!(
            "max_results cannot exceed {limit}"
        )));
    }

    Ok(())
}

/// Reject anything that is not an absolute http(s) URL
pub fn validate_fetch_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(GrokSearchError::ValidationError(
            "URL cannot be empty".to_string(),
        ));
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(GrokSearchError::ValidationError(format!(
            "URL must be an absolute http(s) address: {url}"
        ))),
    }
}
