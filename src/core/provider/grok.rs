//! Grok search provider
//!
//! Delegates search to an OpenAI-compatible chat completion endpoint.
//! The model is told to search the live web and answer in response
//! schema v1, which [`parse`](super::parse) turns into results. One
//! request per call; no retry.

use super::parse::{extract_message_content, parse_search_content, preview};
use super::{
    validate_fetch_url, validate_search_args, ConnectionProbe, ConnectionReport,
    ConnectionStatus, PageFetcher, SearchProvider, SearchRequest,
};
use crate::core::config::Config;
use crate::core::error::{GrokSearchError, Result};
use crate::core::prompts;
use crate::core::types::SearchResult;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const PROVIDER_NAME: &str = "grok";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Provider backed by a Grok (or any OpenAI-compatible) API
#[derive(Clone)]
pub struct GrokProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_results_limit: usize,
    debug: bool,
}

impl GrokProvider {
    /// Build a provider from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.grok.timeout_sec))
            .build()
            .map_err(|e| GrokSearchError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.grok.api_url.trim().trim_end_matches('/').to_string(),
            api_key: config.grok.api_key.clone(),
            model: config.grok.model.clone(),
            max_results_limit: config.search.max_results_limit,
            debug: config.debug.enabled,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Chat completion endpoint derived from the configured API URL
    pub fn completions_url(&self) -> String {
        if self.base_url.ends_with(CHAT_COMPLETIONS_PATH) {
            self.base_url.clone()
        } else {
            format!("{}{CHAT_COMPLETIONS_PATH}", self.base_url)
        }
    }

    /// Model listing endpoint used by the connection probe
    pub fn models_url(&self) -> String {
        let base = self
            .base_url
            .strip_suffix(CHAT_COMPLETIONS_PATH)
            .unwrap_or(&self.base_url);
        format!("{base}/models")
    }

    /// Send one chat completion and return the assistant text
    ///
    /// Errors are plain strings; callers wrap them in the error variant
    /// for their operation.
    async fn complete(
        &self,
        system: &str,
        user: String,
    ) -> std::result::Result<String, String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
        };

        if self.debug {
            debug!(
                url = %self.completions_url(),
                model = %self.model,
                "Sending chat completion request"
            );
        }

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(describe_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(describe_http_error(status, &body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| format!("invalid JSON response body: {e}"))?;

        extract_message_content(&payload)
            .ok_or_else(|| "response has no message content".to_string())
    }
}

#[async_trait]
impl SearchProvider for GrokProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn max_results_limit(&self) -> usize {
        self.max_results_limit
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let query = request.query.trim();
        let max_results = request.max_results;
        let platform = request.platform.as_deref();
        validate_search_args(query, max_results, self.max_results_limit)?;

        let started = Instant::now();
        let outcome = match self
            .complete(
                prompts::SEARCH_PROMPT,
                prompts::search_user_message(query, max_results, platform),
            )
            .await
        {
            Ok(content) => {
                if self.debug {
                    debug!(content = %preview(&content, 500), "Search response content");
                }
                parse_search_content(&content, max_results)
            }
            Err(cause) => Err(GrokSearchError::SearchError(cause)),
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(results) => info!(
                provider = PROVIDER_NAME,
                query_chars = query.chars().count(),
                max_results,
                platform = platform.unwrap_or(""),
                latency_ms,
                results = results.len(),
                "Search completed"
            ),
            Err(e) => warn!(
                provider = PROVIDER_NAME,
                query_chars = query.chars().count(),
                max_results,
                platform = platform.unwrap_or(""),
                latency_ms,
                error = %e,
                "Search failed"
            ),
        }

        outcome
    }
}

#[async_trait]
impl PageFetcher for GrokProvider {
    async fn fetch(&self, url: &str) -> Result<String> {
        validate_fetch_url(url)?;

        let started = Instant::now();
        let outcome = self
            .complete(prompts::FETCH_PROMPT, prompts::fetch_user_message(url.trim()))
            .await
            .map_err(GrokSearchError::FetchError);
        let latency_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(content) => info!(
                provider = PROVIDER_NAME,
                url = %url.trim(),
                latency_ms,
                content_chars = content.chars().count(),
                "Fetch completed"
            ),
            Err(e) => warn!(
                provider = PROVIDER_NAME,
                url = %url.trim(),
                latency_ms,
                error = %e,
                "Fetch failed"
            ),
        }

        outcome
    }
}

#[async_trait]
impl ConnectionProbe for GrokProvider {
    async fn probe(&self) -> ConnectionReport {
        let started = Instant::now();
        let response = self
            .client
            .get(self.models_url())
            .bearer_auth(&self.api_key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        let elapsed = || started.elapsed().as_millis() as u64;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return ConnectionReport {
                    status: ConnectionStatus::Timeout,
                    message: format!(
                        "Request timed out after {}s, check network connection or API URL",
                        PROBE_TIMEOUT.as_secs()
                    ),
                    response_time_ms: elapsed(),
                    available_models: Vec::new(),
                }
            }
            Err(e) => {
                return ConnectionReport {
                    status: ConnectionStatus::NetworkError,
                    message: format!("Network error: {e}"),
                    response_time_ms: elapsed(),
                    available_models: Vec::new(),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ConnectionReport {
                status: ConnectionStatus::HttpError,
                message: describe_http_error(status, &body),
                response_time_ms: elapsed(),
                available_models: Vec::new(),
            };
        }

        let models = response
            .json::<Value>()
            .await
            .map(|body| model_ids(&body))
            .unwrap_or_default();
        let mut message = format!("Retrieved model list (HTTP {})", status.as_u16());
        if !models.is_empty() {
            message.push_str(&format!(", {} models", models.len()));
        }

        ConnectionReport {
            status: ConnectionStatus::Ok,
            message,
            response_time_ms: elapsed(),
            available_models: models,
        }
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

// ============================================
// Helper Functions
// ============================================

fn describe_request_error(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("request failed: {err}")
    }
}

fn describe_http_error(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message").or(Some(err)))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| preview(body, ERROR_BODY_PREVIEW_CHARS));

    format!("HTTP {}: {}", status.as_u16(), message)
}

fn model_ids(body: &Value) -> Vec<String> {
    body.get("data")
        .and_then(|d| d.as_array())
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("id").and_then(|id| id.as_str()))
                .map(|id| id.to_string())
                .collect()
        })
        .unwrap_or_default()
}
