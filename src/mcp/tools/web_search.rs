//! Web search tool handler

use super::handler::{text_content, McpToolHandler};
use crate::core::error::GrokSearchError;
use crate::core::format::format_search_results;
use crate::core::provider::{validate_search_args, SearchRequest};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub struct WebSearchHandler {
    services: Arc<Services>,
}

#[derive(Deserialize)]
struct WebSearchArgs {
    #[serde(default)]
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
    #[serde(default)]
    platform: Option<String>,
}

impl WebSearchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn limit(&self) -> usize {
        self.services
            .search
            .max_results_limit()
            .min(self.services.config.search.max_results_limit)
    }
}

#[async_trait]
impl McpToolHandler for WebSearchHandler {
    fn name(&self) -> &str {
        "web_search"
    }

    fn schema(&self) -> ToolSchema {
        let default_max = self.services.config.search.default_max_results;
        let limit = self.limit();

        ToolSchema {
            name: "web_search".to_string(),
            description: "Search the live web and return ranked results as Markdown. \
                         Each result has a title, URL and short summary, plus source \
                         and publication date when known. \
                         \
                         Write `query` as a clear, self-contained natural-language search \
                         and put constraints such as topic, time range or language in it. \
                         Use `platform` to focus on one site or community \
                         (for example GitHub, Reddit or Twitter). \
                         Results keep the original language of the pages."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query, e.g. 'rust ownership model' or \
                                       'tokio 1.40 release notes site:github.com'",
                        "minLength": 1
                    },
                    "platform": {
                        "type": "string",
                        "description": "Optional site or community to focus on, e.g. 'GitHub', \
                                       'Reddit' or 'Twitter'. Leave empty to search the whole web."
                    },
                    "max_results": {
                        "type": "integer",
                        "description": format!("Maximum number of results (default {default_max})"),
                        "default": default_max,
                        "minimum": 1,
                        "maximum": limit
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: WebSearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let max_results = args
            .max_results
            .unwrap_or(self.services.config.search.default_max_results);

        // Reject bad input before any network call
        validate_search_args(&args.query, max_results, self.limit()).map_err(McpError::from)?;

        let request = SearchRequest::new(args.query, max_results).with_platform(args.platform);

        let provider = self.services.search.provider_name();
        debug!(
            provider,
            max_results,
            platform = request.platform.as_deref().unwrap_or(""),
            "Begin search: {}",
            request.query
        );

        let results = self
            .services
            .search
            .search(&request)
            .await
            .map_err(McpError::from)?;

        if results.len() > max_results {
            return Err(McpError::from(GrokSearchError::SearchError(format!(
                "provider '{provider}' returned {} results for max_results={max_results}",
                results.len()
            ))));
        }

        debug!(provider, results = results.len(), "Search finished");

        Ok(text_content(format_search_results(&results)))
    }
}
