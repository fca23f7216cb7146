//! Web fetch tool handler
//!
//! Returns the content of one page as Markdown, extracted by the
//! provider's model.

use super::handler::{text_content, McpToolHandler};
use crate::core::provider::validate_fetch_url;
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub struct WebFetchHandler {
    services: Arc<Services>,
}

impl WebFetchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for WebFetchHandler {
    fn name(&self) -> &str {
        "web_fetch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "web_fetch".to_string(),
            description: "Fetch a web page and return its complete content as structured Markdown \
                         (front matter with source, title and fetch time, then headings, lists, \
                         tables, links, images and code blocks). \
                         Content is not summarized or translated. \
                         Pages that need login or JavaScript rendering may come back incomplete."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Absolute http(s) URL of the page",
                        "minLength": 1
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct FetchArgs {
            #[serde(default)]
            url: String,
        }

        let args: FetchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        validate_fetch_url(&args.url).map_err(McpError::from)?;

        debug!("Begin fetch: {}", args.url);
        let content = self
            .services
            .fetcher
            .fetch(args.url.trim())
            .await
            .map_err(McpError::from)?;
        debug!(chars = content.chars().count(), "Fetch finished");

        Ok(text_content(content))
    }
}
