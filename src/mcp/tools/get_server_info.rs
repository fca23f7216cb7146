//! Get server info tool handler
//!
//! Returns version and build information about the running server.

use super::handler::{text_content, McpToolHandler};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema, PROTOCOL_VERSION};
use crate::mcp::SERVER_NAME;
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct GetServerInfoHandler {
    tools: Vec<(String, String)>,
}

impl GetServerInfoHandler {
    /// `tools` is the (name, summary) list shown under Available Tools
    pub fn new(tools: Vec<(String, String)>) -> Self {
        Self { tools }
    }

    fn format_info(&self) -> String {
        let version = env!("CARGO_PKG_VERSION");
        let rust_version = env!("CARGO_PKG_RUST_VERSION");

        let mut output = String::from("# grok-search MCP Server Information\n\n");

        output.push_str("## Version\n");
        output.push_str(&format!("- **Version:** {version}\n"));
        output.push_str(&format!("- **Rust Version:** {rust_version}\n\n"));

        output.push_str("## Server Details\n");
        output.push_str(&format!("- **Name:** {SERVER_NAME}\n"));
        output.push_str("- **Description:** Web search and page fetch via a chat completion API\n");
        output.push_str(&format!("- **Protocol:** MCP {PROTOCOL_VERSION}\n\n"));

        output.push_str("## Available Tools\n");
        for (name, summary) in &self.tools {
            output.push_str(&format!("- {name}: {summary}\n"));
        }
        output.push_str("- get_server_info: Show server version (this tool)\n");

        output
    }
}

#[async_trait]
impl McpToolHandler for GetServerInfoHandler {
    fn name(&self) -> &str {
        "get_server_info"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_server_info".to_string(),
            description: "Get version and build information about the running grok-search server. \
                         Returns server version, protocol version and available tools. \
                         Fast operation (<1ms), no network access."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        Ok(text_content(self.format_info()))
    }
}
