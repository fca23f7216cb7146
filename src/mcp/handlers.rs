//! MCP protocol method handlers

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use crate::mcp::tools::{
    error_content, GetConfigInfoHandler, GetServerInfoHandler, ToolRegistry, WebFetchHandler,
    WebSearchHandler,
};
use crate::mcp::SERVER_NAME;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ProtocolHandlers {
    initialized: AtomicBool,
    tool_registry: ToolRegistry,
}

impl ProtocolHandlers {
    pub fn new(services: Arc<Services>) -> Self {
        let mut registry = ToolRegistry::new();

        registry.register(Arc::new(WebSearchHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(WebFetchHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(GetConfigInfoHandler::new(Arc::clone(&services))));

        let summaries = registry
            .list()
            .into_iter()
            .map(|schema| (schema.name, first_sentence(&schema.description)))
            .collect();
        registry.register(Arc::new(GetServerInfoHandler::new(summaries)));

        Self {
            initialized: AtomicBool::new(false),
            tool_registry: registry,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: InitializeParams = match request.params {
            Some(Value::Null) | None => InitializeParams::default(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| McpError::InvalidParams(format!("Invalid initialize params: {e}")))?,
        };

        match &params.client_info {
            Some(client) => info!("Client initialized: {} {}", client.name, client.version),
            None => info!("Client initialized"),
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle initialized notification
    pub async fn handle_initialized(
        &self,
        _request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        self.initialized.store(true, Ordering::SeqCst);
        info!("Server initialized");

        Ok(JsonRpcResponse::empty())
    }

    /// Handle tools/list request
    pub async fn handle_tools_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let tools = self.tool_registry.list();

        Ok(JsonRpcResponse::success(
            request.id,
            json!({ "tools": tools }),
        ))
    }

    /// Handle tools/call request
    ///
    /// Protocol problems (missing params, unknown tool) become JSON-RPC
    /// errors. Failures inside a tool become a tool result flagged
    /// `isError` so the host can show the message to the model.
    pub async fn handle_tools_call(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params_value = match request.params {
            Some(v) => v,
            None => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    INVALID_PARAMS,
                    "Missing params".to_string(),
                ));
            }
        };

        let params: ToolCallParams = match serde_json::from_value(params_value) {
            Ok(p) => p,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                ));
            }
        };

        let handler = match self.tool_registry.get(&params.name) {
            Some(h) => h,
            None => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("Tool not found: {}", params.name),
                ));
            }
        };

        let arguments = match params.arguments {
            Value::Null => json!({}),
            other => other,
        };

        let result = match handler.execute(arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %params.name, code = e.code(), "Tool call failed: {}", e);
                error_content(e.tool_message())
            }
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle ping request
    pub async fn handle_ping(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        Ok(JsonRpcResponse::success(request.id, json!({})))
    }
}

fn first_sentence(description: &str) -> String {
    match description.find(". ") {
        Some(idx) => description[..idx].to_string(),
        None => description.trim_end_matches('.').to_string(),
    }
}
