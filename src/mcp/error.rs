//! MCP-specific error types

use crate::core::error::GrokSearchError;
use crate::mcp::protocol::{
    CONFIG_ERROR, FETCH_FAILED, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, PARSE_ERROR,
    SEARCH_FAILED,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::ToolError(code, _) => *code,
            McpError::InternalError(_) | McpError::Io(_) | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    /// Human-readable message for a tool error payload
    pub fn tool_message(&self) -> String {
        match self {
            McpError::ParseError(msg)
            | McpError::InvalidRequest(msg)
            | McpError::InvalidParams(msg)
            | McpError::InternalError(msg)
            | McpError::ToolError(_, msg) => msg.clone(),
            McpError::Io(e) => format!("I/O error: {e}"),
            McpError::Json(e) => format!("JSON error: {e}"),
        }
    }
}

impl From<GrokSearchError> for McpError {
    fn from(err: GrokSearchError) -> Self {
        let message = err.to_string();
        match err {
            GrokSearchError::ValidationError(_) => McpError::InvalidParams(message),
            GrokSearchError::SearchError(_) => McpError::ToolError(SEARCH_FAILED, message),
            GrokSearchError::FetchError(_) => McpError::ToolError(FETCH_FAILED, message),
            GrokSearchError::ConfigError(_) | GrokSearchError::TomlError(_) => {
                McpError::ToolError(CONFIG_ERROR, message)
            }
            GrokSearchError::IoError(_) | GrokSearchError::SerdeError(_) => {
                McpError::InternalError(message)
            }
        }
    }
}
