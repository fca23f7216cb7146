//! MCP (Model Context Protocol) server module
//!
//! Implements a JSON-RPC 2.0 MCP server over stdio that exposes web
//! search and page fetch as MCP tools.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

/// Name reported in `initialize` and `get_server_info`
pub const SERVER_NAME: &str = "grok-search-mcp";

// Re-export main types
pub use error::McpError;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
