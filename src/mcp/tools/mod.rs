//! MCP tool implementations
//!
//! This module contains all MCP tool handlers exposed to the host.

pub mod get_config_info;
pub mod get_server_info;
pub mod handler;
pub mod registry;
pub mod web_fetch;
pub mod web_search;

pub use get_config_info::GetConfigInfoHandler;
pub use get_server_info::GetServerInfoHandler;
pub use handler::{error_content, text_content, McpToolHandler};
pub use registry::ToolRegistry;
pub use web_fetch::WebFetchHandler;
pub use web_search::WebSearchHandler;
