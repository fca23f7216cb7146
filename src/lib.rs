//! grok-search - web search for MCP hosts
//!
//! An MCP server that answers `web_search` and `web_fetch` tool calls
//! by delegating to an OpenAI-compatible chat completion endpoint
//! (Grok by default) and returning Markdown text.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg, logging
//!   - provider (search backend trait, Grok client, response parsing)
//!   - format (result list rendering)
//!   - services (unified service container)
//!
//! - **mcp**: MCP adapter (depends on core)
//!   - server, tools, protocol

// Core domain logic (protocol-agnostic)
pub mod core;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{GrokSearchError, Result};
pub use core::services::Services;
pub use core::types::SearchResult;
