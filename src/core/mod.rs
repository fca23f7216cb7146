//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the MCP transport.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Search result record
//! - **xdg**: XDG config directory handling
//! - **logging**: stderr + rolling file subscriber
//! - **prompts**: System prompts for the completion backend
//! - **provider**: Search provider trait and the Grok backend
//! - **format**: Markdown rendering of results
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod prompts;
pub mod provider;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{GrokSearchError, Result};
pub use services::Services;
