//! Error types and error handling for the grok-search service.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (MCP error codes
//! and tool error payloads) is handled in the `mcp` adapter.

use thiserror::Error;

/// Result type alias for grok-search operations
pub type Result<T> = std::result::Result<T, GrokSearchError>;

/// Main error type for the grok-search service
#[derive(Error, Debug)]
pub enum GrokSearchError {
    /// Missing or invalid configuration. Fatal at startup.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Bad tool input, rejected before any network call
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// Network, HTTP status or response parsing failure during a search
    #[error("Search failed: {0}")]
    SearchError(String),

    /// Network, HTTP status or empty content failure during a page fetch
    #[error("Fetch failed: {0}")]
    FetchError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GrokSearchError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error was caused by caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, GrokSearchError::ValidationError(_))
    }

    /// Check if this error comes from loading or validating configuration
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            GrokSearchError::ConfigError(_) | GrokSearchError::TomlError(_)
        )
    }

    /// Check if this error comes from the remote backend
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GrokSearchError::SearchError(_) | GrokSearchError::FetchError(_)
        )
    }
}
