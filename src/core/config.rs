//! Configuration management for the grok-search service.
//!
//! This module handles loading configuration from a TOML file and
//! environment variables. The provider URL and key have no defaults;
//! everything else does. Configuration is read once at startup and
//! shared read-only for the rest of the process lifetime.

use crate::core::error::{GrokSearchError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub grok: GrokConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Debug configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DebugConfig {
    /// Verbose logging of requests and progress
    #[serde(default)]
    pub enabled: bool,
}

/// Remote provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrokConfig {
    /// Base URL of the OpenAI-compatible API (e.g. https://api.x.ai/v1)
    #[serde(default)]
    pub api_url: String,

    /// Bearer credential for the API
    #[serde(default)]
    pub api_key: String,

    /// Model used for search and fetch completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Results returned when the caller does not ask for a count
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Upper bound accepted for max_results
    #[serde(default = "default_max_results_limit")]
    pub max_results_limit: usize,
}

/// Log level as written in the configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[serde(alias = "debug")]
    Debug,
    #[default]
    #[serde(alias = "info")]
    Info,
    #[serde(alias = "warning", alias = "WARN", alias = "warn")]
    Warning,
    #[serde(alias = "error")]
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = GrokSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(GrokSearchError::ConfigError(format!(
                "Unknown log level '{other}' (expected DEBUG, INFO, WARNING or ERROR)"
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

// Default value functions
fn default_model() -> String {
    "grok-4-fast".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_max_results() -> usize {
    5
}

fn default_max_results_limit() -> usize {
    20
}

impl Default for GrokConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            model: default_model(),
            timeout_sec: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            dir: default_log_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: default_max_results(),
            max_results_limit: default_max_results_limit(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GrokSearchError::ConfigError(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML file
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load config, preferring an explicit file path when one is given
    ///
    /// File resolution order:
    /// 1. `explicit` (the `--config` flag)
    /// 2. GROK_SEARCH_CONFIG env var
    /// 3. XDG config file (~/.config/grok-search/config.toml)
    /// 4. ./config.toml
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit, &XdgDirs::new())?;
        let mut config = Self::from_file(&path)?;

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to read
    pub fn resolve_path(explicit: Option<&Path>, xdg: &XdgDirs) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Self::require_exists(path.to_path_buf());
        }

        if let Ok(path) = env::var("GROK_SEARCH_CONFIG") {
            return Self::require_exists(PathBuf::from(path));
        }

        let xdg_config = xdg.config_file();
        if xdg_config.exists() {
            return Ok(xdg_config);
        }

        let local = PathBuf::from("config.toml");
        if local.exists() {
            return Ok(local);
        }

        Err(GrokSearchError::ConfigError(format!(
            "Configuration file not found: looked in {} and ./config.toml",
            xdg_config.display()
        )))
    }

    fn require_exists(path: PathBuf) -> Result<PathBuf> {
        if path.exists() {
            Ok(path)
        } else {
            Err(GrokSearchError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )))
        }
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(url) = env::var("GROK_API_URL") {
            self.grok.api_url = url;
        }
        if let Ok(key) = env::var("GROK_API_KEY") {
            self.grok.api_key = key;
        }
        if let Ok(model) = env::var("GROK_SEARCH_MCP_MODEL") {
            if !model.trim().is_empty() {
                self.grok.model = model;
            }
        }
        if let Ok(timeout) = env::var("GROK_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.grok.timeout_sec = t;
            }
        }

        if let Ok(debug) = env::var("GROK_DEBUG") {
            match debug.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.debug.enabled = true,
                "0" | "false" | "no" | "off" => self.debug.enabled = false,
                _ => {}
            }
        }

        if let Ok(level) = env::var("GROK_LOG_LEVEL") {
            if let Ok(l) = level.parse() {
                self.logging.level = l;
            }
        }
        if let Ok(dir) = env::var("GROK_LOG_DIR") {
            self.logging.dir = PathBuf::from(dir);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let api_url = self.grok.api_url.trim();
        if api_url.is_empty() {
            return Err(GrokSearchError::ConfigError(
                "grok.api_url not configured".to_string(),
            ));
        }

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(GrokSearchError::ConfigError(format!(
                "grok.api_url must be an http(s) URL, got '{api_url}'"
            )));
        }

        if self.grok.api_key.trim().is_empty() {
            return Err(GrokSearchError::ConfigError(
                "grok.api_key not configured".to_string(),
            ));
        }

        if self.grok.model.trim().is_empty() {
            return Err(GrokSearchError::ConfigError(
                "grok.model cannot be empty".to_string(),
            ));
        }

        if self.grok.timeout_sec == 0 {
            return Err(GrokSearchError::ConfigError(
                "grok.timeout_sec must be non-zero".to_string(),
            ));
        }

        if self.search.default_max_results == 0 {
            return Err(GrokSearchError::ConfigError(
                "search.default_max_results must be non-zero".to_string(),
            ));
        }

        if self.search.default_max_results > self.search.max_results_limit {
            return Err(GrokSearchError::ConfigError(
                "search.default_max_results cannot exceed search.max_results_limit".to_string(),
            ));
        }

        Ok(())
    }

    /// API key with everything but the edges hidden
    pub fn masked_api_key(&self) -> String {
        let key = &self.grok.api_key;
        let chars: Vec<char> = key.chars().collect();
        if chars.len() < 10 {
            return "****".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}****{tail}")
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API URL: {}", self.grok.api_url);
        tracing::info!("  API key: {}", self.masked_api_key());
        tracing::info!("  Model: {}", self.grok.model);
        tracing::info!("  Request timeout: {}s", self.grok.timeout_sec);
        tracing::info!("  Debug: {}", self.debug.enabled);
        tracing::info!("  Log level: {}", self.logging.level);
        tracing::info!("  Log dir: {:?}", self.logging.dir);
        tracing::info!(
            "  Max results: default {}, limit {}",
            self.search.default_max_results,
            self.search.max_results_limit
        );
    }
}
