//! Get config info tool handler
//!
//! Shows the effective configuration of the running server (API key
//! masked) and tests connectivity to the backend.

use super::handler::{text_content, McpToolHandler};
use crate::core::config::Config;
use crate::core::provider::ConnectionReport;
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

pub struct GetConfigInfoHandler {
    services: Arc<Services>,
}

#[derive(Serialize)]
struct ConfigInfo {
    provider: String,
    api_url: String,
    api_key: String,
    model: String,
    timeout_sec: u64,
    debug_enabled: bool,
    log_level: String,
    log_dir: PathBuf,
    default_max_results: usize,
    max_results_limit: usize,
    connection_test: ConnectionReport,
    checked_at: String,
}

impl GetConfigInfoHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn build_info(&self, config: &Config, connection_test: ConnectionReport) -> ConfigInfo {
        ConfigInfo {
            provider: self.services.search.provider_name().to_string(),
            api_url: config.grok.api_url.clone(),
            api_key: config.masked_api_key(),
            model: config.grok.model.clone(),
            timeout_sec: config.grok.timeout_sec,
            debug_enabled: config.debug.enabled,
            log_level: config.logging.level.to_string(),
            log_dir: config.logging.dir.clone(),
            default_max_results: config.search.default_max_results,
            max_results_limit: config.search.max_results_limit,
            connection_test,
            checked_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[async_trait]
impl McpToolHandler for GetConfigInfoHandler {
    fn name(&self) -> &str {
        "get_config_info"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_config_info".to_string(),
            description: "Show the current grok-search configuration and test the connection \
                         to the search backend by listing its models. \
                         Use this to verify the API URL, key and model before searching, \
                         or to debug failing searches. The API key is masked."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        let report = self.services.probe.probe().await;
        let info = self.build_info(&self.services.config, report);
        let text = serde_json::to_string_pretty(&info)?;
        Ok(text_content(text))
    }
}
