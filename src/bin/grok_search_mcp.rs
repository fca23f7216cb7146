//! grok-search MCP (Model Context Protocol) Server
//!
//! A stdio-based MCP server that exposes web search and page fetch
//! as tools for MCP clients.
//!
//! # Examples
//!
//! ```bash
//! # Serve MCP over stdio using the XDG config file
//! grok-search-mcp
//!
//! # Use an explicit config file
//! grok-search-mcp --config ./config.toml
//!
//! # Validate configuration and exit
//! grok-search-mcp --check
//! ```

use clap::Parser;
use grok_search::core::config::Config;
use grok_search::core::logging::init_logging;
use grok_search::core::services::Services;
use grok_search::mcp::McpServer;
use std::path::PathBuf;
use std::sync::Arc;

/// MCP server answering web_search and web_fetch through a chat completion API
#[derive(Parser, Debug)]
#[command(name = "grok-search-mcp")]
#[command(version)]
#[command(about = "Web search MCP server", long_about = None)]
struct Args {
    /// Path to config.toml
    #[arg(long, env = "GROK_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Load and validate configuration, print a summary, then exit
    #[arg(long)]
    check: bool,
}

fn print_summary(config: &Config) {
    println!("Configuration OK");
    println!("  api_url:     {}", config.grok.api_url);
    println!("  api_key:     {}", config.masked_api_key());
    println!("  model:       {}", config.grok.model);
    println!("  timeout_sec: {}", config.grok.timeout_sec);
    println!("  debug:       {}", config.debug.enabled);
    println!("  log_level:   {}", config.logging.level);
    println!("  log_dir:     {}", config.logging.dir.display());
    println!(
        "  max_results: {} (limit {})",
        config.search.default_max_results, config.search.max_results_limit
    );
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load configuration
    let config = Config::load_from(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });

    if args.check {
        print_summary(&config);
        return;
    }

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(&config).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    });
    config.log_config();

    // Create services
    let services = Services::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create services: {e}");
        std::process::exit(1);
    });

    // Create and run MCP server
    let server = McpServer::new(Arc::new(services));

    if let Err(e) = server.run().await {
        tracing::error!("MCP server error: {}", e);
        eprintln!("MCP server error: {e}");
        std::process::exit(1);
    }
}
