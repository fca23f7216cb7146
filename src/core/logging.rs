//! Log setup for the MCP server
//!
//! stdout carries the JSON-RPC stream, so log output goes to stderr and
//! to a daily file under `logging.dir`. The file gets one JSON object per
//! event.

use crate::core::config::Config;
use crate::core::error::Result;
use std::fs;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file prefix; the appender adds the date suffix
pub const LOG_FILE_PREFIX: &str = "grok-search.log";

/// Filter directive for the configured level
///
/// `debug.enabled` forces debug output regardless of `logging.level`.
pub fn filter_directive(config: &Config) -> String {
    let level = if config.debug.enabled {
        "debug"
    } else {
        config.logging.level.as_filter()
    };
    format!("grok_search={level},warn")
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop and must be held
/// for the life of the process. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_logging(config: &Config) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.logging.dir)?;

    let appender = tracing_appender::rolling::daily(&config.logging.dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .compact(),
        )
        .with(file_layer(file_writer))
        .init();

    Ok(guard)
}

/// One JSON object per event
fn file_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer().json().with_writer(writer)
}
