//! Unified service container for grok-search
//!
//! Provides shared access to configuration and the active provider.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::provider::{ConnectionProbe, GrokProvider, PageFetcher, SearchProvider};
use std::sync::Arc;

/// Unified services container
///
/// Built once at startup and shared by every tool handler.
#[derive(Clone)]
pub struct Services {
    /// Active search backend
    pub search: Arc<dyn SearchProvider>,

    /// Page content backend
    pub fetcher: Arc<dyn PageFetcher>,

    /// Backend connectivity check
    pub probe: Arc<dyn ConnectionProbe>,

    /// Application configuration (read-only)
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let grok = Arc::new(GrokProvider::from_config(&config)?);

        Ok(Self {
            search: Arc::clone(&grok) as Arc<dyn SearchProvider>,
            fetcher: Arc::clone(&grok) as Arc<dyn PageFetcher>,
            probe: grok,
            config: Arc::new(config),
        })
    }

    /// Create services around explicit backends
    pub fn with_backends(
        config: Config,
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        probe: Arc<dyn ConnectionProbe>,
    ) -> Self {
        Self {
            search,
            fetcher,
            probe,
            config: Arc::new(config),
        }
    }
}
