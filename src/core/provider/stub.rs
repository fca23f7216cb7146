//! In-memory backends for unit tests

use super::{
    ConnectionProbe, ConnectionReport, ConnectionStatus, PageFetcher, SearchProvider,
    SearchRequest,
};
use crate::core::config::Config;
use crate::core::error::{GrokSearchError, Result};
use crate::core::services::Services;
use crate::core::types::SearchResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Canned response for every call
pub enum StubOutcome {
    Results(Vec<SearchResult>),
    Fail(String),
}

pub struct StubProvider {
    outcome: StubOutcome,
    pub calls: AtomicUsize,
    last_request: Mutex<Option<SearchRequest>>,
}

impl StubProvider {
    pub fn returning(count: usize) -> Self {
        let results = (1..=count)
            .map(|i| {
                SearchResult::new(
                    format!("Result title {i}"),
                    format!("https://example.com/{i}"),
                    format!("Snippet {i}"),
                )
                .unwrap()
                .with_rank(i)
            })
            .collect();
        Self {
            outcome: StubOutcome::Results(results),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: StubOutcome::Fail(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    fn max_results_limit(&self) -> usize {
        20
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        super::validate_search_args(&request.query, request.max_results, self.max_results_limit())?;
        match &self.outcome {
            StubOutcome::Results(results) => Ok(results
                .iter()
                .take(request.max_results)
                .cloned()
                .collect()),
            StubOutcome::Fail(message) => Err(GrokSearchError::SearchError(message.clone())),
        }
    }
}

#[async_trait]
impl PageFetcher for StubProvider {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        super::validate_fetch_url(url)?;
        match &self.outcome {
            StubOutcome::Results(_) => Ok(format!("---\nsource: {url}\n---\n\n# Page")),
            StubOutcome::Fail(message) => Err(GrokSearchError::FetchError(message.clone())),
        }
    }
}

#[async_trait]
impl ConnectionProbe for StubProvider {
    async fn probe(&self) -> ConnectionReport {
        ConnectionReport {
            status: ConnectionStatus::Ok,
            message: "Retrieved model list (HTTP 200), 1 models".to_string(),
            response_time_ms: 3,
            available_models: vec!["grok-4-fast".to_string()],
        }
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.grok.api_url = "https://api.x.ai/v1".to_string();
    config.grok.api_key = "xai-test-key-123456".to_string();
    config
}

/// Services whose every backend is `stub`
pub fn stub_services(stub: Arc<StubProvider>) -> Arc<Services> {
    Arc::new(Services::with_backends(
        test_config(),
        Arc::clone(&stub) as Arc<dyn SearchProvider>,
        Arc::clone(&stub) as Arc<dyn PageFetcher>,
        stub,
    ))
}
