//! MCP server implementation
//!
//! Reads one JSON-RPC message per line. Cheap methods are answered
//! inline; every `tools/call` runs in its own task so a slow search
//! never blocks `ping` or a second call. All responses go through a
//! single writer task, which keeps each output line whole.

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::*;
use crate::mcp::transport::LineTransport;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

type InFlight = Arc<Mutex<HashMap<String, AbortHandle>>>;

pub struct McpServer {
    handlers: Arc<ProtocolHandlers>,
    in_flight: InFlight,
}

impl McpServer {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            handlers: Arc::new(ProtocolHandlers::new(services)),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn handlers(&self) -> &ProtocolHandlers {
        &self.handlers
    }

    /// Run on stdin/stdout until EOF or Ctrl+C
    pub async fn run(&self) -> Result<(), McpError> {
        info!("Starting grok-search MCP server");

        let result = tokio::select! {
            result = self.serve(tokio::io::stdin(), tokio::io::stdout()) => result,
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                self.abort_all();
                Ok(())
            }
        };

        info!("MCP server shutting down");
        result
    }

    /// Serve one session over the given streams
    ///
    /// Returns after `input` hits EOF and every call still in flight
    /// has written its response.
    pub async fn serve<R, W>(&self, input: R, output: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer = tokio::spawn(async move {
            let mut transport = LineTransport::new(output);
            while let Some(response) = rx.recv().await {
                if let Err(e) = transport.send_response(response).await {
                    error!("Failed to write response: {}", e);
                    return Err(e);
                }
            }
            Ok(())
        });

        let mut lines = BufReader::new(input).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            self.dispatch(&line, &tx).await;
        }

        debug!("Input closed, waiting for in-flight calls");
        drop(tx);

        writer
            .await
            .map_err(|e| McpError::InternalError(format!("Writer task failed: {e}")))?
    }

    async fn dispatch(&self, line: &str, tx: &UnboundedSender<JsonRpcResponse>) {
        debug!("Received: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                send(tx, JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}")));
                return;
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            if !request.is_notification() {
                send(
                    tx,
                    JsonRpcResponse::error(
                        request.id,
                        INVALID_REQUEST,
                        format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                    ),
                );
            }
            return;
        }

        if request.is_notification() {
            self.handle_notification(request).await;
            return;
        }

        if request.method == "tools/call" {
            self.spawn_tool_call(request, tx.clone());
            return;
        }

        let id = request.id.clone();
        let result = match request.method.as_str() {
            "initialize" => self.handlers.handle_initialize(request).await,
            "tools/list" => self.handlers.handle_tools_list(request).await,
            "ping" => self.handlers.handle_ping(request).await,
            _ => Ok(JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", request.method),
            )),
        };

        let response = result.unwrap_or_else(|e| {
            error!("Error processing {}: {}", line, e);
            JsonRpcResponse::error(id, e.code(), e.to_string())
        });
        send(tx, response);
    }

    async fn handle_notification(&self, request: JsonRpcRequest) {
        let method = request.method.clone();
        match method.as_str() {
            "notifications/initialized" | "initialized" => {
                if let Err(e) = self.handlers.handle_initialized(request).await {
                    warn!("initialized notification failed: {}", e);
                }
            }
            "notifications/cancelled" => {
                let params = request
                    .params
                    .and_then(|p| serde_json::from_value::<CancelledParams>(p).ok());
                match params {
                    Some(params) => self.cancel(&params),
                    None => warn!("notifications/cancelled without a requestId"),
                }
            }
            other => debug!("Ignoring notification: {}", other),
        }
    }

    fn spawn_tool_call(&self, request: JsonRpcRequest, tx: UnboundedSender<JsonRpcResponse>) {
        let id = request.id.clone();
        let key = request_key(&id);
        let handlers = Arc::clone(&self.handlers);
        let in_flight = Arc::clone(&self.in_flight);
        let task_key = key.clone();

        // Held across spawn + insert so a fast task cannot remove its
        // entry before it exists.
        let mut tasks = lock(&self.in_flight);
        let handle = tokio::spawn(async move {
            let response = handlers
                .handle_tools_call(request)
                .await
                .unwrap_or_else(|e| JsonRpcResponse::error(id, e.code(), e.to_string()));
            lock(&in_flight).remove(&task_key);
            send(&tx, response);
        });

        if tasks.insert(key.clone(), handle.abort_handle()).is_some() {
            warn!("Request id {} reused while still in flight", key);
        }
    }

    fn cancel(&self, params: &CancelledParams) {
        let key = request_key(&Some(params.request_id.clone()));
        match lock(&self.in_flight).remove(&key) {
            Some(handle) => {
                handle.abort();
                info!(
                    request_id = %key,
                    reason = params.reason.as_deref().unwrap_or("none"),
                    "Cancelled tool call"
                );
            }
            None => debug!("Cancel for unknown or finished request {}", key),
        }
    }

    fn abort_all(&self) {
        let mut tasks = lock(&self.in_flight);
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }

    /// Number of tool calls currently running
    pub fn in_flight_count(&self) -> usize {
        lock(&self.in_flight).len()
    }
}

fn request_key(id: &Option<serde_json::Value>) -> String {
    match id {
        Some(value) => value.to_string(),
        None => "null".to_string(),
    }
}

fn lock(in_flight: &InFlight) -> MutexGuard<'_, HashMap<String, AbortHandle>> {
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn send(tx: &UnboundedSender<JsonRpcResponse>, response: JsonRpcResponse) {
    if tx.send(response).is_err() {
        warn!("Response dropped, writer closed");
    }
}
