//! JSON-RPC server that reads one request per line and writes one response
//! per line. Runs over stdio in production and over any async reader/writer
//! pair in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, warn};

use crate::config::ContactGraphConfig;
use crate::errors::Result;
use crate::graph::{GraphStore, PathSearchEngine, SearchReporter};

use super::tools::{get_tool_definitions, handle_tool_call};
use super::transport::{ErrorCode, JsonRpcRequest, JsonRpcResponse};

/// Request counters for the `ping` reply.
struct ServerStats {
    started_at: Instant,
    total_requests: AtomicU64,
    errors: AtomicU64,
}

/// Serves contact queries against a loaded graph.
pub struct McpServer {
    graph: GraphStore,
    config: ContactGraphConfig,
    reporter: Arc<dyn SearchReporter>,
    stats: ServerStats,
}

impl McpServer {
    pub fn new(
        graph: GraphStore,
        config: ContactGraphConfig,
        reporter: Arc<dyn SearchReporter>,
    ) -> Self {
        Self {
            graph,
            config,
            reporter,
            stats: ServerStats {
                started_at: Instant::now(),
                total_requests: AtomicU64::new(0),
                errors: AtomicU64::new(0),
            },
        }
    }

    /// Serves stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serves requests from `reader`, writing responses to `writer`, until
    /// the reader is exhausted.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(&request),
                Err(e) => {
                    warn!(error = %e, "unparseable request");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        ErrorCode::ParseError,
                        format!("failed to parse JSON-RPC request: {}", e),
                    ))
                }
            };

            if let Some(resp) = response {
                let mut output = serde_json::to_string(&resp)?;
                output.push('\n');
                if let Err(e) = writer.write_all(output.as_bytes()).await {
                    error!(error = %e, "failed to write response");
                    break;
                }
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Dispatches one request. Returns `None` for notifications.
    pub fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);
        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }
        let id = request.id.clone();
        debug!(method = %request.method, "request");

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": self.config.log.name,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "initialized" | "notifications/initialized" => return None,
            "ping" => JsonRpcResponse::success(id, self.stats_json()),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": get_tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params.as_ref()),
            _ => JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("method not found: {}", request.method),
            ),
        };

        if response.is_error() {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
        }
        Some(response)
    }

    fn handle_tools_call(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing params for tools/call".to_string(),
            );
        };
        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing 'name' in tools/call params".to_string(),
            );
        };
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let engine =
            PathSearchEngine::with_config(&self.graph, self.config.search, self.reporter.clone());

        match handle_tool_call(&engine, &self.config.server, tool_name, &arguments) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(
                id,
                ErrorCode::InternalError,
                format!("tool execution failed: {}", e),
            ),
        }
    }

    fn stats_json(&self) -> Value {
        json!({
            "uptime_secs": self.stats.started_at.elapsed().as_secs(),
            "total_requests": self.stats.total_requests.load(Ordering::Relaxed),
            "errors": self.stats.errors.load(Ordering::Relaxed),
        })
    }
}
