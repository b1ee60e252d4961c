// ABOUTME: Stdio transport reading newline-delimited JSON-RPC from stdin
// ABOUTME: Each request runs on its own task; responses share a locked stdout writer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use super::mcp_request_processor::{write_response, McpRequestProcessor};
use super::resources::ServerResources;
use crate::errors::AppResult;
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};

/// MCP over stdin/stdout
pub struct StdioTransport {
    processor: Arc<McpRequestProcessor>,
}

impl StdioTransport {
    /// Create a transport over shared server resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            processor: Arc::new(McpRequestProcessor::new(resources)),
        }
    }

    /// Serve stdin until it closes
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = Arc::new(Mutex::new(tokio::io::stdout()));
        self.serve(stdin, stdout).await
    }

    /// Serve any line-oriented reader, writing responses to `output`.
    ///
    /// Responses may be written out of request order. Pending requests are
    /// drained before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input fails
    pub async fn serve<R, W>(&self, input: R, output: Arc<Mutex<W>>) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = input.lines();
        let mut in_flight = JoinSet::new();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request = match Self::parse_line(&line) {
                Ok(request) => request,
                Err(response) => {
                    if let Err(e) = write_response(&response, &output).await {
                        error!(error = %e, "Failed to write parse error response");
                    }
                    continue;
                }
            };

            let processor = Arc::clone(&self.processor);
            let output = Arc::clone(&output);
            in_flight.spawn(async move {
                if let Some(response) = processor.handle_request(request).await {
                    if let Err(e) = write_response(&response, &output).await {
                        error!(error = %e, "Failed to write MCP response");
                    }
                }
            });

            while let Some(finished) = in_flight.try_join_next() {
                if let Err(e) = finished {
                    error!(error = %e, "MCP request task failed");
                }
            }
        }

        while let Some(finished) = in_flight.join_next().await {
            if let Err(e) = finished {
                error!(error = %e, "MCP request task failed");
            }
        }
        info!("stdin closed, shutting down transport");
        Ok(())
    }

    /// Decode one line; malformed input becomes a ready-made error response
    fn parse_line(line: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
        let value: Value = serde_json::from_str(line).map_err(|e| {
            warn!(error = %e, "Invalid JSON-RPC message");
            JsonRpcResponse::error(None, error_codes::PARSE_ERROR, format!("Parse error: {e}"))
        })?;
        let id = value.get("id").cloned();
        serde_json::from_value(value).map_err(|e| {
            warn!(error = %e, "Malformed JSON-RPC request");
            JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )
        })
    }
}
