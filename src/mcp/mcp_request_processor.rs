// ABOUTME: MCP request processing: validates JSON-RPC envelopes and routes methods
// ABOUTME: Dispatches tools/call to the tool registry and resources/read to the resource registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::resources::ServerResources;
use super::schema::InitializeResponse;
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::tools::{ToolExecutionContext, ToolResult};

/// Longest params preview written to the debug log
const PARAMS_PREVIEW_LEN: usize = 100;

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle an MCP request; notifications yield no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        Self::log_request(&request);

        if request.is_notification() {
            Self::handle_notification(&request);
            Self::log_completion("notification", start_time);
            return None;
        }

        let id = request.id.clone();
        let response = match self.process_request(request).await {
            Ok(response) => response,
            Err(e) => Self::create_error_response(id, &e),
        };

        Self::log_completion("request", start_time);
        Some(response)
    }

    fn create_error_response(id: Option<Value>, e: &AppError) -> JsonRpcResponse {
        error!(error = %e, mcp_id = ?id, "Failed to process MCP request");
        JsonRpcResponse::error(id, e.code.jsonrpc_code(), e.message.clone())
    }

    async fn process_request(&self, request: JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        if let Some(invalid) = Self::validate_request(&request) {
            return Ok(invalid);
        }

        let id = request.id.clone();
        match request.method.as_str() {
            "initialize" => Self::handle_initialize(id),
            "ping" => Ok(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Ok(self.handle_tools_list(id)),
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => Ok(self.handle_resources_list(id)),
            "resources/templates/list" => Ok(self.handle_resource_templates_list(id)),
            "resources/read" => self.handle_resources_read(request).await,
            "prompts/list" => Ok(JsonRpcResponse::success(id, json!({ "prompts": [] }))),
            _ => Ok(Self::handle_unknown_method(&request)),
        }
    }

    /// Reject envelopes that are not JSON-RPC 2.0
    fn validate_request(request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            warn!(version = %request.jsonrpc, "Invalid JSON-RPC version");
            return Some(JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                    request.jsonrpc
                ),
            ));
        }
        if request.method.is_empty() {
            return Some(JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INVALID_REQUEST,
                "Missing method",
            ));
        }
        None
    }

    fn handle_initialize(id: Option<Value>) -> AppResult<JsonRpcResponse> {
        debug!("Handling initialize request");
        let result = serde_json::to_value(InitializeResponse::for_server())?;
        Ok(JsonRpcResponse::success(id, result))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools = self.resources.tool_registry.all_schemas();
        debug!(count = tools.len(), "Handling tools/list request");
        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Execute a tool. Tool failures are results with `isError`, not protocol errors.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        let Some(params) = request.params else {
            return Ok(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_PARAMS,
                "Missing parameters for tools/call",
            ));
        };
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tools/call parameters: {e}"),
                ));
            }
        };

        info!(tool = %params.name, "Executing tool");
        let context =
            ToolExecutionContext::new(Arc::clone(&self.resources)).with_request_id(request.id.clone());
        let result = match self
            .resources
            .tool_registry
            .execute(&params.name, params.arguments, &context)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool dispatch failed");
                ToolResult::error(e.message)
            }
        };

        let response = serde_json::to_value(result.into_response())?;
        Ok(JsonRpcResponse::success(request.id, response))
    }

    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let resources = self.resources.resource_registry.list_resources();
        debug!(count = resources.len(), "Handling resources/list request");
        JsonRpcResponse::success(id, json!({ "resources": resources }))
    }

    fn handle_resource_templates_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let templates = self.resources.resource_registry.list_templates();
        debug!(count = templates.len(), "Handling resources/templates/list request");
        JsonRpcResponse::success(id, json!({ "resourceTemplates": templates }))
    }

    async fn handle_resources_read(&self, request: JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        let params = request.params.unwrap_or_else(|| Value::Object(Map::new()));
        let params: ReadResourceParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid resources/read parameters: {e}"),
                ));
            }
        };

        let result = self
            .resources
            .resource_registry
            .read(&params.uri, &self.resources)
            .await?;
        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        warn!(method = %request.method, "Unknown MCP method");
        JsonRpcResponse::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Unknown method: {}", request.method),
        )
    }

    fn handle_notification(request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client initialized"),
            "notifications/cancelled" => debug!("Request cancelled notification received"),
            method => debug!(method, "Ignoring notification"),
        }
    }

    fn log_request(request: &JsonRpcRequest) {
        let preview = request.params.as_ref().map(|params| {
            let text = params.to_string();
            match text.char_indices().nth(PARAMS_PREVIEW_LEN) {
                Some((cut, _)) => format!("{}...[truncated]", &text[..cut]),
                None => text,
            }
        });
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            mcp_params_preview = ?preview,
            "Received MCP request"
        );
    }

    fn log_completion(request_type: &str, start_time: Instant) {
        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(0),
            "Completed MCP {request_type} processing"
        );
    }
}

/// Write one response as a single line and flush
///
/// # Errors
///
/// Returns an error if JSON serialization or the write fails
pub async fn write_response<W>(response: &JsonRpcResponse, output: &Mutex<W>) -> AppResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    let response_json = serde_json::to_string(response)?;
    debug!(bytes = response_json.len(), "Sending MCP response");

    let mut output = output.lock().await;
    output.write_all(response_json.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    drop(output);
    Ok(())
}
