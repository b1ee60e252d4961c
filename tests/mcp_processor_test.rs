// ABOUTME: Integration tests for MCP method routing in the request processor
// ABOUTME: Covers initialize, listings, tool and resource calls, and JSON-RPC error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use analytics_mcp_server::constants::protocol;
use analytics_mcp_server::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};
use analytics_mcp_server::mcp::McpRequestProcessor;
use serde_json::{json, Value};

mod common;

use common::{sample_report, FakeAnalyticsApi, TestHarness};

fn processor(harness: &TestHarness) -> McpRequestProcessor {
    McpRequestProcessor::new(Arc::clone(&harness.resources))
}

async fn call(harness: &TestHarness, method: &str, params: Option<Value>) -> JsonRpcResponse {
    processor(harness)
        .handle_request(JsonRpcRequest::new(method, params))
        .await
        .expect("requests with an id get a response")
}

#[tokio::test]
async fn test_initialize_advertises_server() {
    common::init_test_logging();
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(
        &harness,
        "initialize",
        Some(json!({"protocolVersion": "2025-06-18", "clientInfo": {"name": "test", "version": "1"}})),
    )
    .await;

    assert!(response.is_success());
    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], protocol::MCP_PROTOCOL_VERSION);
    assert_eq!(result["serverInfo"]["name"], protocol::SERVER_NAME);
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn test_tools_list_returns_every_tool_with_schema() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(&harness, "tools/list", None).await;

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 11);
    let run_report = tools
        .iter()
        .find(|tool| tool["name"] == "run_report")
        .unwrap();
    assert_eq!(run_report["inputSchema"]["type"], "object");
    assert!(run_report["inputSchema"]["required"]
        .as_array()
        .unwrap()
        .contains(&json!("metrics")));
}

#[tokio::test]
async fn test_tools_list_marks_audience_writes() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(&harness, "tools/list", None).await;

    let result = response.result.unwrap();
    let annotations = |name: &str| {
        result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .find(|tool| tool["name"] == name)
            .map(|tool| tool["annotations"].clone())
            .unwrap()
    };
    assert_eq!(annotations("run_report")["readOnlyHint"], true);
    assert_eq!(annotations("run_report")["destructiveHint"], false);
    assert_eq!(annotations("delete_audience")["readOnlyHint"], false);
    assert_eq!(annotations("delete_audience")["destructiveHint"], true);
    assert!(annotations("delete_audience").get("idempotentHint").is_none());
    assert_eq!(annotations("list_audiences")["openWorldHint"], true);
}

#[tokio::test]
async fn test_tools_call_returns_text_content() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_report(sample_report()),
        Some("123"),
    );

    let response = call(
        &harness,
        "tools/call",
        Some(json!({
            "name": "run_report",
            "arguments": {
                "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
                "metrics": [{"name": "activeUsers"}]
            }
        })),
    )
    .await;

    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Total rows: 2"));
}

#[tokio::test]
async fn test_unknown_tool_is_an_error_result() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(
        &harness,
        "tools/call",
        Some(json!({"name": "run_everything", "arguments": {}})),
    )
    .await;

    assert!(response.is_success());
    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["text"], "Unknown tool: run_everything");
}

#[tokio::test]
async fn test_tools_call_without_params_is_invalid_params() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(&harness, "tools/call", None).await;

    assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn test_resource_listings_split_fixed_and_templated() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let listed = call(&harness, "resources/list", None).await.result.unwrap();
    let uris: Vec<&str> = listed["resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|resource| resource["uri"].as_str().unwrap())
        .collect();
    assert_eq!(uris, ["ga://metadata", "ga://dimensions", "ga://metrics"]);

    let templates = call(&harness, "resources/templates/list", None)
        .await
        .result
        .unwrap();
    let templates = templates["resourceTemplates"].as_array().unwrap();
    assert_eq!(templates.len(), 6);
    assert!(templates
        .iter()
        .any(|template| template["uriTemplate"] == "ga://audiences/{propertyId}/{audienceId}"));
}

#[tokio::test]
async fn test_resources_read_returns_text_contents() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(
        &harness,
        "resources/read",
        Some(json!({"uri": "ga://audiences/42"})),
    )
    .await;

    let result = response.result.unwrap();
    assert_eq!(result["contents"][0]["uri"], "ga://audiences/42");
    assert_eq!(result["contents"][0]["mimeType"], "text/plain");
    assert_eq!(
        result["contents"][0]["text"],
        "No audiences found for property: properties/42"
    );
}

#[tokio::test]
async fn test_unknown_resource_is_resource_not_found() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(
        &harness,
        "resources/read",
        Some(json!({"uri": "ga://segments/1"})),
    )
    .await;

    let error = response.error.unwrap();
    assert_eq!(error.code, error_codes::RESOURCE_NOT_FOUND);
    assert!(error.message.contains("ga://segments/1"));
}

#[tokio::test]
async fn test_unknown_method_and_bad_version() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = call(&harness, "sampling/createMessage", None).await;
    let error = response.error.unwrap();
    assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
    assert_eq!(error.message, "Unknown method: sampling/createMessage");

    let mut request = JsonRpcRequest::new("ping", None);
    request.jsonrpc = "1.0".to_owned();
    let response = processor(&harness).handle_request(request).await.unwrap();
    assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
}

#[tokio::test]
async fn test_ping_and_prompts() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    assert_eq!(call(&harness, "ping", None).await.result, Some(json!({})));
    assert_eq!(
        call(&harness, "prompts/list", None).await.result,
        Some(json!({"prompts": []}))
    );
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let response = processor(&harness)
        .handle_request(JsonRpcRequest::notification(
            "notifications/initialized",
            None,
        ))
        .await;

    assert!(response.is_none());
}
