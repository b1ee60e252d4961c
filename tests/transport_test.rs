// ABOUTME: Integration tests for the newline-delimited JSON-RPC stdio transport
// ABOUTME: Drives the transport with in-memory readers and collects written lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use analytics_mcp_server::jsonrpc::error_codes;
use analytics_mcp_server::mcp::StdioTransport;
use serde_json::Value;
use tokio::io::BufReader;
use tokio::sync::Mutex;

mod common;

use common::{FakeAnalyticsApi, TestHarness};

/// Feed `input` through a transport and return each response line as JSON
async fn exchange(input: &str) -> Vec<Value> {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);
    let transport = StdioTransport::new(Arc::clone(&harness.resources));
    let output = Arc::new(Mutex::new(Vec::<u8>::new()));

    transport
        .serve(BufReader::new(input.as_bytes()), Arc::clone(&output))
        .await
        .unwrap();

    let written = output.lock().await.clone();
    String::from_utf8(written)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn by_id(responses: &[Value], id: i64) -> &Value {
    responses
        .iter()
        .find(|response| response["id"] == id)
        .unwrap_or_else(|| panic!("no response with id {id}"))
}

#[tokio::test]
async fn test_each_request_gets_one_response_line() {
    common::init_test_logging();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );

    let responses = exchange(input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(by_id(&responses, 1)["result"], serde_json::json!({}));
    assert_eq!(
        by_id(&responses, 2)["result"]["tools"]
            .as_array()
            .unwrap()
            .len(),
        11
    );
}

#[tokio::test]
async fn test_invalid_json_is_parse_error_with_null_id() {
    let responses = exchange("{not json\n").await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], error_codes::PARSE_ERROR);
    assert!(responses[0]["id"].is_null());
}

#[tokio::test]
async fn test_non_request_object_echoes_id() {
    let responses = exchange("{\"jsonrpc\":\"2.0\",\"id\":7}\n").await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 7);
    assert_eq!(responses[0]["error"]["code"], error_codes::INVALID_REQUEST);
}

#[tokio::test]
async fn test_bad_line_does_not_stop_the_stream() {
    let input = concat!(
        "garbage\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#,
        "\n",
    );

    let responses = exchange(input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(
        by_id(&responses, 3)["result"]["resources"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
}
