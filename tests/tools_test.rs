// ABOUTME: Integration tests for tool execution against an in-memory upstream
// ABOUTME: Covers validation before network, request forwarding and error rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use analytics_mcp_server::constants::tools;
use analytics_mcp_server::models::{PivotValueRegion, Row, RunPivotReportResponse};
use serde_json::json;

mod common;

use common::{
    audience, sample_metadata, sample_report, upstream_audience_json, FakeAnalyticsApi,
    TestHarness,
};

#[tokio::test]
async fn test_missing_property_fails_before_any_client_request() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);
    let registry = &harness.resources.tool_registry;

    let result = registry
        .execute(
            tools::RUN_REPORT,
            json!({
                "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
                "metrics": [{"name": "activeUsers"}]
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.is_error);
    assert_eq!(
        result.text,
        "Error: No property ID provided and no default property ID set"
    );
    assert_eq!(harness.credentials.requests(), 0);
    assert!(harness.api.calls().is_empty());
}

#[tokio::test]
async fn test_missing_metrics_is_a_validation_error() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), Some("123"));

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_REPORT,
            json!({"dateRanges": [{"startDate": "2024-01-01", "endDate": "2024-01-31"}]}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.is_error);
    assert_eq!(result.text, "Error: At least one metric must be specified");
    assert_eq!(harness.credentials.requests(), 0);
}

#[tokio::test]
async fn test_run_report_forwards_filters_unchanged() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_report(sample_report()),
        Some("123"),
    );
    let dimension_filter = json!({
        "orGroup": {
            "expressions": [
                {"filter": {"fieldName": "country", "stringFilter": {"matchType": "EXACT", "value": "Germany"}}},
                {"notExpression": {"filter": {"fieldName": "city", "inListFilter": {"values": ["Berlin", "Munich"]}}}}
            ]
        }
    });

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_REPORT,
            json!({
                "propertyId": "properties/456",
                "dateRanges": [{"startDate": "2024-01-01", "endDate": "2024-01-31"}],
                "dimensions": [{"name": "country"}],
                "metrics": [{"name": "activeUsers"}],
                "dimensionFilter": dimension_filter,
                "limit": 50
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(!result.is_error, "{}", result.text);
    assert!(result.text.starts_with("Total rows: 2\n\n"));
    assert!(result.text.contains("United States"));

    let call = harness.api.last_call();
    assert_eq!(call.method, "run_report");
    assert_eq!(call.target, "properties/456");
    assert_eq!(call.body["dimensionFilter"], dimension_filter);
    assert_eq!(call.body["limit"], 50);
    assert!(call.body.get("metricFilter").is_none());
}

#[tokio::test]
async fn test_run_report_forwards_unmodelled_leaf_filters() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_report(sample_report()),
        Some("123"),
    );
    let dimension_filter = json!({"filter": {"fieldName": "x", "emptyFilter": {}}});
    let metric_filter = json!({
        "notExpression": {"filter": {"fieldName": "sessions", "numericFilter": {"operation": "OPERATION_UNSPECIFIED", "value": {"int64Value": "0"}}}}
    });

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_REPORT,
            json!({
                "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
                "metrics": [{"name": "sessions"}],
                "dimensionFilter": dimension_filter,
                "metricFilter": metric_filter
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(!result.is_error, "{}", result.text);
    let call = harness.api.last_call();
    assert_eq!(call.body["dimensionFilter"], dimension_filter);
    assert_eq!(call.body["metricFilter"], metric_filter);
}

#[tokio::test]
async fn test_bare_property_id_is_normalised() {
    let harness = TestHarness::new(FakeAnalyticsApi::new().with_report(sample_report()), None);

    harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_REPORT,
            json!({
                "propertyId": "789",
                "dateRanges": [{"startDate": "yesterday", "endDate": "today"}],
                "metrics": [{"name": "sessions"}]
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert_eq!(harness.api.last_call().target, "properties/789");
}

#[tokio::test]
async fn test_batch_reports_are_numbered_and_separated() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_report(sample_report()),
        Some("123"),
    );
    let request = json!({
        "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
        "metrics": [{"name": "activeUsers"}]
    });

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_BATCH_REPORTS,
            json!({"requests": [request.clone(), request]}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.text.starts_with("Report #1:\nTotal rows: 2"));
    assert!(result
        .text
        .contains(&format!("\n\n{}\n\nReport #2:\n", "-".repeat(40))));
    assert_eq!(
        harness.api.last_call().body["requests"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_pivot_defaults_fill_first_dimension_and_limit() {
    let pivot = RunPivotReportResponse {
        rows: vec![Row {
            pivot_value_regions: vec![PivotValueRegion::default()],
            ..Row::default()
        }],
        ..RunPivotReportResponse::default()
    };
    let harness = TestHarness::new(FakeAnalyticsApi::new().with_pivot_report(pivot), Some("123"));

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_PIVOT_REPORT,
            json!({
                "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
                "dimensions": [{"name": "country"}, {"name": "city"}],
                "metrics": [{"name": "activeUsers"}],
                "pivots": [{"fieldNames": []}, {"fieldNames": ["city"], "limit": 3}]
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.text.starts_with("Pivot Report (1 rows)"));
    let pivots = harness.api.last_call().body["pivots"].clone();
    assert_eq!(pivots[0], json!({"fieldNames": ["country"], "limit": 10}));
    assert_eq!(pivots[1], json!({"fieldNames": ["city"], "limit": 3}));
}

#[tokio::test]
async fn test_upstream_errors_carry_the_upstream_message() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().failing(
            400,
            r#"{"error":{"code":400,"message":"Field fooBar is not a valid metric.","status":"INVALID_ARGUMENT"}}"#,
        ),
        Some("123"),
    );

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_REPORT,
            json!({
                "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
                "metrics": [{"name": "fooBar"}]
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.is_error);
    assert_eq!(
        result.text,
        "Error running report: Field fooBar is not a valid metric."
    );
}

#[tokio::test]
async fn test_authentication_failure_is_an_error_result() {
    let harness = TestHarness::refusing(Some("123"));

    let result = harness
        .resources
        .tool_registry
        .execute(tools::GET_METADATA, json!({}), &harness.context())
        .await
        .unwrap();

    assert!(result.is_error);
    assert!(result.text.starts_with("Error getting metadata: "));
    assert_eq!(harness.credentials.requests(), 1);
}

#[tokio::test]
async fn test_metadata_uses_shared_catalog_by_default() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_metadata(sample_metadata()),
        None,
    );

    let result = harness
        .resources
        .tool_registry
        .execute(tools::GET_METADATA, serde_json::Value::Null, &harness.context())
        .await
        .unwrap();

    assert!(!result.is_error);
    assert_eq!(harness.api.last_call().target, "properties/0/metadata");
    assert!(result.text.contains("Total Dimensions: 4"));
}

#[tokio::test]
async fn test_compatibility_reports_unknown_fields() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_metadata(sample_metadata()),
        None,
    );

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::CHECK_COMPATIBILITY,
            json!({"dimensions": ["country", "planet"], "metrics": ["sessions"]}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(!result.is_error);
    assert!(result.text.contains("Dimension 'planet': INCOMPATIBLE"));
}

#[tokio::test]
async fn test_update_audience_derives_mask_from_present_fields() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), Some("123"));

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::UPDATE_AUDIENCE,
            json!({
                "name": "properties/123/audiences/9",
                "displayName": "Returning buyers",
                "membershipDurationDays": 60
            }),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(!result.is_error, "{}", result.text);
    let call = harness.api.last_call();
    assert_eq!(call.method, "patch_audience");
    assert_eq!(call.target, "properties/123/audiences/9");
    assert_eq!(call.body["updateMask"], "displayName,membershipDurationDays");
    assert!(call.body["body"].get("description").is_none());
}

#[tokio::test]
async fn test_delete_audience_confirms_by_name() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::DELETE_AUDIENCE,
            json!({"name": "properties/123/audiences/9"}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert_eq!(
        result.text,
        "Audience properties/123/audiences/9 deleted successfully."
    );
    assert_eq!(harness.api.last_call().method, "delete_audience");
}

#[tokio::test]
async fn test_create_audience_requires_filter_clauses() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), Some("123"));

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::CREATE_AUDIENCE,
            json!({"displayName": "Empty", "filterClauses": []}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.is_error);
    assert!(result.text.starts_with("Error: "));
    assert_eq!(harness.credentials.requests(), 0);
}

#[tokio::test]
async fn test_list_audiences_echoes_page() {
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_audiences(vec![audience("123", "1", "Buyers")]),
        Some("123"),
    );

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::LIST_AUDIENCES,
            json!({"pageSize": 5}),
            &harness.context(),
        )
        .await
        .unwrap();

    let echoed: serde_json::Value =
        serde_json::from_str(result.text.strip_prefix("Audiences:\n").unwrap()).unwrap();
    assert_eq!(echoed["audiences"][0]["displayName"], "Buyers");
    assert_eq!(harness.api.last_call().body["pageSize"], 5);
}

#[tokio::test]
async fn test_get_audience_echoes_upstream_clause_shapes() {
    let raw = upstream_audience_json("123", "77");
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_audiences(vec![serde_json::from_value(raw.clone()).unwrap()]),
        None,
    );

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::GET_AUDIENCE,
            json!({"name": "properties/123/audiences/77"}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(!result.is_error, "{}", result.text);
    let echoed: serde_json::Value =
        serde_json::from_str(result.text.strip_prefix("Audience details:\n").unwrap()).unwrap();
    assert_eq!(echoed, raw);
}

#[tokio::test]
async fn test_list_audiences_keeps_unknown_audience_fields() {
    let raw = upstream_audience_json("123", "77");
    let harness = TestHarness::new(
        FakeAnalyticsApi::new().with_audiences(vec![serde_json::from_value(raw.clone()).unwrap()]),
        Some("123"),
    );

    let result = harness
        .resources
        .tool_registry
        .execute(tools::LIST_AUDIENCES, json!({}), &harness.context())
        .await
        .unwrap();

    assert!(!result.is_error, "{}", result.text);
    assert!(result.text.contains("\"simpleFilter\""));
    assert!(result.text.contains("\"exclusionDurationMode\": \"EXCLUDE_TEMPORARILY\""));
    assert!(result.text.contains("\"eventTrigger\""));
}

#[tokio::test]
async fn test_malformed_arguments_are_rejected() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), Some("123"));

    let result = harness
        .resources
        .tool_registry
        .execute(
            tools::RUN_REPORT,
            json!({"metrics": "activeUsers"}),
            &harness.context(),
        )
        .await
        .unwrap();

    assert!(result.is_error);
    assert!(result.text.starts_with("Invalid arguments for run_report"));
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let harness = TestHarness::new(FakeAnalyticsApi::new(), None);

    let err = harness
        .resources
        .tool_registry
        .execute("run_everything", json!({}), &harness.context())
        .await
        .unwrap_err();

    assert_eq!(err.message, "Unknown tool: run_everything");
}
