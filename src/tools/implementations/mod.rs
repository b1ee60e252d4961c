// ABOUTME: Module containing all MCP tool implementations organized by category.
// ABOUTME: Shares argument decoding, failure rendering and common schema fragments.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Tool Implementations
//!
//! - `reports` - `run_report`, `run_batch_reports`, `run_pivot_report`,
//!   `batch_run_pivot_reports`
//! - `metadata` - `get_metadata`, `check_compatibility`
//! - `audiences` - audience create, list, get, update and delete

/// Audience management tools
pub mod audiences;
/// Catalog tools
pub mod metadata;
/// Report tools
pub mod reports;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::errors::AppResult;
use crate::mcp::schema::PropertySchema;

use super::errors::ToolError;
use super::result::ToolResult;

// ============================================================================
// Helper functions
// ============================================================================

/// Decode tool arguments; absent arguments decode as an empty object
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &'static str, args: Value) -> Result<T, ToolResult> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| {
        let err = ToolError::invalid_arguments(tool, e);
        warn!(tool, error = %err, "Rejected tool arguments");
        ToolResult::error(err.to_string())
    })
}

/// Turn the outcome of a tool body into a result, logging failures
pub(crate) fn render(tool: &'static str, context: &str, outcome: AppResult<String>) -> ToolResult {
    match outcome {
        Ok(text) => ToolResult::text(text),
        Err(e) if e.code.is_validation() => {
            warn!(tool, error = %e, "Tool arguments failed validation");
            ToolResult::failure(context, &e)
        }
        Err(e) => {
            error!(tool, error = %e, upstream_status = ?e.upstream_status, "{context}");
            ToolResult::failure(context, &e)
        }
    }
}

// ============================================================================
// Shared schema fragments
// ============================================================================

pub(crate) fn property_id_schema() -> PropertySchema {
    PropertySchema::string("Google Analytics property ID (format: properties/123456789)")
}

pub(crate) fn date_ranges_schema() -> PropertySchema {
    PropertySchema::array(
        "Date ranges for the query",
        PropertySchema::object(
            "Date range",
            [
                (
                    "startDate",
                    PropertySchema::string("Start date in YYYY-MM-DD format or a relative date such as 7daysAgo"),
                ),
                (
                    "endDate",
                    PropertySchema::string("End date in YYYY-MM-DD format or a relative date such as today"),
                ),
                ("name", PropertySchema::string("Optional label for the range")),
            ],
            &["startDate", "endDate"],
        ),
    )
}

fn named_fields_schema(description: &str, item: &str) -> PropertySchema {
    PropertySchema::array(
        description,
        PropertySchema::object("Field reference", [("name", PropertySchema::string(item))], &["name"]),
    )
}

pub(crate) fn dimensions_schema() -> PropertySchema {
    named_fields_schema(
        "Dimensions to include in the report",
        "Dimension name (e.g., 'country', 'deviceCategory')",
    )
}

pub(crate) fn metrics_schema() -> PropertySchema {
    named_fields_schema(
        "Metrics to include in the report",
        "Metric name (e.g., 'activeUsers', 'sessions')",
    )
}

pub(crate) fn order_bys_schema(description: &str) -> PropertySchema {
    PropertySchema::array(
        description,
        PropertySchema::object(
            "Order specification",
            [
                (
                    "dimension",
                    PropertySchema::object(
                        "Order by a dimension",
                        [
                            ("dimensionName", PropertySchema::string("Dimension to order by")),
                            (
                                "orderType",
                                PropertySchema::string("How dimension values are compared").with_enum(&[
                                    "ALPHANUMERIC",
                                    "CASE_INSENSITIVE_ALPHANUMERIC",
                                    "NUMERIC",
                                ]),
                            ),
                        ],
                        &["dimensionName"],
                    ),
                ),
                (
                    "metric",
                    PropertySchema::object(
                        "Order by a metric",
                        [("metricName", PropertySchema::string("Metric to order by"))],
                        &["metricName"],
                    ),
                ),
                ("desc", PropertySchema::boolean("Sort in descending order")),
            ],
            &[],
        ),
    )
}

/// Report fields shared by the single and pivot report shapes
pub(crate) fn report_fields() -> Vec<(&'static str, PropertySchema)> {
    vec![
        ("dateRanges", date_ranges_schema()),
        ("dimensions", dimensions_schema()),
        ("metrics", metrics_schema()),
        ("limit", PropertySchema::number("Maximum number of rows to return")),
        ("offset", PropertySchema::number("Number of rows to skip")),
        ("orderBys", order_bys_schema("Order specifications for the rows")),
        ("dimensionFilter", PropertySchema::any("Filter for dimensions")),
        ("metricFilter", PropertySchema::any("Filter for metrics")),
        ("keepEmptyRows", PropertySchema::boolean("Whether to keep empty rows")),
    ]
}

pub(crate) fn filter_clauses_schema() -> PropertySchema {
    PropertySchema::array(
        "Filter clauses for the audience",
        PropertySchema::object(
            "Audience filter clause",
            [
                (
                    "clauseType",
                    PropertySchema::string("Whether matching users are included or excluded")
                        .with_enum(&["INCLUDE", "EXCLUDE"]),
                ),
                (
                    "filterExpression",
                    PropertySchema::any(
                        "Filter expression: andGroup, orGroup, notExpression or filter with a \
                         stringFilter, inListFilter, numericFilter, betweenFilter or emptyFilter",
                    ),
                ),
                (
                    "simpleFilter",
                    PropertySchema::any("Admin API simple filter, forwarded as given"),
                ),
                (
                    "sequenceFilter",
                    PropertySchema::any("Admin API sequence filter, forwarded as given"),
                ),
            ],
            &[],
        ),
    )
}

pub(crate) fn audience_name_schema() -> PropertySchema {
    PropertySchema::string(
        "Audience resource name (format: properties/123456789/audiences/abcdef)",
    )
}
