// ABOUTME: Data API report request and response records for the four report variants
// ABOUTME: Covers runReport, batchRunReports, runPivotReport and batchRunPivotReports payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use serde::{Deserialize, Serialize};

use super::filters::FilterExpression;

// ============================================================================
// Request building blocks
// ============================================================================

/// Contiguous set of days; dates are `YYYY-MM-DD`, `today`, `yesterday` or `NdaysAgo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Inclusive start date
    pub start_date: String,
    /// Inclusive end date
    pub end_date: String,
    /// Optional label echoed back in the `dateRange` dimension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Dimension reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Catalog api name
    pub name: String,
}

/// Metric reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Catalog api name
    pub name: String,
}

impl Dimension {
    /// Reference a dimension by api name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Metric {
    /// Reference a metric by api name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    /// Sort by dimension values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<DimensionOrderBy>,
    /// Sort by metric values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricOrderBy>,
    /// Descending order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<bool>,
}

/// Sort by a dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrderBy {
    /// Dimension api name
    pub dimension_name: String,
    /// Comparison rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
}

/// Sort by a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOrderBy {
    /// Metric api name
    pub metric_name: String,
}

/// Dimension comparison rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Unicode code point order
    Alphanumeric,
    /// Lower-cased code point order
    CaseInsensitiveAlphanumeric,
    /// Values converted to numbers
    Numeric,
}

/// Pivot specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pivot {
    /// Dimensions laid out as pivot columns
    #[serde(default)]
    pub field_names: Vec<String>,
    /// Ordering of pivot columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_bys: Option<Vec<OrderBy>>,
    /// Pivot rows to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Pivot rows to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `properties/{property}:runReport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    /// Date ranges to read
    pub date_ranges: Vec<DateRange>,
    /// Requested dimensions
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    /// Requested metrics
    pub metrics: Vec<Metric>,
    /// Row filter on dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    /// Row filter on metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<FilterExpression>,
    /// Rows to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Rows to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Row ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_bys: Option<Vec<OrderBy>>,
    /// Return rows whose metrics are all zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_empty_rows: Option<bool>,
}

/// Body of `properties/{property}:batchRunReports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchRunReportsRequest {
    /// Individual reports, all against the same property
    pub requests: Vec<RunReportRequest>,
}

/// Body of `properties/{property}:runPivotReport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunPivotReportRequest {
    /// Date ranges to read
    pub date_ranges: Vec<DateRange>,
    /// Requested dimensions
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    /// Requested metrics
    pub metrics: Vec<Metric>,
    /// Pivot layout
    pub pivots: Vec<Pivot>,
    /// Row filter on dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    /// Row filter on metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<FilterExpression>,
    /// Return rows whose metrics are all zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_empty_rows: Option<bool>,
}

/// Body of `properties/{property}:batchRunPivotReports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchRunPivotReportsRequest {
    /// Individual pivot reports, all against the same property
    pub requests: Vec<RunPivotReportRequest>,
}

// ============================================================================
// Responses
// ============================================================================

/// Column header for a dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DimensionHeader {
    /// Dimension api name
    #[serde(default)]
    pub name: String,
}

/// Column header for a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MetricHeader {
    /// Metric api name
    #[serde(default)]
    pub name: String,
    /// Metric data type, e.g. `TYPE_INTEGER`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
}

/// One dimension cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DimensionValue {
    /// Cell value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One metric cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MetricValue {
    /// Cell value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Values of one pivot region within a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PivotValueRegion {
    /// Region values
    #[serde(default)]
    pub values: Vec<MetricValue>,
}

/// Report row: dimension values followed by metric values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Dimension cells in header order
    #[serde(default)]
    pub dimension_values: Vec<DimensionValue>,
    /// Metric cells in header order
    #[serde(default)]
    pub metric_values: Vec<MetricValue>,
    /// Pivot regions, present on some pivot responses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pivot_value_regions: Vec<PivotValueRegion>,
}

/// Column header block of one pivot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PivotHeader {
    /// Distinct pivot column combinations
    #[serde(default)]
    pub pivot_dimension_headers: Vec<serde_json::Value>,
    /// Total pivot columns available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
}

/// Response of `runReport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    /// Dimension columns
    #[serde(default)]
    pub dimension_headers: Vec<DimensionHeader>,
    /// Metric columns
    #[serde(default)]
    pub metric_headers: Vec<MetricHeader>,
    /// Result rows
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Total rows matching the query, independent of `limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
}

/// Response of `batchRunReports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchRunReportsResponse {
    /// One response per request, in request order
    #[serde(default)]
    pub reports: Vec<RunReportResponse>,
}

/// Response of `runPivotReport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunPivotReportResponse {
    /// Pivot column headers
    #[serde(default)]
    pub pivot_headers: Vec<PivotHeader>,
    /// Dimension columns
    #[serde(default)]
    pub dimension_headers: Vec<DimensionHeader>,
    /// Metric columns
    #[serde(default)]
    pub metric_headers: Vec<MetricHeader>,
    /// Result rows
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Total rows, when upstream reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
}

/// Response of `batchRunPivotReports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchRunPivotReportsResponse {
    /// One response per request, in request order
    #[serde(default)]
    pub pivot_reports: Vec<RunPivotReportResponse>,
}
