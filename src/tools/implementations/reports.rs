// ABOUTME: Report tools running Data API reports and returning formatted tables.
// ABOUTME: Implements run_report, run_batch_reports, run_pivot_report, batch_run_pivot_reports.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Report Tools
//!
//! - `RunReportTool` - single report, rendered as a fixed-width table
//! - `RunBatchReportsTool` - several reports against one property
//! - `RunPivotReportTool` - pivot report summary
//! - `BatchRunPivotReportsTool` - several pivot reports against one property

use async_trait::async_trait;
use serde_json::Value;

use super::{parse_args, property_id_schema, render, report_fields};
use crate::analytics::{BatchPivotReportQuery, BatchReportQuery, PivotReportQuery, ReportQuery};
use crate::constants::tools::{
    BATCH_RUN_PIVOT_REPORTS, RUN_BATCH_REPORTS, RUN_PIVOT_REPORT, RUN_REPORT,
};
use crate::errors::AppResult;
use crate::formatters::{
    format_batch_pivot_reports, format_batch_reports, format_pivot_report, format_report,
};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const REPORT_CAPABILITIES: ToolCapabilities = ToolCapabilities::REQUIRES_PROPERTY
    .union(ToolCapabilities::READS_DATA)
    .union(ToolCapabilities::REPORTING);

fn pivots_schema() -> PropertySchema {
    PropertySchema::array(
        "Pivot specifications for the report",
        PropertySchema::object(
            "Pivot",
            [
                (
                    "fieldNames",
                    PropertySchema::array(
                        "Names of dimensions to pivot",
                        PropertySchema::string("Dimension name"),
                    ),
                ),
                ("limit", PropertySchema::number("Maximum number of pivot rows")),
                ("offset", PropertySchema::number("Number of pivot rows to skip")),
                (
                    "orderBys",
                    super::order_bys_schema("Order specifications for the pivot rows"),
                ),
            ],
            &["fieldNames"],
        ),
    )
}

fn report_shape() -> PropertySchema {
    PropertySchema::object("Report request", report_fields(), &["dateRanges", "metrics"])
}

fn pivot_report_shape() -> PropertySchema {
    let mut fields = report_fields();
    fields.push(("pivots", pivots_schema()));
    PropertySchema::object(
        "Pivot report request",
        fields,
        &["dateRanges", "metrics", "pivots"],
    )
}

// ============================================================================
// RunReportTool
// ============================================================================

/// Tool running a single report.
pub struct RunReportTool;

#[async_trait]
impl McpTool for RunReportTool {
    fn name(&self) -> &'static str {
        RUN_REPORT
    }

    fn description(&self) -> &'static str {
        "Run a report on Google Analytics data"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut fields = report_fields();
        fields.push(("propertyId", property_id_schema()));
        JsonSchema::object(fields, &["dateRanges", "metrics"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        REPORT_CAPABILITIES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let query: ReportQuery = match parse_args(RUN_REPORT, args) {
            Ok(query) => query,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .reports()
            .run_report(ctx.credentials(), query)
            .await
            .map(|report| format_report(&report));
        Ok(render(RUN_REPORT, "Error running report", outcome))
    }
}

// ============================================================================
// RunBatchReportsTool
// ============================================================================

/// Tool running several reports in one upstream call.
pub struct RunBatchReportsTool;

#[async_trait]
impl McpTool for RunBatchReportsTool {
    fn name(&self) -> &'static str {
        RUN_BATCH_REPORTS
    }

    fn description(&self) -> &'static str {
        "Run multiple reports in a single batch on Google Analytics data"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [
                ("propertyId", property_id_schema()),
                (
                    "requests",
                    PropertySchema::array("Array of report requests to run in batch", report_shape()),
                ),
            ],
            &["requests"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        REPORT_CAPABILITIES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let query: BatchReportQuery = match parse_args(RUN_BATCH_REPORTS, args) {
            Ok(query) => query,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .reports()
            .run_batch_reports(ctx.credentials(), query)
            .await
            .map(|batch| format_batch_reports(&batch));
        Ok(render(RUN_BATCH_REPORTS, "Error running batch reports", outcome))
    }
}

// ============================================================================
// RunPivotReportTool
// ============================================================================

/// Tool running a pivot report.
pub struct RunPivotReportTool;

#[async_trait]
impl McpTool for RunPivotReportTool {
    fn name(&self) -> &'static str {
        RUN_PIVOT_REPORT
    }

    fn description(&self) -> &'static str {
        "Run a pivot report on Google Analytics data"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut fields = report_fields();
        fields.push(("propertyId", property_id_schema()));
        fields.push(("pivots", pivots_schema()));
        JsonSchema::object(fields, &["dateRanges", "metrics", "pivots"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        REPORT_CAPABILITIES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let query: PivotReportQuery = match parse_args(RUN_PIVOT_REPORT, args) {
            Ok(query) => query,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .reports()
            .run_pivot_report(ctx.credentials(), query)
            .await
            .map(|report| format_pivot_report(&report));
        Ok(render(RUN_PIVOT_REPORT, "Error running pivot report", outcome))
    }
}

// ============================================================================
// BatchRunPivotReportsTool
// ============================================================================

/// Tool running several pivot reports in one upstream call.
pub struct BatchRunPivotReportsTool;

#[async_trait]
impl McpTool for BatchRunPivotReportsTool {
    fn name(&self) -> &'static str {
        BATCH_RUN_PIVOT_REPORTS
    }

    fn description(&self) -> &'static str {
        "Run multiple pivot reports in a single batch on Google Analytics data"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [
                ("propertyId", property_id_schema()),
                (
                    "requests",
                    PropertySchema::array(
                        "Array of pivot report requests to run in batch",
                        pivot_report_shape(),
                    ),
                ),
            ],
            &["requests"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        REPORT_CAPABILITIES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let query: BatchPivotReportQuery = match parse_args(BATCH_RUN_PIVOT_REPORTS, args) {
            Ok(query) => query,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .reports()
            .run_batch_pivot_reports(ctx.credentials(), query)
            .await
            .map(|batch| format_batch_pivot_reports(&batch));
        Ok(render(
            BATCH_RUN_PIVOT_REPORTS,
            "Error running batch pivot reports",
            outcome,
        ))
    }
}

/// Create all report tools in registration order
#[must_use]
pub fn create_report_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(RunReportTool),
        Box::new(RunBatchReportsTool),
        Box::new(RunPivotReportTool),
        Box::new(BatchRunPivotReportsTool),
    ]
}
