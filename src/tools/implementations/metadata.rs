// ABOUTME: Catalog tools reading the Data API dimension and metric metadata.
// ABOUTME: Implements get_metadata and check_compatibility.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{parse_args, render};
use crate::analytics::{check_compatibility, CompatibilityStatus};
use crate::constants::tools::{CHECK_COMPATIBILITY, GET_METADATA};
use crate::errors::AppResult;
use crate::formatters::{format_compatibility, format_metadata};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const METADATA_CAPABILITIES: ToolCapabilities =
    ToolCapabilities::READS_DATA.union(ToolCapabilities::METADATA);

#[derive(Debug, Default, Deserialize)]
struct GetMetadataArgs {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CompatibilityArgs {
    #[serde(default)]
    dimensions: Vec<String>,
    #[serde(default)]
    metrics: Vec<String>,
    #[serde(default)]
    compatibility: Option<CompatibilityStatus>,
}

// ============================================================================
// GetMetadataTool
// ============================================================================

/// Tool summarising the dimension and metric catalog.
pub struct GetMetadataTool;

#[async_trait]
impl McpTool for GetMetadataTool {
    fn name(&self) -> &'static str {
        GET_METADATA
    }

    fn description(&self) -> &'static str {
        "Get Google Analytics metadata including dimensions and metrics definitions"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [(
                "name",
                PropertySchema::string(
                    "Metadata resource name (default: 'properties/0/metadata', the catalog shared by all properties)",
                ),
            )],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        METADATA_CAPABILITIES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: GetMetadataArgs = match parse_args(GET_METADATA, args) {
            Ok(args) => args,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .metadata()
            .get_catalog(ctx.credentials(), args.name.as_deref())
            .await
            .map(|catalog| format_metadata(&catalog));
        Ok(render(GET_METADATA, "Error getting metadata", outcome))
    }
}

// ============================================================================
// CheckCompatibilityTool
// ============================================================================

/// Tool checking requested field names against the catalog.
pub struct CheckCompatibilityTool;

#[async_trait]
impl McpTool for CheckCompatibilityTool {
    fn name(&self) -> &'static str {
        CHECK_COMPATIBILITY
    }

    fn description(&self) -> &'static str {
        "Check compatibility between dimensions and metrics in Google Analytics"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [
                (
                    "dimensions",
                    PropertySchema::array(
                        "Dimension names to check compatibility",
                        PropertySchema::string("Dimension name"),
                    ),
                ),
                (
                    "metrics",
                    PropertySchema::array(
                        "Metric names to check compatibility",
                        PropertySchema::string("Metric name"),
                    ),
                ),
                (
                    "compatibility",
                    PropertySchema::string("Filter by compatibility status")
                        .with_enum(&["COMPATIBLE", "INCOMPATIBLE"]),
                ),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        METADATA_CAPABILITIES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: CompatibilityArgs = match parse_args(CHECK_COMPATIBILITY, args) {
            Ok(args) => args,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .metadata()
            .get_catalog(ctx.credentials(), None)
            .await
            .map(|catalog| {
                let results = check_compatibility(
                    &catalog,
                    &args.dimensions,
                    &args.metrics,
                    args.compatibility,
                );
                format_compatibility(&results)
            });
        Ok(render(
            CHECK_COMPATIBILITY,
            "Error checking compatibility",
            outcome,
        ))
    }
}

/// Create all metadata tools in registration order
#[must_use]
pub fn create_metadata_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetMetadataTool), Box::new(CheckCompatibilityTool)]
}
