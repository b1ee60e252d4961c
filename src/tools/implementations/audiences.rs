// ABOUTME: Audience tools relaying create, list, get, update and delete to the Admin API.
// ABOUTME: Successful calls echo the upstream record as pretty-printed JSON.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Audience Tools
//!
//! - `CreateAudienceTool` - create an audience from display name and clauses
//! - `ListAudiencesTool` - one page of a property's audiences
//! - `GetAudienceTool` - one audience by resource name
//! - `UpdateAudienceTool` - partial update with a derived or explicit mask
//! - `DeleteAudienceTool` - delete by resource name

use async_trait::async_trait;
use serde_json::Value;

use super::{audience_name_schema, filter_clauses_schema, parse_args, property_id_schema, render};
use crate::analytics::{AudienceDraft, AudiencePatch, AudienceRef, ListAudiencesQuery};
use crate::constants::tools::{
    CREATE_AUDIENCE, DELETE_AUDIENCE, GET_AUDIENCE, LIST_AUDIENCES, UPDATE_AUDIENCE,
};
use crate::errors::AppResult;
use crate::formatters::{
    format_audience_created, format_audience_deleted, format_audience_echo,
    format_audience_updated, format_audiences_echo,
};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

fn display_name_schema() -> PropertySchema {
    PropertySchema::string("Display name for the audience")
}

fn description_schema() -> PropertySchema {
    PropertySchema::string("Description of the audience")
}

fn membership_schema() -> PropertySchema {
    PropertySchema::number("Membership duration in days")
}

// ============================================================================
// CreateAudienceTool
// ============================================================================

/// Tool creating an audience.
pub struct CreateAudienceTool;

#[async_trait]
impl McpTool for CreateAudienceTool {
    fn name(&self) -> &'static str {
        CREATE_AUDIENCE
    }

    fn description(&self) -> &'static str {
        "Create a new audience in Google Analytics"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [
                ("propertyId", property_id_schema()),
                ("displayName", display_name_schema()),
                ("description", description_schema()),
                ("membershipDurationDays", membership_schema()),
                ("filterClauses", filter_clauses_schema()),
            ],
            &["displayName", "filterClauses"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_PROPERTY
            | ToolCapabilities::WRITES_DATA
            | ToolCapabilities::AUDIENCES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let draft: AudienceDraft = match parse_args(CREATE_AUDIENCE, args) {
            Ok(draft) => draft,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .audiences()
            .create(ctx.credentials(), draft)
            .await
            .and_then(|audience| format_audience_created(&audience));
        Ok(render(CREATE_AUDIENCE, "Error creating audience", outcome))
    }
}

// ============================================================================
// ListAudiencesTool
// ============================================================================

/// Tool listing one page of audiences.
pub struct ListAudiencesTool;

#[async_trait]
impl McpTool for ListAudiencesTool {
    fn name(&self) -> &'static str {
        LIST_AUDIENCES
    }

    fn description(&self) -> &'static str {
        "List audiences in a Google Analytics property"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [
                ("propertyId", property_id_schema()),
                (
                    "pageSize",
                    PropertySchema::number("Maximum number of audiences to return"),
                ),
                ("pageToken", PropertySchema::string("Page token for pagination")),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_PROPERTY
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::AUDIENCES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let query: ListAudiencesQuery = match parse_args(LIST_AUDIENCES, args) {
            Ok(query) => query,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .audiences()
            .list(ctx.credentials(), query)
            .await
            .and_then(|(_, page)| format_audiences_echo(&page));
        Ok(render(LIST_AUDIENCES, "Error listing audiences", outcome))
    }
}

// ============================================================================
// GetAudienceTool
// ============================================================================

/// Tool fetching one audience.
pub struct GetAudienceTool;

#[async_trait]
impl McpTool for GetAudienceTool {
    fn name(&self) -> &'static str {
        GET_AUDIENCE
    }

    fn description(&self) -> &'static str {
        "Get details of a specific audience in Google Analytics"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object([("name", audience_name_schema())], &["name"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::AUDIENCES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let target: AudienceRef = match parse_args(GET_AUDIENCE, args) {
            Ok(target) => target,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .audiences()
            .get(ctx.credentials(), &target.name)
            .await
            .and_then(|audience| format_audience_echo(&audience));
        Ok(render(GET_AUDIENCE, "Error getting audience", outcome))
    }
}

// ============================================================================
// UpdateAudienceTool
// ============================================================================

/// Tool applying a partial audience update.
pub struct UpdateAudienceTool;

#[async_trait]
impl McpTool for UpdateAudienceTool {
    fn name(&self) -> &'static str {
        UPDATE_AUDIENCE
    }

    fn description(&self) -> &'static str {
        "Update an existing audience in Google Analytics"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            [
                ("name", audience_name_schema()),
                ("displayName", display_name_schema()),
                ("description", description_schema()),
                ("membershipDurationDays", membership_schema()),
                ("filterClauses", filter_clauses_schema()),
                (
                    "updateMask",
                    PropertySchema::string("Comma-separated list of fields to update"),
                ),
            ],
            &["name"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::DESTRUCTIVE | ToolCapabilities::AUDIENCES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let patch: AudiencePatch = match parse_args(UPDATE_AUDIENCE, args) {
            Ok(patch) => patch,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .audiences()
            .update(ctx.credentials(), patch)
            .await
            .and_then(|audience| format_audience_updated(&audience));
        Ok(render(UPDATE_AUDIENCE, "Error updating audience", outcome))
    }
}

// ============================================================================
// DeleteAudienceTool
// ============================================================================

/// Tool deleting an audience.
pub struct DeleteAudienceTool;

#[async_trait]
impl McpTool for DeleteAudienceTool {
    fn name(&self) -> &'static str {
        DELETE_AUDIENCE
    }

    fn description(&self) -> &'static str {
        "Delete an audience from Google Analytics"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object([("name", audience_name_schema())], &["name"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::DESTRUCTIVE | ToolCapabilities::AUDIENCES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let target: AudienceRef = match parse_args(DELETE_AUDIENCE, args) {
            Ok(target) => target,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = ctx
            .audiences()
            .delete(ctx.credentials(), &target.name)
            .await
            .map(|name| format_audience_deleted(&name));
        Ok(render(DELETE_AUDIENCE, "Error deleting audience", outcome))
    }
}

/// Create all audience tools in registration order
#[must_use]
pub fn create_audience_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CreateAudienceTool),
        Box::new(ListAudiencesTool),
        Box::new(GetAudienceTool),
        Box::new(UpdateAudienceTool),
        Box::new(DeleteAudienceTool),
    ]
}
