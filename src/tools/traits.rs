// ABOUTME: Defines the McpTool trait and ToolCapabilities for the tool registry.
// ABOUTME: Every Google Analytics tool implements this trait and is dispatched by name.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # MCP Tool Trait and Capabilities
//!
//! All tools implement [`McpTool`], which provides:
//! - Tool metadata (name, description, input schema)
//! - Capability flags for filtering and logging
//! - Async execution with context

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, ToolAnnotations};

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool needs a property (explicit or the configured default)
        const REQUIRES_PROPERTY = 0b0000_0001;
        /// Tool reads data upstream
        const READS_DATA = 0b0000_0010;
        /// Tool creates, changes or deletes upstream state
        const WRITES_DATA = 0b0000_0100;
        /// Tool runs Data API reports
        const REPORTING = 0b0000_1000;
        /// Tool reads the dimension and metric catalog
        const METADATA = 0b0001_0000;
        /// Tool manages audiences through the Admin API
        const AUDIENCES = 0b0010_0000;
        /// Tool overwrites or removes existing upstream state
        const DESTRUCTIVE = 0b0100_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool writes data
    #[must_use]
    pub const fn writes_data(self) -> bool {
        self.contains(Self::WRITES_DATA)
    }

    /// Client hints derived from the capability flags
    #[must_use]
    pub const fn annotations(self) -> ToolAnnotations {
        let writes = self.writes_data();
        ToolAnnotations {
            read_only_hint: Some(!writes),
            destructive_hint: Some(self.contains(Self::DESTRUCTIVE)),
            idempotent_hint: if writes { None } else { Some(true) },
            open_world_hint: Some(self.intersects(Self::READS_DATA.union(Self::WRITES_DATA))),
        }
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = self
            .iter_names()
            .map(|(name, _)| match name {
                "REQUIRES_PROPERTY" => "requires_property",
                "READS_DATA" => "reads_data",
                "WRITES_DATA" => "writes_data",
                "REPORTING" => "reporting",
                "METADATA" => "metadata",
                "AUDIENCES" => "audiences",
                "DESTRUCTIVE" => "destructive",
                other => other,
            })
            .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// Tools are registered with the `ToolRegistry` and looked up by
/// [`McpTool::name`] when a `tools/call` arrives.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use analytics_mcp_server::tools::{McpTool, ToolCapabilities, ToolResult, ToolExecutionContext};
/// use analytics_mcp_server::mcp::schema::JsonSchema;
/// use analytics_mcp_server::errors::AppResult;
/// use serde_json::Value;
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping_upstream"
///     }
///
///     fn description(&self) -> &'static str {
///         "Check that the server answers"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema::object([], &[])
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::READS_DATA
///     }
///
///     async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::text("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `run_report`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned by `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and logging
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Implementations render domain failures as error results; an `Err`
    /// is reserved for failures outside the tool's own domain
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
