// ABOUTME: MCP tool layer: trait, registry, execution context and result types.
// ABOUTME: Each tool validates its arguments, calls upstream and returns formatted text.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Tools
//!
//! Tools are registered once in a [`ToolRegistry`] and dispatched by name
//! from `tools/call`. Failures inside a tool become error results rather
//! than protocol errors.

/// Execution context handed to every tool
pub mod context;
/// Tool dispatch errors
pub mod errors;
/// Tool implementations by category
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool results
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
