// ABOUTME: Model Context Protocol (MCP) implementation for AI assistant integration
// ABOUTME: Request routing, wire schemas, shared server resources and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

/// JSON-RPC method routing
pub mod mcp_request_processor;
/// Shared server resources
pub mod resources;
/// MCP wire schemas
pub mod schema;
/// Stdio transport
pub mod transport;

pub use mcp_request_processor::McpRequestProcessor;
pub use resources::ServerResources;
pub use transport::StdioTransport;
