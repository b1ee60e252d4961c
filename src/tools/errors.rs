// ABOUTME: Defines tool-specific error types for the tool registry.
// ABOUTME: Provides structured errors that integrate with the main AppError system.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Tool Error Types
//!
//! `ToolError` covers failures that happen around a tool rather than inside
//! it: unknown names and undecodable arguments. It converts into `AppError`
//! so dispatch code can use `?`.

use std::error::Error;
use std::fmt;

use crate::errors::{AppError, ErrorCode};

/// Errors specific to tool dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Tool was not found in the registry
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Arguments did not match the tool's input shape
    InvalidArguments {
        /// Name of the tool
        tool_name: String,
        /// Decoder message
        reason: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid arguments" error
    #[must_use]
    pub fn invalid_arguments(tool_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidArguments {
            tool_name: tool_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name } | Self::InvalidArguments { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { tool_name } => write!(f, "Unknown tool: {tool_name}"),
            Self::InvalidArguments { tool_name, reason } => {
                write!(f, "Invalid arguments for {tool_name}: {reason}")
            }
        }
    }
}

impl Error for ToolError {}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        match &error {
            ToolError::NotFound { .. } => Self::new(ErrorCode::ResourceNotFound, error.to_string()),
            ToolError::InvalidArguments { .. } => Self::invalid_input(error.to_string()),
        }
    }
}
