// ABOUTME: Defines ToolResult, the text-plus-error-flag outcome of a tool execution.
// ABOUTME: Converts into the MCP CallToolResult shape returned by tools/call.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Tool Result Types
//!
//! Bridges tool implementations with the MCP `CallToolResult` format:
//! `{ content: [{type: "text", text}], isError }`.

use crate::errors::AppError;
use crate::mcp::schema::{Content, ToolResponse};

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Text returned to the client
    pub text: String,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful text result
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            is_error: true,
        }
    }

    /// Render a failure as `"{context}: {message}"`; validation failures
    /// use the plain `Error:` prefix instead.
    #[must_use]
    pub fn failure(context: &str, error: &AppError) -> Self {
        if error.code.is_validation() {
            Self::error(format!("Error: {}", error.message))
        } else {
            Self::error(format!("{context}: {}", error.message))
        }
    }

    /// Convert into the wire shape of `tools/call`
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        ToolResponse {
            content: vec![Content::Text { text: self.text }],
            is_error: self.is_error,
        }
    }
}

impl From<ToolResult> for ToolResponse {
    fn from(result: ToolResult) -> Self {
        result.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_uses_plain_prefix() {
        let err = AppError::invalid_input("At least one metric must be specified");
        let result = ToolResult::failure("Error running report", &err);
        assert!(result.is_error);
        assert_eq!(result.text, "Error: At least one metric must be specified");
    }

    #[test]
    fn test_upstream_failure_names_the_operation() {
        let err = AppError::external_service("Field foo is not a valid dimension");
        let result = ToolResult::failure("Error running report", &err);
        assert_eq!(
            result.text,
            "Error running report: Field foo is not a valid dimension"
        );
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(ToolResult::text("ok").into_response()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"content": [{"type": "text", "text": "ok"}], "isError": false})
        );
    }
}
