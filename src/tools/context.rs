// ABOUTME: Defines ToolExecutionContext which gives tools access to shared server resources.
// ABOUTME: Carries the request id for tracing alongside the Arc'd resource container.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Tool Execution Context
//!
//! A unified context object handed to every tool execution, containing the
//! shared server resources and request tracing information.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::analytics::{AudienceManager, MetadataLookup, ReportTranslator};
use crate::config::ServerConfig;
use crate::google::CredentialProvider;
use crate::mcp::resources::ServerResources;

/// Context provided to every tool execution.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Request ID for tracing/logging
    pub request_id: Option<Value>,
    /// Access to all server resources
    pub resources: Arc<ServerResources>,
}

impl ToolExecutionContext {
    /// Create a new context over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            request_id: None,
            resources,
        }
    }

    /// Set request ID for tracing
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<Value>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Credential provider used to obtain an authenticated client
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialProvider {
        self.resources.credentials.as_ref()
    }

    /// Immutable server configuration
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.resources.config
    }

    /// Report translator
    #[must_use]
    pub fn reports(&self) -> &ReportTranslator {
        &self.resources.reports
    }

    /// Audience manager
    #[must_use]
    pub fn audiences(&self) -> &AudienceManager {
        &self.resources.audiences
    }

    /// Metadata lookup
    #[must_use]
    pub fn metadata(&self) -> &MetadataLookup {
        &self.resources.metadata
    }

    /// Get tracing span attributes for this context
    #[must_use]
    pub fn span_attributes(&self) -> Vec<(&'static str, String)> {
        self.request_id
            .iter()
            .map(|request_id| ("request_id", request_id.to_string()))
            .collect()
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("request_id", &self.request_id)
            .field("resources", &"<ServerResources>")
            .finish()
    }
}
