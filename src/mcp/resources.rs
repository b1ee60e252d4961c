// ABOUTME: Centralized resource container shared by every MCP request
// ABOUTME: Holds configuration, the credential provider, registries and the analytics components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Server Resources Module
//!
//! Built once at startup and shared behind an `Arc` by the transport, the
//! request processor, tools and resource handlers. Nothing in here is
//! mutated after construction.

use std::fmt;
use std::sync::Arc;

use crate::analytics::{AudienceManager, MetadataLookup, ReportTranslator};
use crate::config::ServerConfig;
use crate::google::{CredentialProvider, ServiceAccountProvider};
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
    /// Source of authenticated API clients
    pub credentials: Arc<dyn CredentialProvider>,
    /// Registered tools
    pub tool_registry: Arc<ToolRegistry>,
    /// Registered `ga://` resources
    pub resource_registry: Arc<ResourceRegistry>,
    /// Report translation
    pub reports: ReportTranslator,
    /// Audience management
    pub audiences: AudienceManager,
    /// Catalog lookup
    pub metadata: MetadataLookup,
}

impl ServerResources {
    /// Create resources authenticating with the configured service account
    #[must_use]
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(ServiceAccountProvider::from_config(&config));
        Self::with_credential_provider(config, credentials)
    }

    /// Create resources around an explicit credential provider
    #[must_use]
    pub fn with_credential_provider(
        config: Arc<ServerConfig>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            reports: ReportTranslator::from_config(&config),
            audiences: AudienceManager::from_config(&config),
            metadata: MetadataLookup::default(),
            tool_registry: Arc::new(ToolRegistry::with_builtin_tools()),
            resource_registry: Arc::new(ResourceRegistry::with_builtin_resources()),
            credentials,
            config,
        }
    }
}

impl fmt::Debug for ServerResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerResources")
            .field("default_property", &self.config.default_property_id)
            .field("tools", &self.tool_registry.len())
            .field("resources", &self.resource_registry.len())
            .finish_non_exhaustive()
    }
}
