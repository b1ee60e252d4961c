// ABOUTME: Addressable ga:// resources: wire records, the handler trait and the registry
// ABOUTME: Fixed URIs are listed as resources, parameterised ones as templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Resources
//!
//! Every `ga://` URI is served by one [`ResourceHandler`]. Reads never fail at
//! the protocol level once a handler matched: upstream and validation errors
//! come back as the text of the resource.

/// Built-in resource handlers
pub mod handlers;
/// `ga://` URI templates
pub mod uri;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::mcp::resources::ServerResources;

pub use uri::{UriParams, UriTemplate, SCHEME};

/// MIME type of every resource body
pub const TEXT_MIME_TYPE: &str = "text/plain";

/// Entry of `resources/templates/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    /// `ga://` template with `{variable}` segments
    pub uri_template: String,
    /// Short name
    pub name: String,
    /// What the resource contains
    pub description: String,
    /// Always `text/plain`
    pub mime_type: String,
}

/// Entry of `resources/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// Concrete `ga://` URI
    pub uri: String,
    /// Short name
    pub name: String,
    /// What the resource contains
    pub description: String,
    /// Always `text/plain`
    pub mime_type: String,
}

/// Body of a read resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    /// Concrete `ga://` URI
    pub uri: String,
    /// Always `text/plain`
    pub mime_type: String,
    /// Rendered body
    pub text: String,
}

/// Link to a related resource, e.g. a category or an audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Concrete `ga://` URI
    pub uri: String,
    /// Link label
    pub title: String,
}

/// Result of `resources/read`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResourceResult {
    /// Bodies, one per read URI
    pub contents: Vec<ResourceContents>,
    /// Related resources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ResourceLink>,
}

impl ReadResourceResult {
    /// Single plain-text body
    #[must_use]
    pub fn text(uri: &str, text: impl Into<String>) -> Self {
        Self {
            contents: vec![ResourceContents {
                uri: uri.to_owned(),
                mime_type: TEXT_MIME_TYPE.to_owned(),
                text: text.into(),
            }],
            links: Vec::new(),
        }
    }

    /// Attach navigation links
    #[must_use]
    pub fn with_links(mut self, links: Vec<ResourceLink>) -> Self {
        self.links = links;
        self
    }

    /// Text of the first body, empty when there is none
    #[must_use]
    pub fn first_text(&self) -> &str {
        self.contents
            .first()
            .map_or("", |contents| contents.text.as_str())
    }
}

/// Serves one `ga://` URI template
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// URI template, e.g. `ga://dimensions/{category}`
    fn uri_template(&self) -> &'static str;

    /// Short human-readable name
    fn name(&self) -> &'static str;

    /// What the resource contains
    fn description(&self) -> &'static str;

    /// Produce the resource for a matched URI
    async fn read(
        &self,
        uri: &str,
        params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult;
}

struct RegisteredResource {
    template: UriTemplate,
    handler: Arc<dyn ResourceHandler>,
}

/// Registry resolving `ga://` URIs to handlers in registration order
#[derive(Default)]
pub struct ResourceRegistry {
    entries: Vec<RegisteredResource>,
}

impl ResourceRegistry {
    /// Empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry holding every built-in resource
    #[must_use]
    pub fn with_builtin_resources() -> Self {
        let mut registry = Self::new();
        for handler in handlers::create_builtin_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler; earlier registrations win on overlapping templates
    pub fn register(&mut self, handler: Arc<dyn ResourceHandler>) {
        let template = UriTemplate::parse(handler.uri_template());
        debug!(template = template.as_str(), "Registered resource");
        self.entries.push(RegisteredResource { template, handler });
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resources with a fixed URI
    #[must_use]
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.entries
            .iter()
            .filter(|entry| entry.template.is_fixed())
            .map(|entry| ResourceDescriptor {
                uri: entry.template.as_str().to_owned(),
                name: entry.handler.name().to_owned(),
                description: entry.handler.description().to_owned(),
                mime_type: TEXT_MIME_TYPE.to_owned(),
            })
            .collect()
    }

    /// Resources addressed through template variables
    #[must_use]
    pub fn list_templates(&self) -> Vec<ResourceTemplate> {
        self.entries
            .iter()
            .filter(|entry| !entry.template.is_fixed())
            .map(|entry| ResourceTemplate {
                uri_template: entry.template.as_str().to_owned(),
                name: entry.handler.name().to_owned(),
                description: entry.handler.description().to_owned(),
                mime_type: TEXT_MIME_TYPE.to_owned(),
            })
            .collect()
    }

    /// Find the handler serving `uri` together with its captured variables
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<(Arc<dyn ResourceHandler>, UriParams)> {
        self.entries.iter().find_map(|entry| {
            entry
                .template
                .matches(uri)
                .map(|params| (Arc::clone(&entry.handler), params))
        })
    }

    /// Read a resource
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no template matches the URI
    pub async fn read(
        &self,
        uri: &str,
        resources: &ServerResources,
    ) -> AppResult<ReadResourceResult> {
        let (handler, params) = self
            .resolve(uri)
            .ok_or_else(|| AppError::not_found(format!("Resource {uri}")))?;
        debug!(uri, handler = handler.name(), "Reading resource");
        Ok(handler.read(uri, &params, resources).await)
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field(
                "templates",
                &self
                    .entries
                    .iter()
                    .map(|entry| entry.template.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
