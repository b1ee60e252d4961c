// ABOUTME: Dimension and metric catalog records returned by the Data API getMetadata call
// ABOUTME: Defines the CatalogEntry trait shared by dimensions and metrics for grouping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::defaults::UNCATEGORIZED;

/// Which half of the catalog an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Categorical field
    Dimension,
    /// Numeric field
    Metric,
}

impl FieldKind {
    /// Singular label, e.g. `dimension`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::Metric => "metric",
        }
    }

    /// Plural label, e.g. `dimensions`
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Dimension => "dimensions",
            Self::Metric => "metrics",
        }
    }

    /// Capitalised plural label, e.g. `Dimensions`
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dimension => "Dimensions",
            Self::Metric => "Metrics",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full dimension and metric catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Resource name, e.g. `properties/0/metadata`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// All dimensions
    #[serde(default)]
    pub dimensions: Vec<DimensionMetadata>,
    /// All metrics
    #[serde(default)]
    pub metrics: Vec<MetricMetadata>,
}

/// Catalog entry for a dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DimensionMetadata {
    /// Name used in requests
    pub api_name: String,
    /// Name shown in the GA user interface
    #[serde(default)]
    pub ui_name: String,
    /// Human description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Older names still accepted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deprecated_api_names: Vec<String>,
    /// Custom dimension defined on the property
    #[serde(default)]
    pub custom_definition: bool,
    /// UI category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Catalog entry for a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricMetadata {
    /// Name used in requests
    pub api_name: String,
    /// Name shown in the GA user interface
    #[serde(default)]
    pub ui_name: String,
    /// Human description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Older names still accepted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deprecated_api_names: Vec<String>,
    /// Value type, e.g. `TYPE_INTEGER`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    /// Formula for calculated metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Custom metric defined on the property
    #[serde(default)]
    pub custom_definition: bool,
    /// UI category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Behaviour shared by dimension and metric catalog entries
pub trait CatalogEntry {
    /// Name used in requests
    fn api_name(&self) -> &str;

    /// Name shown in the GA user interface
    fn ui_name(&self) -> &str;

    /// Upstream category, if any
    fn category(&self) -> Option<&str>;

    /// Older names still accepted
    fn deprecated_api_names(&self) -> &[String];

    /// Category with the `Uncategorized` sentinel substituted
    fn resolved_category(&self) -> &str {
        self.category()
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }

    /// Whether the entry answers to `name`, directly or through a deprecated alias
    fn answers_to(&self, name: &str) -> bool {
        self.api_name() == name || self.deprecated_api_names().iter().any(|alias| alias == name)
    }
}

impl CatalogEntry for DimensionMetadata {
    fn api_name(&self) -> &str {
        &self.api_name
    }

    fn ui_name(&self) -> &str {
        &self.ui_name
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn deprecated_api_names(&self) -> &[String] {
        &self.deprecated_api_names
    }
}

impl CatalogEntry for MetricMetadata {
    fn api_name(&self) -> &str {
        &self.api_name
    }

    fn ui_name(&self) -> &str {
        &self.ui_name
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn deprecated_api_names(&self) -> &[String] {
        &self.deprecated_api_names
    }
}
