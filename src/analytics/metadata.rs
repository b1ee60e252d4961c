// ABOUTME: Metadata lookup: fetches the catalog, groups it by category and checks field compatibility
// ABOUTME: Grouping uses a BTreeMap so category order is deterministic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::defaults;
use crate::errors::AppResult;
use crate::google::CredentialProvider;
use crate::models::{CatalogEntry, FieldKind, Metadata};

/// Whether a requested field exists in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityStatus {
    /// Present in the catalog
    Compatible,
    /// Absent from the catalog
    Incompatible,
}

impl CompatibilityStatus {
    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compatible => "COMPATIBLE",
            Self::Incompatible => "INCOMPATIBLE",
        }
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one requested field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityResult {
    /// Dimension or metric
    pub kind: FieldKind,
    /// Requested name
    pub name: String,
    /// Present or absent
    pub status: CompatibilityStatus,
    /// One human-readable line
    pub message: String,
}

impl CompatibilityResult {
    fn new(kind: FieldKind, name: &str, found: bool) -> Self {
        let status = if found {
            CompatibilityStatus::Compatible
        } else {
            CompatibilityStatus::Incompatible
        };
        let label = match kind {
            FieldKind::Dimension => "Dimension",
            FieldKind::Metric => "Metric",
        };
        let message = if found {
            format!("{label} '{name}': {status}")
        } else {
            format!("{label} '{name}': {status} (not found in the metadata catalog)")
        };
        Self {
            kind,
            name: name.to_owned(),
            status,
            message,
        }
    }
}

/// Fetches the dimension and metric catalog on demand
#[derive(Debug, Clone)]
pub struct MetadataLookup {
    catalog_name: String,
}

impl Default for MetadataLookup {
    fn default() -> Self {
        Self::new(defaults::METADATA_NAME)
    }
}

impl MetadataLookup {
    /// Create a lookup with the catalog used when callers do not name one
    #[must_use]
    pub fn new(catalog_name: impl Into<String>) -> Self {
        Self {
            catalog_name: catalog_name.into(),
        }
    }

    /// Default catalog resource name
    #[must_use]
    pub fn catalog_name(&self) -> &str {
        &self.catalog_name
    }

    /// Fetch the full catalog; never cached
    ///
    /// # Errors
    ///
    /// Propagates credential and upstream failures
    pub async fn get_catalog(
        &self,
        credentials: &dyn CredentialProvider,
        name: Option<&str>,
    ) -> AppResult<Metadata> {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.catalog_name);
        debug!(catalog = name, "Fetching metadata catalog");
        let api = credentials.get_client().await?;
        api.get_metadata(name).await
    }
}

/// Partition entries by resolved category; keys sort lexicographically and
/// each bucket keeps catalog order
#[must_use]
pub fn group_by_category<E: CatalogEntry>(entries: &[E]) -> BTreeMap<&str, Vec<&E>> {
    entries.iter().fold(BTreeMap::new(), |mut groups, entry| {
        groups
            .entry(entry.resolved_category())
            .or_insert_with(Vec::new)
            .push(entry);
        groups
    })
}

/// Percent-decode a category taken from a URI, keeping the raw text when it
/// is not valid UTF-8 after decoding
#[must_use]
pub fn decode_category(encoded: &str) -> String {
    urlencoding::decode(encoded).map_or_else(|_| encoded.to_owned(), |decoded| decoded.into_owned())
}

/// Entries whose resolved category equals the decoded category; empty when
/// nothing matches
#[must_use]
pub fn filter_by_category<'a, E: CatalogEntry>(entries: &'a [E], encoded: &str) -> Vec<&'a E> {
    let category = decode_category(encoded);
    entries
        .iter()
        .filter(|entry| entry.resolved_category() == category)
        .collect()
}

/// One result per requested name, dimensions first; `filter` keeps only
/// results with the given status
#[must_use]
pub fn check_compatibility(
    catalog: &Metadata,
    dimensions: &[String],
    metrics: &[String],
    filter: Option<CompatibilityStatus>,
) -> Vec<CompatibilityResult> {
    let dimension_results = dimensions.iter().map(|name| {
        let found = catalog.dimensions.iter().any(|entry| entry.answers_to(name));
        CompatibilityResult::new(FieldKind::Dimension, name, found)
    });
    let metric_results = metrics.iter().map(|name| {
        let found = catalog.metrics.iter().any(|entry| entry.answers_to(name));
        CompatibilityResult::new(FieldKind::Metric, name, found)
    });

    dimension_results
        .chain(metric_results)
        .filter(|result| filter.is_none_or(|status| result.status == status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DimensionMetadata, MetricMetadata};

    fn dimension(api_name: &str, category: Option<&str>) -> DimensionMetadata {
        DimensionMetadata {
            api_name: api_name.to_owned(),
            ui_name: api_name.to_owned(),
            category: category.map(str::to_owned),
            ..DimensionMetadata::default()
        }
    }

    #[test]
    fn test_grouping_is_sorted_and_total() {
        let entries = vec![
            dimension("city", Some("Geography")),
            dimension("browser", Some("Platform / device")),
            dimension("customEvent:foo", None),
            dimension("country", Some("Geography")),
        ];
        let groups = group_by_category(&entries);

        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["Geography", "Platform / device", "Uncategorized"]);
        let geography: Vec<&str> = groups["Geography"].iter().map(|e| e.api_name()).collect();
        assert_eq!(geography, vec!["city", "country"]);
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), entries.len());
    }

    #[test]
    fn test_filter_decodes_category() {
        let entries = vec![
            dimension("browser", Some("Platform / device")),
            dimension("city", Some("Geography")),
        ];
        let matched = filter_by_category(&entries, "Platform%20%2F%20device");
        assert_eq!(matched.len(), 1);
        assert!(filter_by_category(&entries, "Nope").is_empty());
    }

    #[test]
    fn test_compatibility_one_result_per_name() {
        let catalog = Metadata {
            name: None,
            dimensions: vec![dimension("country", Some("Geography"))],
            metrics: vec![MetricMetadata {
                api_name: "activeUsers".into(),
                deprecated_api_names: vec!["active1DayUsers".into()],
                ..MetricMetadata::default()
            }],
        };

        let results = check_compatibility(
            &catalog,
            &["country".into()],
            &["nonexistentMetric".into(), "active1DayUsers".into()],
            None,
        );
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, CompatibilityStatus::Compatible);
        assert_eq!(results[1].status, CompatibilityStatus::Incompatible);
        assert_eq!(results[2].status, CompatibilityStatus::Compatible);

        let only_bad = check_compatibility(
            &catalog,
            &["country".into()],
            &["nonexistentMetric".into()],
            Some(CompatibilityStatus::Incompatible),
        );
        assert_eq!(only_bad.len(), 1);
        assert_eq!(only_bad[0].name, "nonexistentMetric");
    }
}
