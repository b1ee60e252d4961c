// ABOUTME: Text renderers for the metadata catalog, category listings and compatibility results
// ABOUTME: Category output is sorted and deduplicated through ordered collections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::analytics::CompatibilityResult;
use crate::constants::limits::METADATA_SAMPLE_SIZE;
use crate::models::{CatalogEntry, DimensionMetadata, FieldKind, Metadata, MetricMetadata};

/// Sentinel for an empty catalog
pub const NO_METADATA: &str = "No metadata available.";
/// Sentinel for an empty compatibility check
pub const NO_COMPATIBILITY_RESULTS: &str = "No compatibility results available.";

fn categories<'a, E: CatalogEntry + 'a>(entries: impl IntoIterator<Item = &'a E>) -> BTreeSet<&'a str> {
    entries
        .into_iter()
        .filter_map(CatalogEntry::category)
        .filter(|category| !category.is_empty())
        .collect()
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Summarise the catalog: sorted categories, totals and the first few
/// dimensions and metrics
#[must_use]
pub fn format_metadata(metadata: &Metadata) -> String {
    if metadata.dimensions.is_empty() && metadata.metrics.is_empty() {
        return NO_METADATA.to_owned();
    }

    let mut out = String::from("Google Analytics Data API Metadata\n\n");

    out.push_str("Dimension Categories:\n");
    for category in categories(&metadata.dimensions) {
        let _ = writeln!(out, "- {category}");
    }

    out.push_str("\nMetric Categories:\n");
    for category in categories(&metadata.metrics) {
        let _ = writeln!(out, "- {category}");
    }

    let _ = write!(
        out,
        "\nTotal Dimensions: {}\nTotal Metrics: {}",
        metadata.dimensions.len(),
        metadata.metrics.len()
    );

    let _ = writeln!(out, "\n\nSample Dimensions (first {METADATA_SAMPLE_SIZE}):");
    for dimension in metadata.dimensions.iter().take(METADATA_SAMPLE_SIZE) {
        let _ = writeln!(out, "- {}: {}", dimension.api_name, dimension.ui_name);
        let _ = writeln!(out, "  Category: {}", dimension.resolved_category());
        if let Some(description) = &dimension.description {
            let _ = writeln!(out, "  Description: {description}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Sample Metrics (first {METADATA_SAMPLE_SIZE}):");
    for metric in metadata.metrics.iter().take(METADATA_SAMPLE_SIZE) {
        let _ = writeln!(out, "- {}: {}", metric.api_name, metric.ui_name);
        let _ = writeln!(out, "  Category: {}", metric.resolved_category());
        let _ = writeln!(
            out,
            "  Type: {}",
            metric.metric_type.as_deref().unwrap_or("Unknown")
        );
        if let Some(description) = &metric.description {
            let _ = writeln!(out, "  Description: {description}");
        }
        out.push('\n');
    }

    out
}

/// One line per compatibility result
#[must_use]
pub fn format_compatibility(results: &[CompatibilityResult]) -> String {
    if results.is_empty() {
        return NO_COMPATIBILITY_RESULTS.to_owned();
    }
    results
        .iter()
        .map(|result| result.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// List the categories of one catalog half with a hint on how to drill in
#[must_use]
pub fn format_category_list<'a>(kind: FieldKind, categories: impl IntoIterator<Item = &'a str>) -> String {
    let label = match kind {
        FieldKind::Dimension => "Dimension",
        FieldKind::Metric => "Metric",
    };
    let listing = categories
        .into_iter()
        .map(|category| format!("- {category}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Google Analytics {label} Categories:\n\n{listing}\n\nAccess a specific category using: ga://{}/{{category}}",
        kind.plural()
    )
}

fn describe_dimension(dimension: &DimensionMetadata) -> String {
    format!(
        "- {}: {}\n  Description: {}\n  Custom: {}\n  Deprecated: {}",
        dimension.api_name,
        dimension.ui_name,
        dimension
            .description
            .as_deref()
            .unwrap_or("No description available"),
        yes_no(dimension.custom_definition),
        yes_no(!dimension.deprecated_api_names.is_empty()),
    )
}

fn describe_metric(metric: &MetricMetadata) -> String {
    format!(
        "- {}: {}\n  Description: {}\n  Type: {}\n  Expression: {}\n  Custom: {}\n  Deprecated: {}",
        metric.api_name,
        metric.ui_name,
        metric
            .description
            .as_deref()
            .unwrap_or("No description available"),
        metric.metric_type.as_deref().unwrap_or("Unknown"),
        metric.expression.as_deref().unwrap_or("N/A"),
        yes_no(metric.custom_definition),
        yes_no(!metric.deprecated_api_names.is_empty()),
    )
}

fn format_category_detail<E>(
    kind: FieldKind,
    category: &str,
    entries: &[&E],
    describe: fn(&E) -> String,
) -> String {
    if entries.is_empty() {
        return format!("No {} found in category: {category}", kind.plural());
    }
    let details = entries
        .iter()
        .map(|entry| describe(entry))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Google Analytics {} in category \"{category}\":\n\n{details}",
        kind.title()
    )
}

/// Describe every dimension in a category
#[must_use]
pub fn format_dimension_category(category: &str, entries: &[&DimensionMetadata]) -> String {
    format_category_detail(FieldKind::Dimension, category, entries, describe_dimension)
}

/// Describe every metric in a category
#[must_use]
pub fn format_metric_category(category: &str, entries: &[&MetricMetadata]) -> String {
    format_category_detail(FieldKind::Metric, category, entries, describe_metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_shape() {
        let text = format_category_list(FieldKind::Metric, ["Event", "User"]);
        assert_eq!(
            text,
            "Google Analytics Metric Categories:\n\n- Event\n- User\n\nAccess a specific category using: ga://metrics/{category}"
        );
    }

    #[test]
    fn test_empty_category_detail() {
        assert_eq!(
            format_dimension_category("Nope", &[]),
            "No dimensions found in category: Nope"
        );
    }
}
