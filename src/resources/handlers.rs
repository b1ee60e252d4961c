// ABOUTME: Built-in ga:// resource handlers for properties, reports, catalog and audiences
// ABOUTME: Each handler renders upstream data as text and turns failures into error text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Resource Handlers
//!
//! | URI | Content |
//! |-----|---------|
//! | `ga://property/{propertyId}` | property details |
//! | `ga://report/{propertyId}/{reportType}/{dimensions}/{metrics}/{startDate}/{endDate}` | report table |
//! | `ga://metadata` | catalog summary |
//! | `ga://dimensions`, `ga://metrics` | category lists with links |
//! | `ga://dimensions/{category}`, `ga://metrics/{category}` | one category |
//! | `ga://audiences/{propertyId}` | audience list with links |
//! | `ga://audiences/{propertyId}/{audienceId}` | audience details |
//!
//! An empty `{propertyId}` segment falls back to the configured default.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use super::{ReadResourceResult, ResourceHandler, ResourceLink, UriParams};
use crate::analytics::{
    decode_category, filter_by_category, group_by_category, ListAudiencesQuery, PivotReportQuery,
    ReportQuery,
};
use crate::constants::defaults::{REPORT_END_DATE, REPORT_START_DATE};
use crate::errors::{AppError, AppResult};
use crate::formatters::{
    format_audience_detail, format_audience_list, format_category_list, format_dimension_category,
    format_metadata, format_metric_category, format_pivot_report, format_property, format_report,
};
use crate::mcp::resources::ServerResources;
use crate::models::metadata::FieldKind;
use crate::models::reports::{DateRange, Dimension, Metric};

/// `reportType` segment selecting a pivot report
pub const PIVOT_REPORT_TYPE: &str = "pivot";

/// Render a failure the same way tools do and log it
fn failure_text(uri: &str, context: &str, error: &AppError) -> String {
    if error.code.is_validation() {
        warn!(uri, error = %error, "Resource request failed validation");
        format!("Error: {}", error.message)
    } else {
        error!(uri, error = %error, upstream_status = ?error.upstream_status, "{context}");
        format!("{context}: {}", error.message)
    }
}

fn render(uri: &str, context: &str, outcome: AppResult<String>) -> ReadResourceResult {
    let text = outcome.unwrap_or_else(|e| failure_text(uri, context, &e));
    ReadResourceResult::text(uri, text)
}

fn render_with_links(
    uri: &str,
    context: &str,
    outcome: AppResult<(String, Vec<ResourceLink>)>,
) -> ReadResourceResult {
    match outcome {
        Ok((text, links)) => ReadResourceResult::text(uri, text).with_links(links),
        Err(e) => ReadResourceResult::text(uri, failure_text(uri, context, &e)),
    }
}

/// Split a comma-separated segment, dropping empty names
fn split_names(segment: &str) -> impl Iterator<Item = &str> {
    segment
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

// ============================================================================
// Property
// ============================================================================

/// `ga://property/{propertyId}`
pub struct PropertyResource;

#[async_trait]
impl ResourceHandler for PropertyResource {
    fn uri_template(&self) -> &'static str {
        "ga://property/{propertyId}"
    }

    fn name(&self) -> &'static str {
        "property"
    }

    fn description(&self) -> &'static str {
        "Google Analytics property details"
    }

    async fn read(
        &self,
        uri: &str,
        params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let outcome: AppResult<String> = async {
            let property = resources
                .reports
                .resolve_property(params.non_empty("propertyId"))?;
            let api = resources.credentials.get_client().await?;
            let details = api.get_property(&property).await?;
            Ok(format_property(&details))
        }
        .await;
        render(uri, "Error fetching property", outcome)
    }
}

// ============================================================================
// Report
// ============================================================================

/// `ga://report/{propertyId}/{reportType}/{dimensions}/{metrics}/{startDate}/{endDate}`
pub struct ReportResource;

impl ReportResource {
    fn query(params: &UriParams) -> ReportQuery {
        ReportQuery {
            property_id: params.non_empty("propertyId").map(str::to_owned),
            date_ranges: vec![DateRange {
                start_date: params
                    .non_empty("startDate")
                    .unwrap_or(REPORT_START_DATE)
                    .to_owned(),
                end_date: params
                    .non_empty("endDate")
                    .unwrap_or(REPORT_END_DATE)
                    .to_owned(),
                name: None,
            }],
            dimensions: split_names(params.get("dimensions"))
                .map(Dimension::named)
                .collect(),
            metrics: split_names(params.get("metrics"))
                .map(Metric::named)
                .collect(),
            ..ReportQuery::default()
        }
    }
}

#[async_trait]
impl ResourceHandler for ReportResource {
    fn uri_template(&self) -> &'static str {
        "ga://report/{propertyId}/{reportType}/{dimensions}/{metrics}/{startDate}/{endDate}"
    }

    fn name(&self) -> &'static str {
        "report"
    }

    fn description(&self) -> &'static str {
        "Report with comma-separated dimensions and metrics; reportType 'pivot' pivots on the first dimension"
    }

    async fn read(
        &self,
        uri: &str,
        params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let query = Self::query(params);
        let credentials = resources.credentials.as_ref();
        let outcome = if params.get("reportType") == PIVOT_REPORT_TYPE {
            resources
                .reports
                .run_pivot_report(
                    credentials,
                    PivotReportQuery {
                        report: query,
                        pivots: Vec::new(),
                    },
                )
                .await
                .map(|report| format_pivot_report(&report))
        } else {
            resources
                .reports
                .run_report(credentials, query)
                .await
                .map(|report| format_report(&report))
        };
        render(uri, "Error generating report", outcome)
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// `ga://metadata`
pub struct MetadataResource;

#[async_trait]
impl ResourceHandler for MetadataResource {
    fn uri_template(&self) -> &'static str {
        "ga://metadata"
    }

    fn name(&self) -> &'static str {
        "metadata"
    }

    fn description(&self) -> &'static str {
        "Summary of the available dimensions and metrics"
    }

    async fn read(
        &self,
        uri: &str,
        _params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let outcome = resources
            .metadata
            .get_catalog(resources.credentials.as_ref(), None)
            .await
            .map(|catalog| format_metadata(&catalog));
        render(uri, "Error fetching metadata", outcome)
    }
}

// ============================================================================
// Category lists
// ============================================================================

/// `ga://dimensions` and `ga://metrics`
pub struct CategoryListResource {
    kind: FieldKind,
}

impl CategoryListResource {
    /// Handler listing the categories of one field kind
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl ResourceHandler for CategoryListResource {
    fn uri_template(&self) -> &'static str {
        match self.kind {
            FieldKind::Dimension => "ga://dimensions",
            FieldKind::Metric => "ga://metrics",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            FieldKind::Dimension => "dimensions",
            FieldKind::Metric => "metrics",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            FieldKind::Dimension => "Dimension categories, each linking to its dimensions",
            FieldKind::Metric => "Metric categories, each linking to its metrics",
        }
    }

    async fn read(
        &self,
        uri: &str,
        _params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let kind = self.kind;
        let outcome = resources
            .metadata
            .get_catalog(resources.credentials.as_ref(), None)
            .await
            .map(|catalog| {
                let categories: Vec<&str> = match kind {
                    FieldKind::Dimension => {
                        group_by_category(&catalog.dimensions).into_keys().collect()
                    }
                    FieldKind::Metric => group_by_category(&catalog.metrics).into_keys().collect(),
                };
                let links = categories
                    .iter()
                    .map(|category| ResourceLink {
                        uri: format!("ga://{}/{}", kind.plural(), urlencoding::encode(category)),
                        title: (*category).to_owned(),
                    })
                    .collect();
                (format_category_list(kind, categories), links)
            });
        let context = format!("Error fetching {}", kind.plural());
        render_with_links(uri, &context, outcome)
    }
}

// ============================================================================
// Category detail
// ============================================================================

/// `ga://dimensions/{category}` and `ga://metrics/{category}`
pub struct CategoryDetailResource {
    kind: FieldKind,
}

impl CategoryDetailResource {
    /// Handler listing the entries of one category
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl ResourceHandler for CategoryDetailResource {
    fn uri_template(&self) -> &'static str {
        match self.kind {
            FieldKind::Dimension => "ga://dimensions/{category}",
            FieldKind::Metric => "ga://metrics/{category}",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            FieldKind::Dimension => "dimensions-by-category",
            FieldKind::Metric => "metrics-by-category",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            FieldKind::Dimension => "Dimensions in one category",
            FieldKind::Metric => "Metrics in one category",
        }
    }

    async fn read(
        &self,
        uri: &str,
        params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let kind = self.kind;
        let encoded = params.get("category");
        let category = decode_category(encoded);
        let outcome = resources
            .metadata
            .get_catalog(resources.credentials.as_ref(), None)
            .await
            .map(|catalog| match kind {
                FieldKind::Dimension => format_dimension_category(
                    &category,
                    &filter_by_category(&catalog.dimensions, encoded),
                ),
                FieldKind::Metric => format_metric_category(
                    &category,
                    &filter_by_category(&catalog.metrics, encoded),
                ),
            });
        let context = format!("Error fetching {} by category", kind.plural());
        render(uri, &context, outcome)
    }
}

// ============================================================================
// Audiences
// ============================================================================

/// `ga://audiences/{propertyId}`
pub struct AudienceListResource;

#[async_trait]
impl ResourceHandler for AudienceListResource {
    fn uri_template(&self) -> &'static str {
        "ga://audiences/{propertyId}"
    }

    fn name(&self) -> &'static str {
        "audiences"
    }

    fn description(&self) -> &'static str {
        "Audiences of a property, each linking to its details"
    }

    async fn read(
        &self,
        uri: &str,
        params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let query = ListAudiencesQuery {
            property_id: params.non_empty("propertyId").map(str::to_owned),
            ..ListAudiencesQuery::default()
        };
        let outcome = resources
            .audiences
            .list(resources.credentials.as_ref(), query)
            .await
            .map(|(property, page)| {
                let links = page
                    .audiences
                    .iter()
                    .filter_map(|audience| {
                        let id = audience.audience_id()?;
                        Some(ResourceLink {
                            uri: format!("ga://audiences/{}/{id}", property.short_id()),
                            title: audience
                                .display_name
                                .clone()
                                .unwrap_or_else(|| id.to_owned()),
                        })
                    })
                    .collect();
                (format_audience_list(&property, &page.audiences), links)
            });
        render_with_links(uri, "Error fetching audiences", outcome)
    }
}

/// `ga://audiences/{propertyId}/{audienceId}`
pub struct AudienceDetailResource;

#[async_trait]
impl ResourceHandler for AudienceDetailResource {
    fn uri_template(&self) -> &'static str {
        "ga://audiences/{propertyId}/{audienceId}"
    }

    fn name(&self) -> &'static str {
        "audience"
    }

    fn description(&self) -> &'static str {
        "Details of one audience"
    }

    async fn read(
        &self,
        uri: &str,
        params: &UriParams,
        resources: &ServerResources,
    ) -> ReadResourceResult {
        let outcome: AppResult<String> = async {
            let property = resources
                .audiences
                .resolve_property(params.non_empty("propertyId"))?;
            let name = format!("{property}/audiences/{}", params.get("audienceId"));
            let audience = resources
                .audiences
                .get(resources.credentials.as_ref(), &name)
                .await?;
            format_audience_detail(&audience)
        }
        .await;
        render(uri, "Error fetching audience", outcome)
    }
}

/// Every built-in handler in registration order
#[must_use]
pub fn create_builtin_handlers() -> Vec<Arc<dyn ResourceHandler>> {
    vec![
        Arc::new(PropertyResource),
        Arc::new(ReportResource),
        Arc::new(MetadataResource),
        Arc::new(CategoryListResource::new(FieldKind::Dimension)),
        Arc::new(CategoryDetailResource::new(FieldKind::Dimension)),
        Arc::new(CategoryListResource::new(FieldKind::Metric)),
        Arc::new(CategoryDetailResource::new(FieldKind::Metric)),
        Arc::new(AudienceListResource),
        Arc::new(AudienceDetailResource),
    ]
}
