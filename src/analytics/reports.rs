// ABOUTME: Report translator mapping uniform report queries onto Data API request bodies
// ABOUTME: Validates property, date ranges and metrics locally and applies the pivot defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ServerConfig;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::google::CredentialProvider;
use crate::models::{
    BatchRunPivotReportsRequest, BatchRunPivotReportsResponse, BatchRunReportsRequest,
    BatchRunReportsResponse, DateRange, Dimension, FilterExpression, Metric, OrderBy, Pivot,
    PropertyId, RunPivotReportRequest, RunPivotReportResponse, RunReportRequest,
    RunReportResponse,
};

// ============================================================================
// Uniform queries (tool parameters)
// ============================================================================

/// Uniform report parameters shared by every report variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Property to query; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// Date ranges, at least one
    #[serde(default)]
    pub date_ranges: Vec<DateRange>,
    /// Dimensions, may be empty
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    /// Metrics, at least one
    #[serde(default)]
    pub metrics: Vec<Metric>,
    /// Rows to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Rows to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Row ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_bys: Option<Vec<OrderBy>>,
    /// Dimension filter tree, forwarded unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    /// Metric filter tree, forwarded unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<FilterExpression>,
    /// Keep rows whose metrics are all zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_empty_rows: Option<bool>,
}

/// Pivot report parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotReportQuery {
    /// Common report parameters
    #[serde(flatten)]
    pub report: ReportQuery,
    /// Pivot specifications
    #[serde(default)]
    pub pivots: Vec<Pivot>,
}

/// Batch report parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportQuery {
    /// Property shared by every sub-request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// Sub-requests, at least one
    #[serde(default)]
    pub requests: Vec<ReportQuery>,
}

/// Batch pivot report parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPivotReportQuery {
    /// Property shared by every sub-request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// Sub-requests, at least one
    #[serde(default)]
    pub requests: Vec<PivotReportQuery>,
}

/// An upstream request body bound to the property it targets
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRequest<T> {
    /// Target property
    pub property: PropertyId,
    /// Request body
    pub request: T,
}

// ============================================================================
// Translator
// ============================================================================

/// Maps uniform report queries onto the four upstream report shapes
#[derive(Debug, Clone)]
pub struct ReportTranslator {
    default_property: Option<PropertyId>,
    pivot_limit: i64,
}

impl ReportTranslator {
    /// Create a translator with an optional default property and pivot row limit
    #[must_use]
    pub const fn new(default_property: Option<PropertyId>, pivot_limit: i64) -> Self {
        Self {
            default_property,
            pivot_limit,
        }
    }

    /// Create a translator from server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.default_property_id.clone(),
            config.reports.pivot_limit,
        )
    }

    /// Configured pivot row limit
    #[must_use]
    pub const fn pivot_limit(&self) -> i64 {
        self.pivot_limit
    }

    /// Resolve an explicit property, falling back to the configured default
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when neither is available
    pub fn resolve_property(&self, explicit: Option<&str>) -> AppResult<PropertyId> {
        resolve_property(explicit, self.default_property.as_ref())
    }

    /// Build a `runReport` request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the property, date ranges or metrics are missing
    pub fn prepare_report(&self, query: ReportQuery) -> AppResult<PropertyRequest<RunReportRequest>> {
        let property = self.resolve_property(query.property_id.as_deref())?;
        Ok(PropertyRequest {
            property,
            request: build_report(query)?,
        })
    }

    /// Build a `batchRunReports` request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the property is missing, there are no
    /// sub-requests, or any sub-request fails validation
    pub fn prepare_batch(
        &self,
        query: BatchReportQuery,
    ) -> AppResult<PropertyRequest<BatchRunReportsRequest>> {
        let property = self.resolve_property(query.property_id.as_deref())?;
        if query.requests.is_empty() {
            return Err(AppError::invalid_input(messages::NO_REQUESTS));
        }

        let requests = query
            .requests
            .into_iter()
            .enumerate()
            .map(|(index, sub)| build_report(sub).map_err(|e| numbered(index, e)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PropertyRequest {
            property,
            request: BatchRunReportsRequest { requests },
        })
    }

    /// Build a `runPivotReport` request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the property, date ranges, metrics or
    /// pivots are missing
    pub fn prepare_pivot(
        &self,
        query: PivotReportQuery,
    ) -> AppResult<PropertyRequest<RunPivotReportRequest>> {
        let property = self.resolve_property(query.report.property_id.as_deref())?;
        Ok(PropertyRequest {
            property,
            request: self.build_pivot(query)?,
        })
    }

    /// Build a `batchRunPivotReports` request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the property is missing, there are no
    /// sub-requests, or any sub-request fails validation
    pub fn prepare_batch_pivot(
        &self,
        query: BatchPivotReportQuery,
    ) -> AppResult<PropertyRequest<BatchRunPivotReportsRequest>> {
        let property = self.resolve_property(query.property_id.as_deref())?;
        if query.requests.is_empty() {
            return Err(AppError::invalid_input(messages::NO_REQUESTS));
        }

        let requests = query
            .requests
            .into_iter()
            .enumerate()
            .map(|(index, sub)| self.build_pivot(sub).map_err(|e| numbered(index, e)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PropertyRequest {
            property,
            request: BatchRunPivotReportsRequest { requests },
        })
    }

    /// Validate, authenticate and run a single report
    ///
    /// # Errors
    ///
    /// Validation errors are raised before credentials are requested; auth
    /// and upstream failures are propagated unchanged
    pub async fn run_report(
        &self,
        credentials: &dyn CredentialProvider,
        query: ReportQuery,
    ) -> AppResult<RunReportResponse> {
        let prepared = self.prepare_report(query)?;
        debug!(property = %prepared.property, "Running report");
        let api = credentials.get_client().await?;
        api.run_report(&prepared.property, &prepared.request).await
    }

    /// Validate, authenticate and run a batch of reports
    ///
    /// # Errors
    ///
    /// See [`Self::run_report`]
    pub async fn run_batch_reports(
        &self,
        credentials: &dyn CredentialProvider,
        query: BatchReportQuery,
    ) -> AppResult<BatchRunReportsResponse> {
        let prepared = self.prepare_batch(query)?;
        debug!(
            property = %prepared.property,
            requests = prepared.request.requests.len(),
            "Running batch reports"
        );
        let api = credentials.get_client().await?;
        api.batch_run_reports(&prepared.property, &prepared.request)
            .await
    }

    /// Validate, authenticate and run a pivot report
    ///
    /// # Errors
    ///
    /// See [`Self::run_report`]
    pub async fn run_pivot_report(
        &self,
        credentials: &dyn CredentialProvider,
        query: PivotReportQuery,
    ) -> AppResult<RunPivotReportResponse> {
        let prepared = self.prepare_pivot(query)?;
        debug!(property = %prepared.property, "Running pivot report");
        let api = credentials.get_client().await?;
        api.run_pivot_report(&prepared.property, &prepared.request)
            .await
    }

    /// Validate, authenticate and run a batch of pivot reports
    ///
    /// # Errors
    ///
    /// See [`Self::run_report`]
    pub async fn run_batch_pivot_reports(
        &self,
        credentials: &dyn CredentialProvider,
        query: BatchPivotReportQuery,
    ) -> AppResult<BatchRunPivotReportsResponse> {
        let prepared = self.prepare_batch_pivot(query)?;
        debug!(
            property = %prepared.property,
            requests = prepared.request.requests.len(),
            "Running batch pivot reports"
        );
        let api = credentials.get_client().await?;
        api.batch_run_pivot_reports(&prepared.property, &prepared.request)
            .await
    }

    fn build_pivot(&self, query: PivotReportQuery) -> AppResult<RunPivotReportRequest> {
        let PivotReportQuery { report, pivots } = query;
        let base = build_report(report)?;
        let pivots = self.resolve_pivots(pivots, &base)?;

        Ok(RunPivotReportRequest {
            date_ranges: base.date_ranges,
            dimensions: base.dimensions,
            metrics: base.metrics,
            pivots,
            dimension_filter: base.dimension_filter,
            metric_filter: base.metric_filter,
            keep_empty_rows: base.keep_empty_rows,
        })
    }

    /// Apply the pivot defaults.
    ///
    /// Empty `fieldNames` pivot on the first dimension. Missing `limit`,
    /// `offset` and `orderBys` take the report-level values, and the limit
    /// finally falls back to the configured pivot limit. With no pivots at
    /// all a single pivot on the first dimension is synthesised.
    fn resolve_pivots(&self, pivots: Vec<Pivot>, base: &RunReportRequest) -> AppResult<Vec<Pivot>> {
        let first_dimension = base.dimensions.first().map(|d| d.name.clone());

        let pivots = if pivots.is_empty() {
            vec![Pivot::default()]
        } else {
            pivots
        };

        pivots
            .into_iter()
            .map(|mut pivot| {
                if pivot.field_names.is_empty() {
                    let name = first_dimension
                        .clone()
                        .ok_or_else(|| AppError::invalid_input(messages::NO_PIVOTS))?;
                    pivot.field_names.push(name);
                }
                if pivot.limit.is_none() {
                    pivot.limit = Some(base.limit.unwrap_or(self.pivot_limit));
                }
                if pivot.offset.is_none() {
                    pivot.offset = base.offset;
                }
                if pivot.order_bys.is_none() {
                    pivot.order_bys.clone_from(&base.order_bys);
                }
                Ok(pivot)
            })
            .collect()
    }
}

/// Resolve an explicit property id against an optional default
///
/// # Errors
///
/// Returns `InvalidInput` with the standard message when neither is available
pub fn resolve_property(
    explicit: Option<&str>,
    default: Option<&PropertyId>,
) -> AppResult<PropertyId> {
    explicit
        .and_then(PropertyId::parse)
        .or_else(|| default.cloned())
        .ok_or_else(|| AppError::invalid_input(messages::NO_PROPERTY_ID))
}

fn build_report(query: ReportQuery) -> AppResult<RunReportRequest> {
    if query.date_ranges.is_empty() {
        return Err(AppError::invalid_input(messages::NO_DATE_RANGES));
    }
    if query.metrics.is_empty() {
        return Err(AppError::invalid_input(messages::NO_METRICS));
    }

    Ok(RunReportRequest {
        date_ranges: query.date_ranges,
        dimensions: query.dimensions,
        metrics: query.metrics,
        dimension_filter: query.dimension_filter,
        metric_filter: query.metric_filter,
        offset: query.offset,
        limit: query.limit,
        order_bys: query.order_bys,
        keep_empty_rows: query.keep_empty_rows,
    })
}

fn numbered(index: usize, error: AppError) -> AppError {
    AppError::new(error.code, format!("Request #{}: {}", index + 1, error.message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange {
            start_date: "2024-01-01".into(),
            end_date: "2024-01-07".into(),
            name: None,
        }
    }

    fn query(dimensions: &[&str], metrics: &[&str]) -> ReportQuery {
        ReportQuery {
            date_ranges: vec![range()],
            dimensions: dimensions.iter().map(|d| Dimension::named(*d)).collect(),
            metrics: metrics.iter().map(|m| Metric::named(*m)).collect(),
            ..ReportQuery::default()
        }
    }

    #[test]
    fn test_explicit_property_beats_default() {
        let translator = ReportTranslator::new(PropertyId::parse("1"), 10);
        let prepared = translator
            .prepare_report(ReportQuery {
                property_id: Some("properties/2".into()),
                ..query(&[], &["activeUsers"])
            })
            .unwrap();
        assert_eq!(prepared.property.as_str(), "properties/2");
    }

    #[test]
    fn test_missing_property_is_reported_first() {
        let translator = ReportTranslator::new(None, 10);
        let err = translator
            .prepare_report(ReportQuery::default())
            .unwrap_err();
        assert_eq!(err.message, messages::NO_PROPERTY_ID);
        assert!(err.code.is_validation());
    }

    #[test]
    fn test_batch_errors_name_the_sub_request() {
        let translator = ReportTranslator::new(PropertyId::parse("1"), 10);
        let err = translator
            .prepare_batch(BatchReportQuery {
                property_id: None,
                requests: vec![query(&[], &["sessions"]), query(&["country"], &[])],
            })
            .unwrap_err();
        assert_eq!(
            err.message,
            "Request #2: At least one metric must be specified"
        );
    }

    #[test]
    fn test_pivot_fallbacks_use_report_level_values() {
        let translator = ReportTranslator::new(PropertyId::parse("1"), 10);
        let prepared = translator
            .prepare_pivot(PivotReportQuery {
                report: ReportQuery {
                    limit: Some(25),
                    offset: Some(5),
                    ..query(&["country", "city"], &["sessions"])
                },
                pivots: vec![Pivot::default()],
            })
            .unwrap();

        let pivot = &prepared.request.pivots[0];
        assert_eq!(pivot.field_names, vec!["country".to_owned()]);
        assert_eq!(pivot.limit, Some(25));
        assert_eq!(pivot.offset, Some(5));
    }
}
