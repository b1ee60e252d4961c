// ABOUTME: Shared test utilities for integration tests
// ABOUTME: In-memory AnalyticsApi fake, a counting credential provider and resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `analytics_mcp_server`
//!
//! Tests never touch the network: [`FakeAnalyticsApi`] answers every upstream
//! call from canned records and remembers what it was asked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use analytics_mcp_server::{
    config::ServerConfig,
    errors::{AppError, AppResult},
    google::{upstream_error, AnalyticsApi, CredentialProvider},
    mcp::ServerResources,
    models::{
        Audience, BatchRunPivotReportsRequest, BatchRunPivotReportsResponse,
        BatchRunReportsRequest, BatchRunReportsResponse, DimensionHeader, DimensionMetadata,
        DimensionValue, ListAudiencesResponse, Metadata, MetricHeader, MetricMetadata,
        MetricValue, PageRequest, Property, PropertyId, Row, RunPivotReportRequest,
        RunPivotReportResponse, RunReportRequest, RunReportResponse,
    },
    tools::ToolExecutionContext,
};
use async_trait::async_trait;
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// One upstream call as seen by the fake
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Trait method name, e.g. `run_report`
    pub method: &'static str,
    /// Property or resource name the call targeted
    pub target: String,
    /// Serialized request body, `Value::Null` for bodiless calls
    pub body: Value,
}

/// In-memory `AnalyticsApi`
#[derive(Debug, Default)]
pub struct FakeAnalyticsApi {
    pub report: RunReportResponse,
    pub pivot_report: RunPivotReportResponse,
    pub metadata: Metadata,
    pub property: Property,
    pub audiences: Vec<Audience>,
    pub next_page_token: Option<String>,
    /// When set, every call fails with this HTTP status and body
    pub failure: Option<(u16, String)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeAnalyticsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, report: RunReportResponse) -> Self {
        self.report = report;
        self
    }

    pub fn with_pivot_report(mut self, report: RunPivotReportResponse) -> Self {
        self.pivot_report = report;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.property = property;
        self
    }

    pub fn with_audiences(mut self, audiences: Vec<Audience>) -> Self {
        self.audiences = audiences;
        self
    }

    pub fn failing(mut self, status: u16, body: &str) -> Self {
        self.failure = Some((status, body.to_owned()));
        self
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent call
    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no upstream call was made")
    }

    fn record(&self, method: &'static str, target: &str, body: Value) -> AppResult<()> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            target: target.to_owned(),
            body,
        });
        match &self.failure {
            Some((status, body)) => Err(upstream_error(*status, body)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AnalyticsApi for FakeAnalyticsApi {
    async fn run_report(
        &self,
        property: &PropertyId,
        request: &RunReportRequest,
    ) -> AppResult<RunReportResponse> {
        self.record("run_report", property.as_str(), serde_json::to_value(request)?)?;
        Ok(self.report.clone())
    }

    async fn batch_run_reports(
        &self,
        property: &PropertyId,
        request: &BatchRunReportsRequest,
    ) -> AppResult<BatchRunReportsResponse> {
        self.record(
            "batch_run_reports",
            property.as_str(),
            serde_json::to_value(request)?,
        )?;
        Ok(BatchRunReportsResponse {
            reports: vec![self.report.clone(); request.requests.len()],
        })
    }

    async fn run_pivot_report(
        &self,
        property: &PropertyId,
        request: &RunPivotReportRequest,
    ) -> AppResult<RunPivotReportResponse> {
        self.record(
            "run_pivot_report",
            property.as_str(),
            serde_json::to_value(request)?,
        )?;
        Ok(self.pivot_report.clone())
    }

    async fn batch_run_pivot_reports(
        &self,
        property: &PropertyId,
        request: &BatchRunPivotReportsRequest,
    ) -> AppResult<BatchRunPivotReportsResponse> {
        self.record(
            "batch_run_pivot_reports",
            property.as_str(),
            serde_json::to_value(request)?,
        )?;
        Ok(BatchRunPivotReportsResponse {
            pivot_reports: vec![self.pivot_report.clone(); request.requests.len()],
        })
    }

    async fn get_metadata(&self, name: &str) -> AppResult<Metadata> {
        self.record("get_metadata", name, Value::Null)?;
        Ok(self.metadata.clone())
    }

    async fn get_property(&self, property: &PropertyId) -> AppResult<Property> {
        self.record("get_property", property.as_str(), Value::Null)?;
        Ok(self.property.clone())
    }

    async fn create_audience(
        &self,
        property: &PropertyId,
        audience: &Audience,
    ) -> AppResult<Audience> {
        self.record(
            "create_audience",
            property.as_str(),
            serde_json::to_value(audience)?,
        )?;
        Ok(Audience {
            name: Some(format!("{property}/audiences/1001")),
            ..audience.clone()
        })
    }

    async fn list_audiences(
        &self,
        property: &PropertyId,
        page: &PageRequest,
    ) -> AppResult<ListAudiencesResponse> {
        self.record(
            "list_audiences",
            property.as_str(),
            json!({ "pageSize": page.page_size, "pageToken": page.page_token }),
        )?;
        Ok(ListAudiencesResponse {
            audiences: self.audiences.clone(),
            next_page_token: self.next_page_token.clone(),
        })
    }

    async fn get_audience(&self, name: &str) -> AppResult<Audience> {
        self.record("get_audience", name, Value::Null)?;
        self.audiences
            .iter()
            .find(|audience| audience.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| upstream_error(404, r#"{"error":{"message":"Audience not found"}}"#))
    }

    async fn patch_audience(
        &self,
        name: &str,
        audience: &Audience,
        update_mask: &str,
    ) -> AppResult<Audience> {
        self.record(
            "patch_audience",
            name,
            json!({ "body": audience, "updateMask": update_mask }),
        )?;
        Ok(Audience {
            name: Some(name.to_owned()),
            ..audience.clone()
        })
    }

    async fn delete_audience(&self, name: &str) -> AppResult<()> {
        self.record("delete_audience", name, Value::Null)
    }
}

/// Credential provider handing out the fake and counting requests for it
pub struct FakeCredentials {
    api: Arc<FakeAnalyticsApi>,
    requests: AtomicUsize,
    refuse: bool,
}

impl FakeCredentials {
    pub fn new(api: Arc<FakeAnalyticsApi>) -> Self {
        Self {
            api,
            requests: AtomicUsize::new(0),
            refuse: false,
        }
    }

    /// Provider that fails like a rejected token exchange
    pub fn refusing(api: Arc<FakeAnalyticsApi>) -> Self {
        Self {
            refuse: true,
            ..Self::new(api)
        }
    }

    /// How many clients were requested
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn get_client(&self) -> AppResult<Arc<dyn AnalyticsApi>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(AppError::external_auth(
                "Failed to authenticate with Google Analytics: invalid_grant",
            ));
        }
        let api: Arc<dyn AnalyticsApi> = self.api.clone();
        Ok(api)
    }
}

/// Configuration with no environment and an optional default property
pub fn test_config(default_property: Option<&str>) -> ServerConfig {
    ServerConfig::from_lookup(|_| None)
        .unwrap()
        .with_default_property_id(default_property.and_then(PropertyId::parse))
}

/// Server resources wired to a fake upstream
pub struct TestHarness {
    pub api: Arc<FakeAnalyticsApi>,
    pub credentials: Arc<FakeCredentials>,
    pub resources: Arc<ServerResources>,
}

impl TestHarness {
    pub fn new(api: FakeAnalyticsApi, default_property: Option<&str>) -> Self {
        init_test_logging();
        let api = Arc::new(api);
        let credentials = Arc::new(FakeCredentials::new(Arc::clone(&api)));
        Self::assemble(api, credentials, default_property)
    }

    pub fn refusing(default_property: Option<&str>) -> Self {
        init_test_logging();
        let api = Arc::new(FakeAnalyticsApi::new());
        let credentials = Arc::new(FakeCredentials::refusing(Arc::clone(&api)));
        Self::assemble(api, credentials, default_property)
    }

    fn assemble(
        api: Arc<FakeAnalyticsApi>,
        credentials: Arc<FakeCredentials>,
        default_property: Option<&str>,
    ) -> Self {
        let provider: Arc<dyn CredentialProvider> = credentials.clone();
        let resources = Arc::new(ServerResources::with_credential_provider(
            Arc::new(test_config(default_property)),
            provider,
        ));
        Self {
            api,
            credentials,
            resources,
        }
    }

    pub fn context(&self) -> ToolExecutionContext {
        ToolExecutionContext::new(Arc::clone(&self.resources))
    }
}

// ============================================================================
// Canned upstream records
// ============================================================================

/// Two-row report over `country` x `activeUsers`
pub fn sample_report() -> RunReportResponse {
    let row = |country: &str, users: &str| Row {
        dimension_values: vec![DimensionValue {
            value: Some(country.to_owned()),
        }],
        metric_values: vec![MetricValue {
            value: Some(users.to_owned()),
        }],
        ..Row::default()
    };
    RunReportResponse {
        dimension_headers: vec![DimensionHeader {
            name: "country".to_owned(),
        }],
        metric_headers: vec![MetricHeader {
            name: "activeUsers".to_owned(),
            metric_type: Some("TYPE_INTEGER".to_owned()),
        }],
        rows: vec![row("United States", "1200"), row("Germany", "340")],
        row_count: Some(2),
    }
}

pub fn dimension(api_name: &str, category: Option<&str>) -> DimensionMetadata {
    DimensionMetadata {
        api_name: api_name.to_owned(),
        ui_name: api_name.to_owned(),
        description: Some(format!("The {api_name} dimension")),
        category: category.map(str::to_owned),
        ..DimensionMetadata::default()
    }
}

pub fn metric(api_name: &str, category: Option<&str>) -> MetricMetadata {
    MetricMetadata {
        api_name: api_name.to_owned(),
        ui_name: api_name.to_owned(),
        description: Some(format!("The {api_name} metric")),
        metric_type: Some("TYPE_INTEGER".to_owned()),
        category: category.map(str::to_owned),
        ..MetricMetadata::default()
    }
}

/// Small catalog spanning named and uncategorized entries
pub fn sample_metadata() -> Metadata {
    Metadata {
        name: Some("properties/0/metadata".to_owned()),
        dimensions: vec![
            dimension("country", Some("Geography")),
            dimension("city", Some("Geography")),
            dimension("hour", Some("Time Of Day")),
            dimension("customEvent:plan", None),
        ],
        metrics: vec![
            metric("activeUsers", Some("User")),
            metric("sessions", Some("Session")),
        ],
    }
}

pub fn audience(property: &str, id: &str, display_name: &str) -> Audience {
    Audience {
        name: Some(format!("properties/{property}/audiences/{id}")),
        display_name: Some(display_name.to_owned()),
        description: Some(format!("{display_name} audience")),
        membership_duration_days: Some(30),
        ..Audience::default()
    }
}

/// Raw Admin API audience body with a `simpleFilter` clause and trigger settings
pub fn upstream_audience_json(property: &str, id: &str) -> Value {
    json!({
        "name": format!("properties/{property}/audiences/{id}"),
        "displayName": "Purchasers",
        "membershipDurationDays": 540,
        "adsPersonalizationEnabled": true,
        "exclusionDurationMode": "EXCLUDE_TEMPORARILY",
        "eventTrigger": {"eventName": "purchaser_joined", "logCondition": "AUDIENCE_JOINED"},
        "filterClauses": [{
            "clauseType": "INCLUDE",
            "simpleFilter": {
                "scope": "AUDIENCE_FILTER_SCOPE_ACROSS_ALL_SESSIONS",
                "filterExpression": {
                    "andGroup": {
                        "filterExpressions": [{
                            "orGroup": {
                                "filterExpressions": [{
                                    "dimensionOrMetricFilter": {
                                        "fieldName": "eventName",
                                        "stringFilter": {"matchType": "EXACT", "value": "purchase"}
                                    }
                                }]
                            }
                        }]
                    }
                }
            }
        }]
    })
}
