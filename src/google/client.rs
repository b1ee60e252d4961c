// ABOUTME: Upstream client for the GA4 Data and Admin APIs behind the AnalyticsApi trait
// ABOUTME: Sends bearer-authenticated JSON requests and maps Google error envelopes to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::http_client::http_client;
use crate::config::GoogleApiConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Audience, BatchRunPivotReportsRequest, BatchRunPivotReportsResponse, BatchRunReportsRequest,
    BatchRunReportsResponse, ListAudiencesResponse, Metadata, PageRequest, Property, PropertyId,
    RunPivotReportRequest, RunPivotReportResponse, RunReportRequest, RunReportResponse,
};

/// One async method per upstream endpoint.
///
/// Implemented by [`GoogleAnalyticsClient`] for real traffic and by
/// in-memory fakes in tests.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// `POST {property}:runReport`
    async fn run_report(
        &self,
        property: &PropertyId,
        request: &RunReportRequest,
    ) -> AppResult<RunReportResponse>;

    /// `POST {property}:batchRunReports`
    async fn batch_run_reports(
        &self,
        property: &PropertyId,
        request: &BatchRunReportsRequest,
    ) -> AppResult<BatchRunReportsResponse>;

    /// `POST {property}:runPivotReport`
    async fn run_pivot_report(
        &self,
        property: &PropertyId,
        request: &RunPivotReportRequest,
    ) -> AppResult<RunPivotReportResponse>;

    /// `POST {property}:batchRunPivotReports`
    async fn batch_run_pivot_reports(
        &self,
        property: &PropertyId,
        request: &BatchRunPivotReportsRequest,
    ) -> AppResult<BatchRunPivotReportsResponse>;

    /// `GET {name}` on the Data API, e.g. `properties/0/metadata`
    async fn get_metadata(&self, name: &str) -> AppResult<Metadata>;

    /// `GET {property}` on the Admin API
    async fn get_property(&self, property: &PropertyId) -> AppResult<Property>;

    /// `POST {property}/audiences`
    async fn create_audience(
        &self,
        property: &PropertyId,
        audience: &Audience,
    ) -> AppResult<Audience>;

    /// `GET {property}/audiences`
    async fn list_audiences(
        &self,
        property: &PropertyId,
        page: &PageRequest,
    ) -> AppResult<ListAudiencesResponse>;

    /// `GET {name}`
    async fn get_audience(&self, name: &str) -> AppResult<Audience>;

    /// `PATCH {name}?updateMask=...`
    async fn patch_audience(
        &self,
        name: &str,
        audience: &Audience,
        update_mask: &str,
    ) -> AppResult<Audience>;

    /// `DELETE {name}`
    async fn delete_audience(&self, name: &str) -> AppResult<()>;
}

/// Google error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Convert a non-success upstream response body into an `ExternalServiceError`
/// that carries Google's own message
#[must_use]
pub fn upstream_error(status: u16, body: &str) -> AppError {
    let message = match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(GoogleErrorEnvelope {
            error:
                GoogleErrorBody {
                    message: Some(message),
                    ..
                },
        }) => message,
        Ok(GoogleErrorEnvelope {
            error: GoogleErrorBody {
                status: Some(status_text),
                ..
            },
        }) => status_text,
        _ if body.trim().is_empty() => format!("Upstream request failed with HTTP {status}"),
        _ => format!("Upstream request failed with HTTP {status}: {}", body.trim()),
    };
    AppError::external_service(message).with_upstream_status(status)
}

/// Authenticated client for the Data and Admin APIs
pub struct GoogleAnalyticsClient {
    access_token: String,
    data_api_base: String,
    admin_api_base: String,
}

impl GoogleAnalyticsClient {
    /// Create a client that sends `access_token` as a bearer token
    #[must_use]
    pub fn new(access_token: impl Into<String>, google: &GoogleApiConfig) -> Self {
        Self {
            access_token: access_token.into(),
            data_api_base: google.data_api_base.clone(),
            admin_api_base: google.admin_api_base.clone(),
        }
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}/{}", self.data_api_base, path.trim_start_matches('/'))
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/{}", self.admin_api_base, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "Google Analytics API request");
        http_client()
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Google Analytics API request failed");
        Err(upstream_error(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
        let response = Self::check(builder.send().await?).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::external_service(format!("Failed to parse Google Analytics response: {e}"))
        })
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> AppResult<T> {
        Self::send_json(self.request(Method::POST, url).json(body)).await
    }
}

#[async_trait]
impl AnalyticsApi for GoogleAnalyticsClient {
    async fn run_report(
        &self,
        property: &PropertyId,
        request: &RunReportRequest,
    ) -> AppResult<RunReportResponse> {
        self.post(&self.data_url(&format!("{property}:runReport")), request)
            .await
    }

    async fn batch_run_reports(
        &self,
        property: &PropertyId,
        request: &BatchRunReportsRequest,
    ) -> AppResult<BatchRunReportsResponse> {
        self.post(&self.data_url(&format!("{property}:batchRunReports")), request)
            .await
    }

    async fn run_pivot_report(
        &self,
        property: &PropertyId,
        request: &RunPivotReportRequest,
    ) -> AppResult<RunPivotReportResponse> {
        self.post(&self.data_url(&format!("{property}:runPivotReport")), request)
            .await
    }

    async fn batch_run_pivot_reports(
        &self,
        property: &PropertyId,
        request: &BatchRunPivotReportsRequest,
    ) -> AppResult<BatchRunPivotReportsResponse> {
        self.post(
            &self.data_url(&format!("{property}:batchRunPivotReports")),
            request,
        )
        .await
    }

    async fn get_metadata(&self, name: &str) -> AppResult<Metadata> {
        Self::send_json(self.request(Method::GET, &self.data_url(name))).await
    }

    async fn get_property(&self, property: &PropertyId) -> AppResult<Property> {
        Self::send_json(self.request(Method::GET, &self.admin_url(property.as_str()))).await
    }

    async fn create_audience(
        &self,
        property: &PropertyId,
        audience: &Audience,
    ) -> AppResult<Audience> {
        self.post(&self.admin_url(&format!("{property}/audiences")), audience)
            .await
    }

    async fn list_audiences(
        &self,
        property: &PropertyId,
        page: &PageRequest,
    ) -> AppResult<ListAudiencesResponse> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(size) = page.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(token) = &page.page_token {
            query.push(("pageToken", token.clone()));
        }
        let url = self.admin_url(&format!("{property}/audiences"));
        Self::send_json(self.request(Method::GET, &url).query(&query)).await
    }

    async fn get_audience(&self, name: &str) -> AppResult<Audience> {
        Self::send_json(self.request(Method::GET, &self.admin_url(name))).await
    }

    async fn patch_audience(
        &self,
        name: &str,
        audience: &Audience,
        update_mask: &str,
    ) -> AppResult<Audience> {
        let builder = self
            .request(Method::PATCH, &self.admin_url(name))
            .query(&[("updateMask", update_mask)])
            .json(audience);
        Self::send_json(builder).await
    }

    async fn delete_audience(&self, name: &str) -> AppResult<()> {
        Self::check(
            self.request(Method::DELETE, &self.admin_url(name))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}
