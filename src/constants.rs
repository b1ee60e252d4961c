// ABOUTME: System-wide constants for protocol, Google endpoints and tool names
// ABOUTME: Groups environment variable names, defaults and user-facing messages by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Constants Module
//!
//! Application constants grouped into per-domain submodules so call sites read
//! as `defaults::PIVOT_LIMIT` or `tools::RUN_REPORT`.

/// Protocol-related constants
pub mod protocol {
    /// `JSON-RPC` version (standard, not configurable)
    pub const JSONRPC_VERSION: &str = "2.0";

    /// MCP protocol revision advertised during `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

    /// Server name advertised during `initialize`
    pub const SERVER_NAME: &str = "google-analytics-mcp-server";

    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Instructions returned to clients on `initialize`
    pub const SERVER_INSTRUCTIONS: &str = "This server exposes the Google Analytics Data API. \
        Use `get_metadata` or the ga://dimensions and ga://metrics resources to discover field \
        names, then `run_report` or `run_pivot_report` to query a property.";
}

/// Service names for structured logging
pub mod service_names {
    /// Service name used in log records
    pub const ANALYTICS_MCP_SERVER: &str = "analytics-mcp-server";
}

/// Environment variable names
pub mod env_config {
    /// Service-account email
    pub const GOOGLE_CLIENT_EMAIL: &str = "GOOGLE_CLIENT_EMAIL";
    /// Service-account private key (PEM, `\n`-escaped)
    pub const GOOGLE_PRIVATE_KEY: &str = "GOOGLE_PRIVATE_KEY";
    /// Property used when a call does not name one
    pub const DEFAULT_PROPERTY_ID: &str = "DEFAULT_PROPERTY_ID";
    /// OAuth token endpoint override
    pub const GOOGLE_TOKEN_URI: &str = "GOOGLE_TOKEN_URI";
    /// OAuth scope override
    pub const GOOGLE_ANALYTICS_SCOPE: &str = "GOOGLE_ANALYTICS_SCOPE";
    /// Data API base URL override
    pub const ANALYTICS_DATA_API_BASE: &str = "ANALYTICS_DATA_API_BASE";
    /// Admin API base URL override
    pub const ANALYTICS_ADMIN_API_BASE: &str = "ANALYTICS_ADMIN_API_BASE";
    /// Row limit applied to pivots that do not set one
    pub const PIVOT_DEFAULT_LIMIT: &str = "PIVOT_DEFAULT_LIMIT";
    /// Whole-request HTTP timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// HTTP connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default values for configuration and requests
pub mod defaults {
    /// Google OAuth 2.0 token endpoint
    pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
    /// Read-only analytics scope
    pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
    /// GA4 Data API base URL
    pub const ANALYTICS_DATA_API_BASE: &str = "https://analyticsdata.googleapis.com/v1beta";
    /// GA4 Admin API base URL (audiences live under v1alpha)
    pub const ANALYTICS_ADMIN_API_BASE: &str = "https://analyticsadmin.googleapis.com/v1alpha";
    /// Grant type for the signed service-account assertion
    pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
    /// Lifetime of the signed assertion
    pub const ASSERTION_LIFETIME_SECS: i64 = 3600;
    /// Metadata resource that lists every universal dimension and metric
    pub const METADATA_NAME: &str = "properties/0/metadata";
    /// Row limit applied to pivots that do not set one
    pub const PIVOT_LIMIT: i64 = 10;
    /// Start date used by the report resource when the URI leaves it empty
    pub const REPORT_START_DATE: &str = "7daysAgo";
    /// End date used by the report resource when the URI leaves it empty
    pub const REPORT_END_DATE: &str = "today";
    /// Category bucket for catalog entries without one
    pub const UNCATEGORIZED: &str = "Uncategorized";
    /// Prefix of fully-qualified property names
    pub const PROPERTY_PREFIX: &str = "properties/";
    /// Request timeout for the shared HTTP client
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout for the shared HTTP client
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Formatter limits
pub mod limits {
    /// Pivot rows rendered in a pivot summary
    pub const PIVOT_SUMMARY_ROWS: usize = 10;
    /// Catalog entries sampled in the metadata summary
    pub const METADATA_SAMPLE_SIZE: usize = 5;
    /// Width of the dash line separating batch sections
    pub const SECTION_SEPARATOR_WIDTH: usize = 40;
}

/// Tool names
pub mod tools {
    /// Single report
    pub const RUN_REPORT: &str = "run_report";
    /// Batch of reports against one property
    pub const RUN_BATCH_REPORTS: &str = "run_batch_reports";
    /// Pivot report
    pub const RUN_PIVOT_REPORT: &str = "run_pivot_report";
    /// Batch of pivot reports
    pub const BATCH_RUN_PIVOT_REPORTS: &str = "batch_run_pivot_reports";
    /// Dimension and metric catalog
    pub const GET_METADATA: &str = "get_metadata";
    /// Local field compatibility check
    pub const CHECK_COMPATIBILITY: &str = "check_compatibility";
    /// Create an audience
    pub const CREATE_AUDIENCE: &str = "create_audience";
    /// List audiences
    pub const LIST_AUDIENCES: &str = "list_audiences";
    /// Get one audience
    pub const GET_AUDIENCE: &str = "get_audience";
    /// Patch an audience
    pub const UPDATE_AUDIENCE: &str = "update_audience";
    /// Delete an audience
    pub const DELETE_AUDIENCE: &str = "delete_audience";
}

/// Tool categories used by the registry
pub mod tool_categories {
    /// Report tools
    pub const REPORTS: &str = "reports";
    /// Catalog tools
    pub const METADATA: &str = "metadata";
    /// Audience tools
    pub const AUDIENCES: &str = "audiences";
}

/// User-facing validation messages
pub mod messages {
    /// No explicit property and no configured default
    pub const NO_PROPERTY_ID: &str = "No property ID provided and no default property ID set";
    /// Report without metrics
    pub const NO_METRICS: &str = "At least one metric must be specified";
    /// Report without date ranges
    pub const NO_DATE_RANGES: &str = "At least one date range must be specified";
    /// Batch without sub-requests
    pub const NO_REQUESTS: &str = "At least one request must be specified";
    /// Pivot report without pivots or dimensions to pivot on
    pub const NO_PIVOTS: &str = "At least one pivot or dimension must be specified";
    /// Audience without a display name
    pub const NO_DISPLAY_NAME: &str = "displayName is required";
    /// Audience without filter clauses
    pub const NO_FILTER_CLAUSES: &str = "At least one filter clause must be specified";
    /// Audience call without a resource name
    pub const NO_AUDIENCE_NAME: &str = "Audience name is required";
    /// Update without any field to change
    pub const EMPTY_AUDIENCE_UPDATE: &str =
        "No fields to update: supply at least one field or an updateMask";
    /// Prefix of every credential failure
    pub const AUTH_FAILED: &str = "Failed to authenticate with Google Analytics";
}
