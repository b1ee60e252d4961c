// ABOUTME: Google Analytics upstream access: credentials, HTTP client and API surface
// ABOUTME: Everything that talks to Google over the network lives under this module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

/// Data and Admin API client behind the `AnalyticsApi` trait
pub mod client;
/// Service-account credential provider
pub mod credentials;
/// Shared HTTP client
pub mod http_client;

pub use client::{upstream_error, AnalyticsApi, GoogleAnalyticsClient};
pub use credentials::{AssertionClaims, CredentialProvider, ServiceAccountProvider};
pub use http_client::{http_client, initialize_http_client};
