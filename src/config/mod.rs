// ABOUTME: Configuration module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its component records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! Configuration module for the Analytics MCP Server
//!
//! Everything is read from the process environment once, at startup, into an
//! immutable [`ServerConfig`] that travels inside `ServerResources`.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    unescape_private_key, Environment, GoogleApiConfig, GoogleCredentials, HttpClientConfig,
    ReportDefaults, ServerConfig,
};
