// ABOUTME: Shared HTTP client with connection pooling and configured timeouts
// ABOUTME: Built once from HttpClientConfig so token and API calls reuse one pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};

use crate::config::HttpClientConfig;

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

fn build_client(config: HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

/// Initialize the shared client with configured timeouts.
///
/// Returns `false` when a client was already initialized; the first
/// configuration wins.
pub fn initialize_http_client(config: HttpClientConfig) -> bool {
    let initialized = SHARED_CLIENT.set(build_client(config)).is_ok();
    if initialized {
        debug!(
            timeout_secs = config.timeout_secs,
            connect_timeout_secs = config.connect_timeout_secs,
            "Shared HTTP client initialized"
        );
    }
    initialized
}

/// Get the shared HTTP client, building it with default timeouts when
/// [`initialize_http_client`] was never called
pub fn http_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| build_client(HttpClientConfig::default()))
}
