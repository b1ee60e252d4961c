// ABOUTME: Stdio MCP server binary exposing Google Analytics tools and resources
// ABOUTME: Loads configuration from the environment, then serves JSON-RPC on stdin/stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Analytics MCP Server Binary
//!
//! Reads newline-delimited JSON-RPC from stdin and writes responses to
//! stdout. Logs go to stderr.

use std::sync::Arc;

use analytics_mcp_server::{
    config::ServerConfig,
    google::initialize_http_client,
    logging::{LogFormat, LoggingConfig},
    mcp::{ServerResources, StdioTransport},
    models::PropertyId,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "analytics-mcp-server")]
#[command(about = "Google Analytics Data API exposed to LLMs over the Model Context Protocol")]
#[command(version)]
pub struct Args {
    /// Property used when a request names none (overrides `DEFAULT_PROPERTY_ID`)
    #[arg(long)]
    default_property_id: Option<String>,

    /// Log format written to stderr: json, pretty or compact (overrides `LOG_FORMAT`)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(format) = args.log_format {
        logging = logging.with_format(format);
    }
    logging.init()?;

    let config = ServerConfig::from_env()
        .context("failed to load configuration")?
        .with_default_property_id(args.default_property_id.as_deref().and_then(PropertyId::parse));
    info!("{}", config.summary());

    initialize_http_client(config.http_client);

    let resources = Arc::new(ServerResources::new(Arc::new(config)));
    info!(
        tools = resources.tool_registry.len(),
        resources = resources.resource_registry.len(),
        "Ready to serve Google Analytics"
    );

    if let Err(e) = StdioTransport::new(resources).run().await {
        error!("Transport error: {e}");
        return Err(e.into());
    }
    Ok(())
}
