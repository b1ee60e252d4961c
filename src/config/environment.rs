// ABOUTME: Environment-based configuration for credentials, Google endpoints and HTTP timeouts
// ABOUTME: Produces an immutable ServerConfig that is injected into every component at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};
use crate::models::PropertyId;

/// Environment type for deployment-specific behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Service-account credentials
#[derive(Clone, Default)]
pub struct GoogleCredentials {
    /// Service-account email (`iss` of the signed assertion)
    pub client_email: Option<String>,
    /// PEM private key with real newlines
    pub private_key: Option<String>,
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_email", &self.client_email)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl GoogleCredentials {
    /// Whether both halves of the credential are present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.client_email.is_some() && self.private_key.is_some()
    }
}

/// Google endpoints and scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleApiConfig {
    /// Data API base URL
    pub data_api_base: String,
    /// Admin API base URL
    pub admin_api_base: String,
    /// OAuth token endpoint, also the `aud` claim
    pub token_uri: String,
    /// Requested OAuth scope
    pub scope: String,
}

impl Default for GoogleApiConfig {
    fn default() -> Self {
        Self {
            data_api_base: defaults::ANALYTICS_DATA_API_BASE.to_owned(),
            admin_api_base: defaults::ANALYTICS_ADMIN_API_BASE.to_owned(),
            token_uri: defaults::GOOGLE_TOKEN_URI.to_owned(),
            scope: defaults::ANALYTICS_READONLY_SCOPE.to_owned(),
        }
    }
}

/// Shared HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Report translation defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDefaults {
    /// Row limit given to pivots that do not set one
    pub pivot_limit: i64,
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            pivot_limit: defaults::PIVOT_LIMIT,
        }
    }
}

/// Complete server configuration, read once at startup
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Service-account credentials
    pub credentials: GoogleCredentials,
    /// Property used when a call does not name one
    pub default_property_id: Option<PropertyId>,
    /// Google endpoints
    pub google: GoogleApiConfig,
    /// HTTP client timeouts
    pub http_client: HttpClientConfig,
    /// Report defaults
    pub reports: ReportDefaults,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric variable cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric variable cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials = GoogleCredentials {
            client_email: non_blank(env_config::GOOGLE_CLIENT_EMAIL),
            private_key: non_blank(env_config::GOOGLE_PRIVATE_KEY)
                .map(|key| unescape_private_key(&key)),
        };
        if !credentials.is_complete() {
            warn!("Google service-account credentials are incomplete; upstream calls will fail");
        }

        let google = GoogleApiConfig {
            data_api_base: non_blank(env_config::ANALYTICS_DATA_API_BASE)
                .map_or_else(|| defaults::ANALYTICS_DATA_API_BASE.to_owned(), trim_base),
            admin_api_base: non_blank(env_config::ANALYTICS_ADMIN_API_BASE)
                .map_or_else(|| defaults::ANALYTICS_ADMIN_API_BASE.to_owned(), trim_base),
            token_uri: non_blank(env_config::GOOGLE_TOKEN_URI)
                .unwrap_or_else(|| defaults::GOOGLE_TOKEN_URI.to_owned()),
            scope: non_blank(env_config::GOOGLE_ANALYTICS_SCOPE)
                .unwrap_or_else(|| defaults::ANALYTICS_READONLY_SCOPE.to_owned()),
        };

        let http_client = HttpClientConfig {
            timeout_secs: parse_or(
                env_config::HTTP_CLIENT_TIMEOUT_SECS,
                non_blank(env_config::HTTP_CLIENT_TIMEOUT_SECS),
                defaults::HTTP_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_or(
                env_config::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                non_blank(env_config::HTTP_CLIENT_CONNECT_TIMEOUT_SECS),
                defaults::HTTP_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let pivot_limit = parse_or(
            env_config::PIVOT_DEFAULT_LIMIT,
            non_blank(env_config::PIVOT_DEFAULT_LIMIT),
            defaults::PIVOT_LIMIT,
        )?;
        if pivot_limit <= 0 {
            return Err(AppError::config_invalid(format!(
                "{} must be positive, got {pivot_limit}",
                env_config::PIVOT_DEFAULT_LIMIT
            )));
        }

        Ok(Self {
            credentials,
            default_property_id: non_blank(env_config::DEFAULT_PROPERTY_ID)
                .and_then(|raw| PropertyId::parse(&raw)),
            google,
            http_client,
            reports: ReportDefaults { pivot_limit },
            environment: non_blank(env_config::ENVIRONMENT)
                .map(|raw| Environment::from_str_or_default(&raw))
                .unwrap_or_default(),
        })
    }

    /// Replace the default property, e.g. from a command-line flag
    #[must_use]
    pub fn with_default_property_id(mut self, property: Option<PropertyId>) -> Self {
        if property.is_some() {
            self.default_property_id = property;
        }
        self
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Analytics MCP Server Configuration:\n\
             - Environment: {}\n\
             - Service Account: {}\n\
             - Default Property: {}\n\
             - Data API: {}\n\
             - Admin API: {}\n\
             - Pivot Default Limit: {}\n\
             - HTTP Timeout: {}s (connect {}s)",
            self.environment,
            self.credentials
                .client_email
                .as_deref()
                .unwrap_or("Not configured"),
            self.default_property_id
                .as_ref()
                .map_or("Not configured", PropertyId::as_str),
            self.google.data_api_base,
            self.google.admin_api_base,
            self.reports.pivot_limit,
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Turn literal `\n` escape sequences into newlines, as keys pasted into
/// a single-line environment variable usually carry them
#[must_use]
pub fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn trim_base(raw: String) -> String {
    raw.trim_end_matches('/').to_owned()
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.trim().parse().map_err(|e| {
            AppError::config_invalid(format!("Invalid {key} value '{value}': {e}"))
        })
    })
}
