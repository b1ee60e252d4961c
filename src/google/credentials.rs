// ABOUTME: Service-account credential provider producing authenticated Analytics API clients
// ABOUTME: Signs an RS256 JWT assertion and exchanges it for an OAuth access token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::client::{AnalyticsApi, GoogleAnalyticsClient};
use super::http_client::http_client;
use crate::config::{GoogleApiConfig, GoogleCredentials, ServerConfig};
use crate::constants::{defaults, env_config, messages};
use crate::errors::{AppError, AppResult};

/// Source of authenticated upstream handles
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Produce a handle bound to the configured scope
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when credentials are absent and
    /// `ExternalAuthFailed` when the key is malformed or upstream rejects it
    async fn get_client(&self) -> AppResult<Arc<dyn AnalyticsApi>>;
}

/// Claims of the service-account assertion
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    /// Service-account email
    pub iss: String,
    /// Requested scope
    pub scope: String,
    /// Token endpoint
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

fn auth_failure(detail: impl std::fmt::Display) -> AppError {
    AppError::external_auth(format!("{}: {detail}", messages::AUTH_FAILED))
}

/// Credential provider backed by a Google service account.
///
/// Every call signs a fresh assertion and exchanges it; tokens are not cached.
pub struct ServiceAccountProvider {
    credentials: GoogleCredentials,
    google: GoogleApiConfig,
}

impl ServiceAccountProvider {
    /// Create a provider from explicit credentials and endpoints
    #[must_use]
    pub const fn new(credentials: GoogleCredentials, google: GoogleApiConfig) -> Self {
        Self {
            credentials,
            google,
        }
    }

    /// Create a provider from server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.credentials.clone(), config.google.clone())
    }

    /// Build the claim set for an assertion issued at `issued_at`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the service-account email is not configured
    pub fn claims(&self, issued_at: i64) -> AppResult<AssertionClaims> {
        let email = self.credentials.client_email.as_deref().ok_or_else(|| {
            AppError::config_missing(format!(
                "{}: {} is not set",
                messages::AUTH_FAILED,
                env_config::GOOGLE_CLIENT_EMAIL
            ))
        })?;

        Ok(AssertionClaims {
            iss: email.to_owned(),
            scope: self.google.scope.clone(),
            aud: self.google.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + defaults::ASSERTION_LIFETIME_SECS,
        })
    }

    /// Sign the RS256 assertion
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when credentials are absent and
    /// `ExternalAuthFailed` when the private key cannot be parsed or used
    pub fn sign_assertion(&self, issued_at: i64) -> AppResult<String> {
        let claims = self.claims(issued_at)?;
        let pem = self.credentials.private_key.as_deref().ok_or_else(|| {
            AppError::config_missing(format!(
                "{}: {} is not set",
                messages::AUTH_FAILED,
                env_config::GOOGLE_PRIVATE_KEY
            ))
        })?;

        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| auth_failure(format!("invalid private key: {e}")))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| auth_failure(format!("failed to sign assertion: {e}")))
    }

    async fn exchange_assertion(&self, assertion: &str) -> AppResult<String> {
        let params = [
            ("grant_type", defaults::JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion),
        ];

        let response = http_client()
            .post(&self.google.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| auth_failure(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| auth_failure(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<TokenErrorResponse>(&body).map_or_else(
                |_| format!("token endpoint returned HTTP {}", status.as_u16()),
                |rejection| match rejection.error_description {
                    Some(description) => format!("{}: {description}", rejection.error),
                    None => rejection.error,
                },
            );
            return Err(auth_failure(detail).with_upstream_status(status.as_u16()));
        }

        serde_json::from_str::<TokenResponse>(&body)
            .map(|token| token.access_token)
            .map_err(|e| auth_failure(format!("malformed token response: {e}")))
    }
}

#[async_trait]
impl CredentialProvider for ServiceAccountProvider {
    async fn get_client(&self) -> AppResult<Arc<dyn AnalyticsApi>> {
        let assertion = self.sign_assertion(Utc::now().timestamp())?;
        let access_token = self.exchange_assertion(&assertion).await.inspect_err(|e| {
            error!("Error creating Analytics client: {}", e.message);
        })?;
        debug!("Obtained Google Analytics access token");

        Ok(Arc::new(GoogleAnalyticsClient::new(
            access_token,
            &self.google,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn provider(email: Option<&str>, key: Option<&str>) -> ServiceAccountProvider {
        ServiceAccountProvider::new(
            GoogleCredentials {
                client_email: email.map(str::to_owned),
                private_key: key.map(str::to_owned),
            },
            GoogleApiConfig::default(),
        )
    }

    #[test]
    fn test_claims_follow_service_account_flow() {
        let claims = provider(Some("svc@example.iam.gserviceaccount.com"), None)
            .claims(1_700_000_000)
            .unwrap();
        assert_eq!(claims.iss, "svc@example.iam.gserviceaccount.com");
        assert_eq!(claims.aud, "https://oauth2.googleapis.com/token");
        assert_eq!(
            claims.scope,
            "https://www.googleapis.com/auth/analytics.readonly"
        );
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_missing_credentials_are_config_errors() {
        let err = provider(None, None).sign_assertion(0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
        assert!(err.message.contains("GOOGLE_CLIENT_EMAIL"));

        let err = provider(Some("svc@example.com"), None)
            .sign_assertion(0)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
        assert!(err.message.contains("GOOGLE_PRIVATE_KEY"));
    }

    #[test]
    fn test_malformed_key_is_auth_failure() {
        let err = provider(Some("svc@example.com"), Some("not a pem key"))
            .sign_assertion(0)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
        assert!(err
            .message
            .starts_with("Failed to authenticate with Google Analytics: "));
    }
}
