// ABOUTME: Audience manager relaying create, get, list, update and delete to the Admin API
// ABOUTME: Builds partial patch bodies and derives the update mask from the fields present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::reports::resolve_property;
use crate::config::ServerConfig;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::google::CredentialProvider;
use crate::models::{Audience, AudienceFilterClause, ListAudiencesResponse, PageRequest, PropertyId};

/// Parameters of `create_audience`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceDraft {
    /// Parent property; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// Display name, required
    #[serde(default)]
    pub display_name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Membership duration in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_duration_days: Option<i32>,
    /// Membership criteria, at least one clause
    #[serde(default)]
    pub filter_clauses: Vec<AudienceFilterClause>,
}

/// Parameters of `update_audience`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudiencePatch {
    /// `properties/{property}/audiences/{audience}`
    #[serde(default)]
    pub name: String,
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New membership duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_duration_days: Option<i32>,
    /// Replacement filter clauses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_clauses: Option<Vec<AudienceFilterClause>>,
    /// Comma-separated field mask, forwarded verbatim when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<String>,
}

/// Parameters of `list_audiences`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAudiencesQuery {
    /// Parent property; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    /// Page token from a previous call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Parameters of `get_audience` and `delete_audience`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceRef {
    /// `properties/{property}/audiences/{audience}`
    #[serde(default)]
    pub name: String,
}

/// A validated patch ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPatch {
    /// Audience resource name
    pub name: String,
    /// Partial body holding only the present fields
    pub audience: Audience,
    /// Field mask sent as `updateMask`
    pub update_mask: String,
}

/// Relays audience CRUD to the Admin API
#[derive(Debug, Clone, Default)]
pub struct AudienceManager {
    default_property: Option<PropertyId>,
}

impl AudienceManager {
    /// Create a manager with an optional default property
    #[must_use]
    pub const fn new(default_property: Option<PropertyId>) -> Self {
        Self { default_property }
    }

    /// Create a manager from server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.default_property_id.clone())
    }

    /// Resolve an explicit property, falling back to the configured default
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when neither is available
    pub fn resolve_property(&self, explicit: Option<&str>) -> AppResult<PropertyId> {
        resolve_property(explicit, self.default_property.as_ref())
    }

    /// Validate a draft and build the create body
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the property, display name or filter clauses are missing
    pub fn prepare_create(&self, draft: AudienceDraft) -> AppResult<(PropertyId, Audience)> {
        let property = self.resolve_property(draft.property_id.as_deref())?;
        if draft.display_name.trim().is_empty() {
            return Err(AppError::invalid_input(messages::NO_DISPLAY_NAME));
        }
        if draft.filter_clauses.is_empty() {
            return Err(AppError::invalid_input(messages::NO_FILTER_CLAUSES));
        }

        Ok((
            property,
            Audience {
                display_name: Some(draft.display_name),
                description: draft.description,
                membership_duration_days: draft.membership_duration_days,
                filter_clauses: Some(draft.filter_clauses),
                ..Audience::default()
            },
        ))
    }

    /// Validate a patch, build the partial body and settle the update mask
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is missing or nothing would change
    pub fn prepare_update(&self, patch: AudiencePatch) -> AppResult<PreparedPatch> {
        let name = require_name(&patch.name)?;

        let derived: Vec<&str> = [
            ("displayName", patch.display_name.is_some()),
            ("description", patch.description.is_some()),
            (
                "membershipDurationDays",
                patch.membership_duration_days.is_some(),
            ),
            ("filterClauses", patch.filter_clauses.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect();

        let explicit_mask = patch
            .update_mask
            .as_deref()
            .map(str::trim)
            .filter(|mask| !mask.is_empty());

        let update_mask = match explicit_mask {
            Some(mask) => mask.to_owned(),
            None if derived.is_empty() => {
                return Err(AppError::invalid_input(messages::EMPTY_AUDIENCE_UPDATE));
            }
            None => derived.join(","),
        };

        Ok(PreparedPatch {
            audience: Audience {
                name: Some(name.clone()),
                display_name: patch.display_name,
                description: patch.description,
                membership_duration_days: patch.membership_duration_days,
                filter_clauses: patch.filter_clauses,
                ..Audience::default()
            },
            name,
            update_mask,
        })
    }

    /// Create an audience
    ///
    /// # Errors
    ///
    /// Validation errors precede any network call; auth and upstream
    /// failures are propagated unchanged
    pub async fn create(
        &self,
        credentials: &dyn CredentialProvider,
        draft: AudienceDraft,
    ) -> AppResult<Audience> {
        let (property, audience) = self.prepare_create(draft)?;
        let api = credentials.get_client().await?;
        let created = api.create_audience(&property, &audience).await?;
        info!(
            property = %property,
            audience = created.name.as_deref().unwrap_or_default(),
            "Audience created"
        );
        Ok(created)
    }

    /// Get one audience
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name; otherwise see [`Self::create`]
    pub async fn get(
        &self,
        credentials: &dyn CredentialProvider,
        name: &str,
    ) -> AppResult<Audience> {
        let name = require_name(name)?;
        let api = credentials.get_client().await?;
        api.get_audience(&name).await
    }

    /// List audiences of a property, one page at a time
    ///
    /// # Errors
    ///
    /// See [`Self::create`]
    pub async fn list(
        &self,
        credentials: &dyn CredentialProvider,
        query: ListAudiencesQuery,
    ) -> AppResult<(PropertyId, ListAudiencesResponse)> {
        let property = self.resolve_property(query.property_id.as_deref())?;
        let page = PageRequest {
            page_size: query.page_size,
            page_token: query.page_token.filter(|token| !token.is_empty()),
        };
        debug!(property = %property, ?page, "Listing audiences");
        let api = credentials.get_client().await?;
        let response = api.list_audiences(&property, &page).await?;
        Ok((property, response))
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// See [`Self::prepare_update`] and [`Self::create`]
    pub async fn update(
        &self,
        credentials: &dyn CredentialProvider,
        patch: AudiencePatch,
    ) -> AppResult<Audience> {
        let prepared = self.prepare_update(patch)?;
        debug!(
            audience = %prepared.name,
            update_mask = %prepared.update_mask,
            "Updating audience"
        );
        let api = credentials.get_client().await?;
        api.patch_audience(&prepared.name, &prepared.audience, &prepared.update_mask)
            .await
    }

    /// Delete an audience; a second delete surfaces upstream's not-found
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name; otherwise see [`Self::create`]
    pub async fn delete(
        &self,
        credentials: &dyn CredentialProvider,
        name: &str,
    ) -> AppResult<String> {
        let name = require_name(name)?;
        let api = credentials.get_client().await?;
        api.delete_audience(&name).await?;
        info!(audience = %name, "Audience deleted");
        Ok(name)
    }
}

fn require_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(messages::NO_AUDIENCE_NAME));
    }
    Ok(trimmed.to_owned())
}
