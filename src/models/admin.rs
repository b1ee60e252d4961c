// ABOUTME: Admin API records for audiences and property information
// ABOUTME: Audience filter clauses reuse the shared FilterExpression tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::filters::FilterExpression;

/// Audience definition.
///
/// Every field is optional so the same record serves as a create body, a
/// partial patch body and an upstream response. Fields without a typed
/// counterpart land in `extra` and are echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    /// `properties/{property}/audiences/{audience}`, assigned by upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Days a user stays in the audience after qualifying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_duration_days: Option<i32>,
    /// Membership criteria
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_clauses: Option<Vec<AudienceFilterClause>>,
    /// Output only: whether ads personalization is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ads_personalization_enabled: Option<bool>,
    /// Output only: creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Output only: last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// Upstream fields such as `eventTrigger` or `exclusionDurationMode`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Audience {
    /// Trailing id segment of the resource name
    #[must_use]
    pub fn audience_id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

/// Whether matching users are included in or excluded from the audience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudienceClauseType {
    /// Upstream default
    #[serde(rename = "AUDIENCE_CLAUSE_TYPE_UNSPECIFIED")]
    Unspecified,
    /// Users matching the clause join the audience
    Include,
    /// Users matching the clause are kept out
    Exclude,
}

/// One membership clause.
///
/// Clauses built by this server carry a `filterExpression`. Clauses read back
/// from upstream usually hold a `simpleFilter` or `sequenceFilter` instead,
/// which are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AudienceFilterClause {
    /// Include or exclude, upstream default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause_type: Option<AudienceClauseType>,
    /// Membership criteria
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<FilterExpression>,
    /// Remaining clause shapes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `audiences.list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListAudiencesResponse {
    /// Audiences on this page
    #[serde(default)]
    pub audiences: Vec<Audience>,
    /// Token for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Pagination passed through to list calls
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Maximum results per page
    pub page_size: Option<i32>,
    /// Token from a previous page
    pub page_token: Option<String>,
}

/// Property record from `properties.get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// `properties/{id}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Reporting time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Reporting currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// `GOOGLE_ANALYTICS_STANDARD` or `GOOGLE_ANALYTICS_360`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_level: Option<String>,
    /// Owning account, `accounts/{id}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Parent resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Industry category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_category: Option<String>,
}
