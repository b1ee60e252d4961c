// ABOUTME: Typed records for Google Analytics Data and Admin API payloads
// ABOUTME: Re-exports filter, report, metadata and admin models plus the property identifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Upstream Data Model
//!
//! Every request and response exchanged with Google is an explicit serde
//! record with camelCase wire names. Optional members are `Option` (or an
//! empty `Vec` for repeated fields) so presence is visible in the type.

/// Audience and property records from the Admin API
pub mod admin;
/// Filter expression tree shared by reports and audiences
pub mod filters;
/// Dimension and metric catalog
pub mod metadata;
/// Report requests and responses
pub mod reports;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::defaults::PROPERTY_PREFIX;

pub use admin::{
    Audience, AudienceClauseType, AudienceFilterClause, ListAudiencesResponse, PageRequest,
    Property,
};
pub use filters::{
    BetweenFilter, EmptyFilter, Filter, FilterExpression, FilterExpressionList, FilterKind,
    InListFilter, MatchType, NumericFilter, NumericOperation, NumericValue, StringFilter,
};
pub use metadata::{CatalogEntry, DimensionMetadata, FieldKind, Metadata, MetricMetadata};
pub use reports::{
    BatchRunPivotReportsRequest, BatchRunPivotReportsResponse, BatchRunReportsRequest,
    BatchRunReportsResponse, DateRange, Dimension, DimensionHeader, DimensionOrderBy,
    DimensionValue, Metric, MetricHeader, MetricOrderBy, MetricValue, OrderBy, OrderType, Pivot,
    PivotHeader, PivotValueRegion, Row, RunPivotReportRequest, RunPivotReportResponse,
    RunReportRequest, RunReportResponse,
};

/// Fully-qualified property name (`properties/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    /// Normalise a raw identifier: bare ids gain the `properties/` prefix,
    /// prefixed ids are kept verbatim, blank input yields `None`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with(PROPERTY_PREFIX) {
            Some(Self(trimmed.to_owned()))
        } else {
            Some(Self(format!("{PROPERTY_PREFIX}{trimmed}")))
        }
    }

    /// Full resource name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier without the `properties/` prefix, as used in `ga://` URIs
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.0.strip_prefix(PROPERTY_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_id_normalisation() {
        assert_eq!(
            PropertyId::parse("123").unwrap().as_str(),
            "properties/123"
        );
        assert_eq!(
            PropertyId::parse(" properties/456 ").unwrap().as_str(),
            "properties/456"
        );
        assert!(PropertyId::parse("   ").is_none());
    }

    #[test]
    fn test_short_id() {
        let property = PropertyId::parse("properties/789").unwrap();
        assert_eq!(property.short_id(), "789");
        assert_eq!(property.to_string(), "properties/789");
    }
}
