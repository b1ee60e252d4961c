// ABOUTME: Translation layer between uniform tool parameters and Google Analytics requests
// ABOUTME: Hosts the report translator, audience manager and metadata lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Analytics Translation Layer
//!
//! Each component validates its inputs before asking the credential provider
//! for a client, so a missing property or metric never costs a network call.

/// Audience create/get/list/update/delete
pub mod audiences;
/// Catalog fetch, category grouping and compatibility checks
pub mod metadata;
/// Single, batch, pivot and batch-pivot report translation
pub mod reports;

pub use audiences::{
    AudienceDraft, AudienceManager, AudiencePatch, AudienceRef, ListAudiencesQuery, PreparedPatch,
};
pub use metadata::{
    check_compatibility, decode_category, filter_by_category, group_by_category,
    CompatibilityResult, CompatibilityStatus, MetadataLookup,
};
pub use reports::{
    resolve_property, BatchPivotReportQuery, BatchReportQuery, PivotReportQuery, PropertyRequest,
    ReportQuery, ReportTranslator,
};
