// ABOUTME: Plain-text renderers turning upstream responses into tool and resource output
// ABOUTME: Hosts report tables, catalog summaries and audience/property text plus shared helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

//! # Response Formatters
//!
//! Every renderer is a pure function from a typed upstream record to the
//! text a client sees. Empty inputs yield a fixed sentinel sentence instead
//! of an empty table.

/// Audience and property text plus JSON echoes
pub mod admin;
/// Catalog summaries, category listings and compatibility lines
pub mod metadata;
/// Report, batch, pivot and batch-pivot tables
pub mod reports;

use serde::Serialize;

use crate::constants::limits::SECTION_SEPARATOR_WIDTH;
use crate::errors::AppResult;

pub use admin::{
    format_audience_created, format_audience_deleted, format_audience_detail,
    format_audience_echo, format_audience_list, format_audience_updated, format_audiences_echo,
    format_property,
};
pub use metadata::{
    format_category_list, format_compatibility, format_dimension_category, format_metadata,
    format_metric_category, NO_COMPATIBILITY_RESULTS, NO_METADATA,
};
pub use reports::{
    format_batch_pivot_reports, format_batch_reports, format_pivot_report, format_report,
    NO_BATCH_DATA, NO_BATCH_PIVOT_DATA, NO_PIVOT_DATA, NO_REPORT_DATA,
};

/// Blank-line-wrapped dashed rule between reports of a batch
#[must_use]
pub fn section_separator() -> String {
    format!("\n\n{}\n\n", "-".repeat(SECTION_SEPARATOR_WIDTH))
}

/// Pretty-print a record with two-space indentation
///
/// # Errors
///
/// Returns `SerializationError` if the value cannot be represented as JSON
pub fn pretty_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_is_forty_dashes() {
        let separator = section_separator();
        assert_eq!(separator.trim(), "-".repeat(40));
        assert!(separator.starts_with("\n\n") && separator.ends_with("\n\n"));
    }
}
