// ABOUTME: Text renderers for audiences and property information from the Admin API
// ABOUTME: Tool results echo records as pretty JSON; resources use line-oriented summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use super::pretty_json;
use crate::errors::AppResult;
use crate::models::{Audience, ListAudiencesResponse, Property, PropertyId};

const UNKNOWN: &str = "Unknown";

fn or_unknown(value: Option<&String>) -> &str {
    value.map_or(UNKNOWN, String::as_str)
}

// ============================================================================
// Tool echoes
// ============================================================================

/// `create_audience` result
///
/// # Errors
///
/// Returns `SerializationError` if the record cannot be encoded
pub fn format_audience_created(audience: &Audience) -> AppResult<String> {
    Ok(format!(
        "Audience created successfully:\n{}",
        pretty_json(audience)?
    ))
}

/// `list_audiences` result, including the next page token when present
///
/// # Errors
///
/// Returns `SerializationError` if the record cannot be encoded
pub fn format_audiences_echo(page: &ListAudiencesResponse) -> AppResult<String> {
    Ok(format!("Audiences:\n{}", pretty_json(page)?))
}

/// `get_audience` result
///
/// # Errors
///
/// Returns `SerializationError` if the record cannot be encoded
pub fn format_audience_echo(audience: &Audience) -> AppResult<String> {
    Ok(format!("Audience details:\n{}", pretty_json(audience)?))
}

/// `update_audience` result
///
/// # Errors
///
/// Returns `SerializationError` if the record cannot be encoded
pub fn format_audience_updated(audience: &Audience) -> AppResult<String> {
    Ok(format!(
        "Audience updated successfully:\n{}",
        pretty_json(audience)?
    ))
}

/// `delete_audience` result
#[must_use]
pub fn format_audience_deleted(name: &str) -> String {
    format!("Audience {name} deleted successfully.")
}

// ============================================================================
// Resource summaries
// ============================================================================

/// One entry per audience, separated by blank lines
#[must_use]
pub fn format_audience_list(property: &PropertyId, audiences: &[Audience]) -> String {
    if audiences.is_empty() {
        return format!("No audiences found for property: {property}");
    }

    let entries = audiences
        .iter()
        .map(|audience| {
            format!(
                "- {} ({})\n  Description: {}\n  Created: {}",
                or_unknown(audience.display_name.as_ref()),
                audience.audience_id().unwrap_or(UNKNOWN),
                audience.description.as_deref().unwrap_or("No description"),
                or_unknown(audience.create_time.as_ref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Google Analytics Audiences for {property}:\n\n{entries}")
}

/// Full description of one audience, filter clauses as pretty JSON
///
/// # Errors
///
/// Returns `SerializationError` if the filter clauses cannot be encoded
pub fn format_audience_detail(audience: &Audience) -> AppResult<String> {
    let clauses = match audience.filter_clauses.as_deref() {
        Some(clauses) if !clauses.is_empty() => pretty_json(&clauses)?,
        _ => "None".to_owned(),
    };
    let duration = audience
        .membership_duration_days
        .filter(|days| *days != 0)
        .map_or_else(|| "Not specified".to_owned(), |days| days.to_string());

    Ok(format!(
        "Audience Details: {}\n\nID: {}\nDescription: {}\nCreated: {}\nUpdated: {}\nMembership Duration: {duration} days\n\nFilter Clauses:\n{clauses}",
        or_unknown(audience.display_name.as_ref()),
        or_unknown(audience.name.as_ref()),
        audience.description.as_deref().unwrap_or("No description"),
        or_unknown(audience.create_time.as_ref()),
        or_unknown(audience.update_time.as_ref()),
    ))
}

/// Property summary, one field per line
#[must_use]
pub fn format_property(property: &Property) -> String {
    format!(
        "Google Analytics Property Information:\n\nProperty ID: {}\nDisplay Name: {}\nTime Zone: {}\nCurrency: {}\nCreate Time: {}\nUpdate Time: {}\nService Level: {}\nAccount: {}\n",
        or_unknown(property.name.as_ref()),
        or_unknown(property.display_name.as_ref()),
        or_unknown(property.time_zone.as_ref()),
        or_unknown(property.currency_code.as_ref()),
        or_unknown(property.create_time.as_ref()),
        or_unknown(property.update_time.as_ref()),
        or_unknown(property.service_level.as_ref()),
        or_unknown(property.account.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_without_clauses() {
        let audience = Audience {
            name: Some("properties/1/audiences/9".into()),
            display_name: Some("Buyers".into()),
            ..Audience::default()
        };
        let text = format_audience_detail(&audience).unwrap();
        assert!(text.starts_with("Audience Details: Buyers\n\nID: properties/1/audiences/9\n"));
        assert!(text.contains("Description: No description\n"));
        assert!(text.contains("Membership Duration: Not specified days"));
        assert!(text.ends_with("Filter Clauses:\nNone"));
    }

    #[test]
    fn test_empty_list_names_property() {
        let property = PropertyId::parse("42").unwrap();
        assert_eq!(
            format_audience_list(&property, &[]),
            "No audiences found for property: properties/42"
        );
    }
}
