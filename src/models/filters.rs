// ABOUTME: Recursive filter expression tree used by report filters and audience clauses
// ABOUTME: Mirrors the Data API FilterExpression one-of as a tagged Rust enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A boolean tree of leaf filters.
///
/// Serialises as the upstream one-of object, e.g.
/// `{"andGroup": {"expressions": [...]}}` or `{"filter": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    /// Every child expression must match
    AndGroup(FilterExpressionList),
    /// At least one child expression must match
    OrGroup(FilterExpressionList),
    /// The child expression must not match
    NotExpression(Box<FilterExpression>),
    /// A leaf filter on one field
    Filter(Filter),
}

/// Children of an AND or OR group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterExpressionList {
    /// Child expressions
    #[serde(default)]
    pub expressions: Vec<FilterExpression>,
}

/// Leaf filter: a field name plus exactly one filter kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Dimension or metric the filter applies to
    pub field_name: String,
    /// The comparison to perform
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// The comparison performed by a leaf filter.
///
/// Leaf kinds this server does not model, or typed kinds carrying values it
/// does not recognise, fall through to `Other` and are forwarded as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// String comparison
    StringFilter(StringFilter),
    /// Membership in a list of strings
    InListFilter(InListFilter),
    /// Numeric comparison
    NumericFilter(NumericFilter),
    /// Inclusive numeric range
    BetweenFilter(BetweenFilter),
    /// Field is empty or unset
    EmptyFilter(EmptyFilter),
    /// Any other leaf kind, kept verbatim
    #[serde(untagged)]
    Other(Map<String, Value>),
}

/// Matches empty values; carries no settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmptyFilter {}

/// String comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    /// How `value` is compared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    /// Value to compare against
    pub value: String,
    /// Case-sensitive comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

/// String match kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Exact match
    Exact,
    /// Prefix match
    BeginsWith,
    /// Suffix match
    EndsWith,
    /// Substring match
    Contains,
    /// Whole value matches the regular expression
    FullRegexp,
    /// Part of the value matches the regular expression
    PartialRegexp,
}

/// Membership in a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InListFilter {
    /// Accepted values
    pub values: Vec<String>,
    /// Case-sensitive comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

/// Numeric comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericFilter {
    /// Comparison operator
    pub operation: NumericOperation,
    /// Right-hand side
    pub value: NumericValue,
}

/// Numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericOperation {
    /// `==`
    Equal,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
}

/// Number as sent upstream: int64 travels as a decimal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NumericValue {
    /// Integer value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int64_value: Option<String>,
    /// Floating point value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
}

/// Inclusive numeric range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenFilter {
    /// Lower bound
    pub from_value: NumericValue,
    /// Upper bound
    pub to_value: NumericValue,
}
