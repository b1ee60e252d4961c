// ABOUTME: ga:// URI templates with {variable} segments and matching against concrete URIs
// ABOUTME: Variables capture raw segment text, empty segments included
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::collections::HashMap;

/// Scheme prefix shared by every resource
pub const SCHEME: &str = "ga://";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// Parsed `ga://` URI template such as `ga://audiences/{propertyId}/{audienceId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    template: &'static str,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parse a template; text outside the scheme is split on `/`
    #[must_use]
    pub fn parse(template: &'static str) -> Self {
        let path = template.strip_prefix(SCHEME).unwrap_or(template);
        let segments = path
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                    .map_or_else(
                        || Segment::Literal(segment.to_owned()),
                        |name| Segment::Variable(name.to_owned()),
                    )
            })
            .collect();
        Self { template, segments }
    }

    /// Original template text
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.template
    }

    /// Whether the template has no variables
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Match a concrete URI, returning the captured variables
    #[must_use]
    pub fn matches(&self, uri: &str) -> Option<UriParams> {
        let path = uri.strip_prefix(SCHEME)?;
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable(name) => {
                    params.insert(name.clone(), part.to_owned());
                }
            }
        }
        Some(UriParams(params))
    }
}

/// Variables captured from a URI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriParams(HashMap<String, String>);

impl UriParams {
    /// Captured text; empty when the variable is absent or the segment was empty
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    /// Captured text, `None` for empty segments
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        Some(self.get(name)).filter(|value| !value.is_empty())
    }
}
