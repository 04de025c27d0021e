//! Query types
//!
//! The closed set of queryable resources and their selectors, and the
//! validated options record a cursor is keyed by.

use crate::types::format_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Query Type
// ============================================================================

/// The kind of resource being queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryType {
    Post,
    Expression,
}

impl QueryType {
    /// All query types
    pub const ALL: [QueryType; 2] = [QueryType::Post, QueryType::Expression];

    /// Name used in options records
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::Post => "post",
            QueryType::Expression => "expression",
        }
    }

    /// Static resource definition for this type
    pub fn resource(self) -> &'static ResourceKind {
        match self {
            QueryType::Post => &POST_RESOURCE,
            QueryType::Expression => &EXPRESSION_RESOURCE,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown query type: {s}"))
    }
}

// ============================================================================
// Query Selector
// ============================================================================

/// What a query term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuerySelector {
    Id,
    Username,
    Expression,
    /// Free-text search
    Query,
    ExpressionCreator,
}

impl QuerySelector {
    /// All selectors
    pub const ALL: [QuerySelector; 5] = [
        QuerySelector::Id,
        QuerySelector::Username,
        QuerySelector::Expression,
        QuerySelector::Query,
        QuerySelector::ExpressionCreator,
    ];

    /// Name used in options records
    pub fn as_str(self) -> &'static str {
        match self {
            QuerySelector::Id => "id",
            QuerySelector::Username => "username",
            QuerySelector::Expression => "expression",
            QuerySelector::Query => "query",
            QuerySelector::ExpressionCreator => "expressionCreator",
        }
    }
}

impl fmt::Display for QuerySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuerySelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuerySelector::ALL
            .into_iter()
            .find(|sel| sel.as_str() == s)
            .ok_or_else(|| format!("unknown query selector: {s}"))
    }
}

// ============================================================================
// Resource Kinds
// ============================================================================

/// A queryable collection and the wire fields its selectors filter on
#[derive(Debug)]
pub struct ResourceKind {
    /// Collection name in the URL path, e.g. `posts`
    pub name: &'static str,
    /// Selector to wire field mapping
    pub selectors: &'static [(QuerySelector, &'static str)],
}

impl ResourceKind {
    /// Wire field for a selector, if this resource supports it
    pub fn field_for(&self, selector: QuerySelector) -> Option<&'static str> {
        self.selectors
            .iter()
            .find(|(sel, _)| *sel == selector)
            .map(|(_, field)| *field)
    }

    /// Whether this resource can be filtered by the selector
    pub fn supports(&self, selector: QuerySelector) -> bool {
        self.field_for(selector).is_some()
    }
}

static POST_RESOURCE: ResourceKind = ResourceKind {
    name: "posts",
    selectors: &[
        (QuerySelector::Id, "id"),
        (QuerySelector::Username, "username"),
        (QuerySelector::Expression, "expression_name"),
        (QuerySelector::Query, "q"),
        (QuerySelector::ExpressionCreator, "expression_creator"),
    ],
};

static EXPRESSION_RESOURCE: ResourceKind = ResourceKind {
    name: "expressions",
    selectors: &[
        (QuerySelector::Id, "id"),
        (QuerySelector::Username, "username"),
        (QuerySelector::Expression, "expression_name"),
        (QuerySelector::Query, "q"),
    ],
};

// ============================================================================
// Validated Options
// ============================================================================

/// A validated query request
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub query_type: QueryType,
    pub query_selector: QuerySelector,
    /// Search term
    pub query: String,
    /// Scoping id, 0 when none was given
    pub id: f64,
    /// Page to jump to before fetching
    pub page: Option<f64>,
    /// Page size to apply before fetching
    pub per_page: Option<f64>,
}

impl QueryOptions {
    /// Create options with no id and no page overrides
    pub fn new(
        query_type: QueryType,
        query_selector: QuerySelector,
        query: impl Into<String>,
    ) -> Self {
        Self {
            query_type,
            query_selector,
            query: query.into(),
            id: 0.0,
            page: None,
            per_page: None,
        }
    }

    /// Set the id
    #[must_use]
    pub fn with_id(mut self, id: f64) -> Self {
        self.id = id;
        self
    }

    /// Set the page override
    #[must_use]
    pub fn with_page(mut self, page: f64) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size override
    #[must_use]
    pub fn with_per_page(mut self, per_page: f64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Cache key for this query; page overrides do not take part
    pub fn signature(&self) -> QuerySignature {
        QuerySignature(format!(
            "{}::{}::{}::{}",
            format_number(self.id),
            self.query_type,
            self.query_selector,
            self.query
        ))
    }
}

/// Cache key identifying one distinct query
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuerySignature(String);

impl QuerySignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
