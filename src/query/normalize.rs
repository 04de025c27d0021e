//! Call shape normalization and options validation
//!
//! A request can be described three ways: a full options record, a bare
//! search term, or positional `(type, selector, query[, id])` arguments.
//! Each collapses into one canonical [`RawOptions`] record, which
//! [`validate`] then turns into typed [`QueryOptions`].

use super::types::{QueryOptions, QuerySelector, QueryType};
use crate::report::ErrorKind;
use crate::types::{is_truthy, type_name, JsonObject, JsonValue};
use serde_json::Value;

/// Options record key for the query type
pub const KEY_QUERY_TYPE: &str = "queryType";
/// Options record key for the query selector
pub const KEY_QUERY_SELECTOR: &str = "querySelector";
/// Options record key for the search term
pub const KEY_QUERY: &str = "query";
/// Options record key for the scoping id
pub const KEY_ID: &str = "id";
/// Options record key for the page override
pub const KEY_PAGE: &str = "page";
/// Options record key for the page size override
pub const KEY_PER_PAGE: &str = "perPage";

// ============================================================================
// Raw Options
// ============================================================================

/// Canonical, not yet validated options record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions(JsonObject);

impl RawOptions {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Set a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> JsonValue {
        Value::Object(self.0)
    }

    /// A field, if it is present and truthy
    fn present(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key).filter(|v| is_truthy(v))
    }
}

impl From<JsonObject> for RawOptions {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

impl From<&QueryOptions> for RawOptions {
    fn from(options: &QueryOptions) -> Self {
        let mut raw = RawOptions::new();
        raw.insert(KEY_QUERY_TYPE, options.query_type.as_str());
        raw.insert(KEY_QUERY_SELECTOR, options.query_selector.as_str());
        raw.insert(KEY_QUERY, options.query.clone());
        raw.insert(KEY_ID, number_value(options.id));
        if let Some(page) = options.page {
            raw.insert(KEY_PAGE, number_value(page));
        }
        if let Some(per_page) = options.per_page {
            raw.insert(KEY_PER_PAGE, number_value(per_page));
        }
        raw
    }
}

/// JSON number for an f64, keeping integral values integral
fn number_value(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

// ============================================================================
// Call Shapes
// ============================================================================

/// The accepted ways of describing a request
#[derive(Debug, Clone, PartialEq)]
pub enum CallShape {
    /// A full options record, used as given
    Options(JsonValue),
    /// A bare search term; searches posts by free text
    Query(String),
    /// Positional `(queryType, querySelector, query[, id])`
    Positional {
        query_type: JsonValue,
        query_selector: JsonValue,
        query: JsonValue,
        id: Option<f64>,
    },
}

impl CallShape {
    /// Describe a request with an options record
    pub fn options(options: impl Into<JsonValue>) -> Self {
        Self::Options(options.into())
    }

    /// Describe a free-text post search
    pub fn query(query: impl Into<String>) -> Self {
        Self::Query(query.into())
    }

    /// Describe a request with positional arguments
    pub fn positional(
        query_type: impl Into<JsonValue>,
        query_selector: impl Into<JsonValue>,
        query: impl Into<JsonValue>,
    ) -> Self {
        Self::Positional {
            query_type: query_type.into(),
            query_selector: query_selector.into(),
            query: query.into(),
            id: None,
        }
    }

    /// Describe a request with positional arguments and an explicit id
    pub fn positional_with_id(
        query_type: impl Into<JsonValue>,
        query_selector: impl Into<JsonValue>,
        query: impl Into<JsonValue>,
        id: f64,
    ) -> Self {
        Self::Positional {
            query_type: query_type.into(),
            query_selector: query_selector.into(),
            query: query.into(),
            id: Some(id),
        }
    }

    /// Collapse into the canonical options record.
    ///
    /// A falsy or missing `id` becomes `0`. A string passed as an options
    /// record is treated as a bare search term; any other non-object record
    /// normalizes to an empty one.
    pub fn normalize(self) -> RawOptions {
        let mut raw = match self {
            CallShape::Options(Value::Object(map)) => RawOptions::from(map),
            CallShape::Options(Value::String(query)) | CallShape::Query(query) => {
                let mut raw = RawOptions::new();
                raw.insert(KEY_QUERY, query);
                raw.insert(KEY_QUERY_TYPE, QueryType::Post.as_str());
                raw.insert(KEY_QUERY_SELECTOR, QuerySelector::Query.as_str());
                raw
            }
            CallShape::Options(_) => RawOptions::new(),
            CallShape::Positional {
                query_type,
                query_selector,
                query,
                id,
            } => {
                let mut raw = RawOptions::new();
                raw.insert(KEY_QUERY_TYPE, query_type);
                raw.insert(KEY_QUERY_SELECTOR, query_selector);
                raw.insert(KEY_QUERY, query);
                if let Some(id) = id {
                    raw.insert(KEY_ID, number_value(id));
                }
                raw
            }
        };

        if raw.present(KEY_ID).is_none() {
            raw.insert(KEY_ID, 0);
        }
        raw
    }
}

impl From<&str> for CallShape {
    fn from(query: &str) -> Self {
        Self::Query(query.to_string())
    }
}

impl From<String> for CallShape {
    fn from(query: String) -> Self {
        Self::Query(query)
    }
}

impl From<JsonValue> for CallShape {
    fn from(options: JsonValue) -> Self {
        Self::Options(options)
    }
}

impl From<RawOptions> for CallShape {
    fn from(options: RawOptions) -> Self {
        Self::Options(options.into_value())
    }
}

impl From<QueryOptions> for CallShape {
    fn from(options: QueryOptions) -> Self {
        RawOptions::from(&options).into()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a canonical record.
///
/// Checks run in a fixed order and the first failure wins: missing fields,
/// then field types, then the resource/selector enumeration.
pub fn validate(raw: &RawOptions) -> Result<QueryOptions, ErrorKind> {
    let query = raw.present(KEY_QUERY).ok_or(ErrorKind::MissingQuery)?;
    let query_type = raw
        .present(KEY_QUERY_TYPE)
        .ok_or(ErrorKind::MissingQueryType)?;
    let query_selector = raw
        .present(KEY_QUERY_SELECTOR)
        .ok_or(ErrorKind::MissingQuerySelector)?;

    let query = expect_string(KEY_QUERY, query)?;
    let query_type = expect_string(KEY_QUERY_TYPE, query_type)?;
    let query_selector = expect_string(KEY_QUERY_SELECTOR, query_selector)?;

    let page = optional_number(raw, KEY_PAGE)?;
    let per_page = optional_number(raw, KEY_PER_PAGE)?;
    let id = optional_number(raw, KEY_ID)?.unwrap_or(0.0);

    let query_type: QueryType = query_type
        .parse()
        .map_err(|_| ErrorKind::UnknownQueryType {
            value: query_type.to_string(),
        })?;
    let query_selector = query_selector
        .parse::<QuerySelector>()
        .ok()
        .filter(|sel| query_type.resource().supports(*sel))
        .ok_or_else(|| ErrorKind::UnknownQuerySelector {
            query_type: query_type.to_string(),
            value: query_selector.to_string(),
        })?;

    Ok(QueryOptions {
        query_type,
        query_selector,
        query: query.to_string(),
        id,
        page,
        per_page,
    })
}

fn expect_string<'a>(key: &str, value: &'a JsonValue) -> Result<&'a str, ErrorKind> {
    value.as_str().ok_or_else(|| {
        ErrorKind::wrong_format(format!("options.{key}"), "String", type_name(value))
    })
}

fn optional_number(raw: &RawOptions, key: &str) -> Result<Option<f64>, ErrorKind> {
    match raw.present(key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(ErrorKind::wrong_format(
            format!("options.{key}"),
            "Number",
            type_name(other),
        )),
    }
}
