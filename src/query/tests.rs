//! Tests for the query module

use super::*;
use crate::report::{ErrorCode, ErrorKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn raw(value: serde_json::Value) -> RawOptions {
    match value {
        serde_json::Value::Object(map) => RawOptions::from(map),
        other => panic!("expected object, got {other}"),
    }
}

// ============================================================================
// Resource Kind Tests
// ============================================================================

#[test]
fn test_post_resource_fields() {
    let post = QueryType::Post.resource();
    assert_eq!(post.name, "posts");
    assert_eq!(post.field_for(QuerySelector::Id), Some("id"));
    assert_eq!(post.field_for(QuerySelector::Username), Some("username"));
    assert_eq!(post.field_for(QuerySelector::Expression), Some("expression_name"));
    assert_eq!(post.field_for(QuerySelector::Query), Some("q"));
    assert_eq!(
        post.field_for(QuerySelector::ExpressionCreator),
        Some("expression_creator")
    );
}

#[test]
fn test_expression_resource_fields() {
    let expression = QueryType::Expression.resource();
    assert_eq!(expression.name, "expressions");
    assert_eq!(expression.field_for(QuerySelector::Id), Some("id"));
    assert_eq!(expression.field_for(QuerySelector::Username), Some("username"));
    assert_eq!(
        expression.field_for(QuerySelector::Expression),
        Some("expression_name")
    );
    assert_eq!(expression.field_for(QuerySelector::Query), Some("q"));
    assert!(!expression.supports(QuerySelector::ExpressionCreator));
}

#[test]
fn test_names_parse_back() {
    for t in QueryType::ALL {
        assert_eq!(t.as_str().parse::<QueryType>(), Ok(t));
    }
    for sel in QuerySelector::ALL {
        assert_eq!(sel.as_str().parse::<QuerySelector>(), Ok(sel));
    }
    assert!("posts".parse::<QueryType>().is_err());
    assert!("q".parse::<QuerySelector>().is_err());
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_bare_query_normalizes_to_post_search() {
    let normalized = CallShape::from("hello").normalize();
    assert_eq!(
        normalized,
        raw(json!({
            "query": "hello",
            "queryType": "post",
            "querySelector": "query",
            "id": 0
        }))
    );
}

#[test]
fn test_all_shapes_agree() {
    let from_options = CallShape::options(json!({
        "queryType": "post",
        "querySelector": "query",
        "query": "hello"
    }))
    .normalize();
    let from_query = CallShape::query("hello").normalize();
    let from_positional = CallShape::positional("post", "query", "hello").normalize();
    let from_string_options = CallShape::options(json!("hello")).normalize();

    assert_eq!(from_options, from_query);
    assert_eq!(from_query, from_positional);
    assert_eq!(from_positional, from_string_options);
}

#[test]
fn test_positional_id_is_kept() {
    let normalized = CallShape::positional_with_id("post", "username", "alice", 7.0).normalize();
    assert_eq!(
        normalized,
        raw(json!({
            "queryType": "post",
            "querySelector": "username",
            "query": "alice",
            "id": 7
        }))
    );
}

#[test]
fn test_options_record_is_used_as_is() {
    let normalized = CallShape::options(json!({
        "queryType": "expression",
        "querySelector": "username",
        "query": "bob",
        "id": 3,
        "page": 2,
        "perPage": 10,
        "extra": true
    }))
    .normalize();
    assert_eq!(normalized.get("extra"), Some(&json!(true)));
    assert_eq!(normalized.get(KEY_ID), Some(&json!(3)));
    assert_eq!(normalized.get(KEY_PER_PAGE), Some(&json!(10)));
}

#[test_case(json!(null); "null id")]
#[test_case(json!(false); "false id")]
#[test_case(json!(""); "empty string id")]
#[test_case(json!(0); "zero id")]
fn test_falsy_id_defaults_to_zero(id: serde_json::Value) {
    let normalized = CallShape::options(json!({
        "queryType": "post",
        "querySelector": "query",
        "query": "x",
        "id": id
    }))
    .normalize();
    assert_eq!(normalized.get(KEY_ID), Some(&json!(0)));
}

#[test]
fn test_non_object_options_normalize_to_empty() {
    let normalized = CallShape::options(json!([1, 2])).normalize();
    assert_eq!(normalized, raw(json!({"id": 0})));
    assert_eq!(validate(&normalized), Err(ErrorKind::MissingQuery));
}

#[test]
fn test_query_options_round_trip_through_shape() {
    let options = QueryOptions::new(QueryType::Expression, QuerySelector::Id, "42")
        .with_id(5.0)
        .with_page(3.0)
        .with_per_page(20.0);
    let normalized = CallShape::from(options.clone()).normalize();
    assert_eq!(validate(&normalized), Ok(options));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test_case(json!({"queryType": "post", "querySelector": "query"}), ErrorCode::MissingQuery; "missing query")]
#[test_case(json!({"query": "", "queryType": "post", "querySelector": "query"}), ErrorCode::MissingQuery; "empty query")]
#[test_case(json!({"query": "x", "querySelector": "query"}), ErrorCode::MissingQueryType; "missing type")]
#[test_case(json!({"query": "x", "queryType": null, "querySelector": "query"}), ErrorCode::MissingQueryType; "null type")]
#[test_case(json!({"query": "x", "queryType": "post"}), ErrorCode::MissingQuerySelector; "missing selector")]
#[test_case(json!({}), ErrorCode::MissingQuery; "empty record reports query first")]
fn test_missing_fields(options: serde_json::Value, expected: ErrorCode) {
    let normalized = CallShape::options(options).normalize();
    let err = validate(&normalized).unwrap_err();
    assert_eq!(err.code(), expected);
}

#[test_case(json!({"query": 5, "queryType": "post", "querySelector": "query"}), "options.query", "number"; "numeric query")]
#[test_case(json!({"query": "x", "queryType": true, "querySelector": "query"}), "options.queryType", "boolean"; "boolean type")]
#[test_case(json!({"query": "x", "queryType": "post", "querySelector": ["id"]}), "options.querySelector", "object"; "array selector")]
#[test_case(json!({"query": "x", "queryType": "post", "querySelector": "query", "page": "2"}), "options.page", "string"; "string page")]
#[test_case(json!({"query": "x", "queryType": "post", "querySelector": "query", "perPage": "ten"}), "options.perPage", "string"; "string per page")]
#[test_case(json!({"query": "x", "queryType": "post", "querySelector": "query", "id": "abc"}), "options.id", "string"; "string id")]
fn test_wrong_format(options: serde_json::Value, key: &str, found: &str) {
    let normalized = CallShape::options(options).normalize();
    match validate(&normalized).unwrap_err() {
        ErrorKind::WrongFormat {
            key: got_key,
            found: got_found,
            ..
        } => {
            assert_eq!(got_key, key);
            assert_eq!(got_found, found);
        }
        other => panic!("expected WrongFormat, got {other:?}"),
    }
}

#[test]
fn test_missing_checks_run_before_type_checks() {
    let normalized = CallShape::options(json!({"query": 5, "queryType": "post"})).normalize();
    assert_eq!(validate(&normalized), Err(ErrorKind::MissingQuerySelector));
}

#[test]
fn test_falsy_page_overrides_are_ignored() {
    let normalized = CallShape::options(json!({
        "query": "x",
        "queryType": "post",
        "querySelector": "query",
        "page": 0,
        "perPage": null
    }))
    .normalize();
    let options = validate(&normalized).unwrap();
    assert_eq!(options.page, None);
    assert_eq!(options.per_page, None);
}

#[test]
fn test_unknown_query_type() {
    let normalized = CallShape::positional("comment", "id", "1").normalize();
    assert_eq!(
        validate(&normalized),
        Err(ErrorKind::UnknownQueryType {
            value: "comment".to_string()
        })
    );
}

#[test]
fn test_selector_not_supported_by_resource() {
    let normalized = CallShape::positional("expression", "expressionCreator", "bob").normalize();
    assert_eq!(
        validate(&normalized),
        Err(ErrorKind::UnknownQuerySelector {
            query_type: "expression".to_string(),
            value: "expressionCreator".to_string()
        })
    );
}

#[test]
fn test_valid_positional_options() {
    let normalized = CallShape::positional("post", "username", "alice").normalize();
    let options = validate(&normalized).unwrap();
    assert_eq!(
        options,
        QueryOptions::new(QueryType::Post, QuerySelector::Username, "alice")
    );
}

// ============================================================================
// Signature Tests
// ============================================================================

#[test]
fn test_signature_format() {
    let options = QueryOptions::new(QueryType::Post, QuerySelector::Query, "hello");
    assert_eq!(options.signature().as_str(), "0::post::query::hello");

    let scoped = options.clone().with_id(12.0);
    assert_eq!(scoped.signature().to_string(), "12::post::query::hello");
}

#[test]
fn test_signature_ignores_page_overrides() {
    let plain = QueryOptions::new(QueryType::Post, QuerySelector::Username, "alice");
    let paged = plain.clone().with_page(4.0).with_per_page(10.0);
    assert_eq!(plain.signature(), paged.signature());
}
