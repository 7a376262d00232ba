//! Strict-mode behavior: unrecognized keys, local overrides, inheritance.

use chek::{check, Checker, ErrorCode, SchemaNode};
use serde_json::json;

fn user_schema() -> SchemaNode {
    SchemaNode::new()
        .field("name", SchemaNode::of_type("string"))
        .field(
            "address",
            SchemaNode::of_type("object")
                .field("city", SchemaNode::of_type("string")),
        )
}

#[test]
fn test_strict_rejects_unrecognized_keys() {
    let strict = Checker::new().strict();

    let err = strict
        .check(&json!({"name": "a", "extra": 1}), &user_schema())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadParam);
    assert_eq!(err.path.to_string(), "extra");
    assert!(err.message.contains("extra"));
}

#[test]
fn test_default_mode_allows_unrecognized_keys() {
    assert!(check(&json!({"name": "a", "extra": 1}), &user_schema()).is_ok());
}

#[test]
fn test_strict_inherits_into_nested_objects() {
    let strict = Checker::new().strict();

    let err = strict
        .check(
            &json!({"name": "a", "address": {"city": "x", "planet": "mars"}}),
            &user_schema(),
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadParam);
    assert_eq!(err.path.to_string(), "address.planet");
}

#[test]
fn test_local_strict_off_overrides_ambient_on() {
    let schema = SchemaNode::new().field("name", SchemaNode::of_type("string")).field(
        "meta",
        SchemaNode::of_type("object")
            .strict(false)
            .field("known", SchemaNode::of_type("string")),
    );

    let strict = Checker::new().strict();
    let out = strict
        .check(&json!({"name": "a", "meta": {"anything": 1}}), &schema)
        .unwrap();
    assert_eq!(out["meta"]["anything"], json!(1));
}

#[test]
fn test_local_strict_on_overrides_ambient_off() {
    let schema = SchemaNode::new().field(
        "meta",
        SchemaNode::of_type("object")
            .strict(true)
            .field("known", SchemaNode::of_type("string")),
    );

    let err = check(&json!({"meta": {"unknown": 1}}), &schema).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadParam);
    assert_eq!(err.path.to_string(), "meta.unknown");
}

#[test]
fn test_local_override_does_not_leak_to_siblings() {
    let schema = SchemaNode::new()
        .field(
            "loose",
            SchemaNode::of_type("object").strict(false),
        )
        .field(
            "tight",
            SchemaNode::of_type("object").field("k", SchemaNode::of_type("string")),
        );

    let strict = Checker::new().strict();
    // The loose node's override applies only to itself; the sibling still
    // inherits the ambient flag.
    let err = strict
        .check(
            &json!({"loose": {"a": 1}, "tight": {"oops": 2}}),
            &schema,
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadParam);
    assert_eq!(err.path.to_string(), "tight.oops");
}

#[test]
fn test_strict_propagates_into_array_elements() {
    let schema = SchemaNode::new().field(
        "items",
        SchemaNode::of_type("array").element(
            SchemaNode::of_type("object").field("id", SchemaNode::of_type("number")),
        ),
    );

    let strict = Checker::new().strict();
    let err = strict
        .check(&json!({"items": [{"id": 1}, {"id": 2, "x": 3}]}), &schema)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadParam);
    assert_eq!(err.path.to_string(), "items[1].x");

    // Without the ambient flag the same value passes.
    assert!(check(&json!({"items": [{"id": 2, "x": 3}]}), &schema).is_ok());
}

#[test]
fn test_strict_object_without_field_schema_rejects_everything() {
    let schema = SchemaNode::new().field("meta", SchemaNode::of_type("object").strict(true));

    let err = check(&json!({"meta": {"a": 1}}), &schema).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadParam);

    assert!(check(&json!({"meta": {}}), &schema).is_ok());
}
