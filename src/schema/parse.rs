//! Parsing schemas from their JSON notation.
//!
//! Schemas are often authored as plain data:
//!
//! ```json
//! {
//!   "s1": {"type": "string", "required": true},
//!   "o1": {"type": "object", "value": {"n1": {"type": "number"}}}
//! }
//! ```
//!
//! An object whose keys are all reserved schema attributes is a single
//! node; any other key makes the whole object a field map. Malformed
//! shapes fail with `badSchema` at parse time, before any value check.
//! Validator functions cannot be expressed in data; attach them through
//! the [`SchemaNode`] builder instead.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{CheckError, ErrorCode};
use crate::path::ValuePath;

use super::node::{SchemaNode, ValueRule};

const RESERVED_KEYS: [&str; 6] = ["type", "required", "default", "value", "strict", "validate"];

impl SchemaNode {
    /// Parses a schema from its JSON notation.
    ///
    /// # Errors
    ///
    /// Returns a `badSchema` error for any shape the notation does not
    /// allow: a non-object schema, a non-string `type`, a non-boolean
    /// `required`/`strict`, a `value` inconsistent with the declared
    /// type, or a `validate` key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chek::{SchemaNode, check};
    /// use serde_json::json;
    ///
    /// let schema = SchemaNode::from_value(&json!({
    ///     "s1": {"type": "string", "value": "foo|bar|baz"}
    /// }))
    /// .unwrap();
    ///
    /// assert!(check(&json!({"s1": "bar"}), &schema).is_ok());
    /// assert!(check(&json!({"s1": "qux"}), &schema).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, CheckError> {
        parse_schema(value, &ValuePath::root())
    }
}

fn parse_schema(value: &Value, path: &ValuePath) -> Result<SchemaNode, CheckError> {
    let obj = value
        .as_object()
        .ok_or_else(|| bad_schema(path, "schema must be an object", value))?;

    if obj.keys().any(|k| !RESERVED_KEYS.contains(&k.as_str())) {
        // Duck typing from the original notation: unreserved keys mean
        // the whole object is a field map.
        let fields = parse_fields(value, path)?;
        return Ok(SchemaNode::new().fields(fields));
    }

    parse_node(value, path)
}

fn parse_node(value: &Value, path: &ValuePath) -> Result<SchemaNode, CheckError> {
    let obj = value
        .as_object()
        .ok_or_else(|| bad_schema(path, "schema node must be an object", value))?;

    let mut node = SchemaNode::new();

    if let Some(kind) = obj.get("type") {
        match kind.as_str() {
            Some(k) => node.kind = Some(k.to_string()),
            None => return Err(bad_schema(path, "'type' must be a string", kind)),
        }
    }

    if let Some(required) = obj.get("required") {
        match required.as_bool() {
            Some(r) => node.required = r,
            None => return Err(bad_schema(path, "'required' must be a boolean", required)),
        }
    }

    if let Some(strict) = obj.get("strict") {
        match strict.as_bool() {
            Some(s) => node.strict = Some(s),
            None => return Err(bad_schema(path, "'strict' must be a boolean", strict)),
        }
    }

    if let Some(default) = obj.get("default") {
        node.default = Some(default.clone());
    }

    if obj.contains_key("validate") {
        return Err(bad_schema(
            path,
            "'validate' cannot be expressed in data; use the builder",
            &Value::Null,
        ));
    }

    if let Some(rule_value) = obj.get("value") {
        let rule = parse_rule(rule_value, node.kind.as_deref(), path)?;
        node.rule = Some(rule);
    }

    Ok(node)
}

/// Interprets a `value` slot by the node's declared type, mirroring the
/// original dispatch: object type takes a field map, array type takes an
/// element node, strings are enums, numbers and booleans exact matches.
fn parse_rule(
    rule_value: &Value,
    kind: Option<&str>,
    path: &ValuePath,
) -> Result<ValueRule, CheckError> {
    match rule_value {
        Value::String(tokens) => Ok(ValueRule::OneOf(tokens.clone())),
        Value::Number(_) | Value::Bool(_) => Ok(ValueRule::Exact(rule_value.clone())),
        Value::Object(_) => {
            let declares = |name| kind.map(|k| k.split('|').any(|t| t == name)).unwrap_or(false);
            if declares("object") {
                let nested = path.push_field("value");
                Ok(ValueRule::Fields(parse_fields(rule_value, &nested)?))
            } else if declares("array") {
                let nested = path.push_field("value");
                Ok(ValueRule::Element(Box::new(parse_schema(
                    rule_value, &nested,
                )?)))
            } else {
                Err(bad_schema(
                    path,
                    "object-shaped 'value' requires an object or array type",
                    rule_value,
                ))
            }
        }
        _ => Err(bad_schema(
            path,
            "'value' must be a string, number, boolean, or object",
            rule_value,
        )),
    }
}

fn parse_fields(
    value: &Value,
    path: &ValuePath,
) -> Result<IndexMap<String, SchemaNode>, CheckError> {
    let obj = value
        .as_object()
        .ok_or_else(|| bad_schema(path, "field schema must be an object", value))?;

    let mut fields = IndexMap::new();
    for (name, field_value) in obj {
        let field_path = path.push_field(name);
        fields.insert(name.clone(), parse_node(field_value, &field_path)?);
    }
    Ok(fields)
}

fn bad_schema(path: &ValuePath, message: &str, got: &Value) -> CheckError {
    CheckError::new(ErrorCode::BadSchema, path.clone(), message).with_got(got.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_schema_rejected() {
        let err = SchemaNode::from_value(&json!("nope")).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadSchema);
    }

    #[test]
    fn test_reserved_only_parses_as_node() {
        let node = SchemaNode::from_value(&json!({"type": "string", "required": true})).unwrap();
        assert_eq!(node.type_set(), Some("string"));
        assert!(node.is_required());
        assert!(node.rule().is_none());
    }

    #[test]
    fn test_unreserved_keys_parse_as_field_map() {
        let node = SchemaNode::from_value(&json!({
            "s1": {"type": "string"},
            "n1": {"type": "number", "default": 3}
        }))
        .unwrap();

        match node.rule() {
            Some(ValueRule::Fields(fields)) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields["n1"].default_value(), Some(&json!(3)));
            }
            other => panic!("expected field map, got {:?}", other),
        }
    }

    #[test]
    fn test_value_dispatch_by_type() {
        let object = SchemaNode::from_value(&json!({
            "type": "object",
            "value": {"a": {"type": "string"}}
        }))
        .unwrap();
        assert!(matches!(object.rule(), Some(ValueRule::Fields(_))));

        let array = SchemaNode::from_value(&json!({
            "type": "array",
            "value": {"type": "string"}
        }))
        .unwrap();
        assert!(matches!(array.rule(), Some(ValueRule::Element(_))));

        let one_of = SchemaNode::from_value(&json!({"type": "string", "value": "a|b"})).unwrap();
        assert!(matches!(one_of.rule(), Some(ValueRule::OneOf(_))));

        let exact = SchemaNode::from_value(&json!({"type": "number", "value": 42})).unwrap();
        assert!(matches!(exact.rule(), Some(ValueRule::Exact(_))));
    }

    #[test]
    fn test_object_value_needs_container_type() {
        let err = SchemaNode::from_value(&json!({
            "type": "string",
            "value": {"a": {"type": "string"}}
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadSchema);
    }

    #[test]
    fn test_bad_attribute_shapes() {
        assert!(SchemaNode::from_value(&json!({"type": 7})).is_err());
        assert!(SchemaNode::from_value(&json!({"required": "yes"})).is_err());
        assert!(SchemaNode::from_value(&json!({"strict": 1})).is_err());
        assert!(SchemaNode::from_value(&json!({"value": [1, 2]})).is_err());
        assert!(SchemaNode::from_value(&json!({"validate": "fn"})).is_err());
    }

    #[test]
    fn test_error_path_points_into_schema() {
        let err = SchemaNode::from_value(&json!({
            "o1": {"type": "object", "value": {"bad": {"type": 9}}}
        }))
        .unwrap_err();
        assert_eq!(err.path.to_string(), "o1.value.bad");
    }
}
