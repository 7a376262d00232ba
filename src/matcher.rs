//! Membership and equality predicates used by the engine.

use serde_json::Value;

/// True iff `candidate` equals one token of `tokens` split on `'|'`.
///
/// Used both for type-set membership (candidate is a type name) and for
/// string enums (candidate is the value itself).
pub(crate) fn pipe_match(candidate: &str, tokens: &str) -> bool {
    tokens.split('|').any(|token| token == candidate)
}

/// Strict value equality for exact-match constraints.
///
/// Numbers compare numerically so `1` and `1.0` are equal regardless of
/// their serde_json representation; everything else compares structurally.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pipe_match_tokens() {
        assert!(pipe_match("bar", "foo|bar|baz"));
        assert!(pipe_match("foo", "foo"));
        assert!(!pipe_match("qux", "foo|bar|baz"));
    }

    #[test]
    fn test_pipe_match_is_exact() {
        assert!(!pipe_match("ba", "foo|bar"));
        assert!(!pipe_match("foo|bar", "foo|bar"));
        assert!(!pipe_match("FOO", "foo"));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(values_equal(&json!(-3), &json!(-3)));
        assert!(!values_equal(&json!(1), &json!(2)));
    }

    #[test]
    fn test_booleans_compare_by_value() {
        assert!(values_equal(&json!(true), &json!(true)));
        assert!(!values_equal(&json!(true), &json!(false)));
        // No cross-type equality.
        assert!(!values_equal(&json!(1), &json!(true)));
    }
}
