//! The recursive matching engine.
//!
//! [`Checker::check`] walks a value/schema pair in lock-step, applying at
//! every node, in order: default substitution, the required rule, string
//! coercion, type-set membership, and the kind-specific dispatch (descend
//! into object fields, iterate array elements, or apply the scalar value
//! rule), with an optional final `validate` hook. The first failure aborts
//! the whole traversal.
//!
//! The input value and schema are never modified; a successful check
//! returns a new normalized value tree with defaults and coercions
//! applied.

use serde_json::{Map, Value};

use crate::coerce;
use crate::error::{CheckError, ErrorCode};
use crate::kind::{classify, TypeRegistry};
use crate::matcher::{pipe_match, values_equal};
use crate::path::ValuePath;
use crate::schema::{audit, SchemaNode, ValueRule};
use crate::validator::ValidatorContext;

/// Ambient options threaded through a whole traversal.
///
/// All flags default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Reject object keys not declared in the active field schema.
    pub strict: bool,
    /// Skip default substitution.
    pub ignore_defaults: bool,
    /// Skip required-position enforcement.
    pub ignore_required: bool,
    /// Skip string-to-number/boolean coercion.
    pub no_coerce: bool,
    /// Reject schemas carrying executable validator functions.
    pub untrusted: bool,
}

/// A configured validation engine.
///
/// A `Checker` pairs a set of [`CheckOptions`] with a [`TypeRegistry`];
/// both are fixed at construction, so an instance is statically either
/// trusted or untrusted. Checking shares nothing mutable, so one checker
/// may serve many threads.
///
/// # Example
///
/// ```rust
/// use chek::{Checker, SchemaNode};
/// use serde_json::json;
///
/// let checker = Checker::new().strict();
/// let schema = SchemaNode::new().field("s1", SchemaNode::of_type("string"));
///
/// assert!(checker.check(&json!({"s1": "ok"}), &schema).is_ok());
/// assert!(checker.check(&json!({"oops": 1}), &schema).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Checker {
    options: CheckOptions,
    registry: TypeRegistry,
}

impl Checker {
    /// A checker with default options and an empty type registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A checker with the given options.
    pub fn with_options(options: CheckOptions) -> Self {
        Self {
            options,
            registry: TypeRegistry::new(),
        }
    }

    /// Replaces the type registry used for type-set membership.
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enables strict mode: unrecognized object keys fail.
    pub fn strict(mut self) -> Self {
        self.options.strict = true;
        self
    }

    /// Disables default substitution.
    pub fn ignore_defaults(mut self) -> Self {
        self.options.ignore_defaults = true;
        self
    }

    /// Disables required-position enforcement.
    pub fn ignore_required(mut self) -> Self {
        self.options.ignore_required = true;
        self
    }

    /// Disables string-to-scalar coercion.
    pub fn no_coerce(mut self) -> Self {
        self.options.no_coerce = true;
        self
    }

    /// Marks the schema source as untrusted: schemas carrying validator
    /// functions are rejected before any value is examined.
    pub fn untrusted(mut self) -> Self {
        self.options.untrusted = true;
        self
    }

    /// The options this checker was built with.
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks a value against a schema.
    ///
    /// On success returns the normalized value: a new tree with defaults
    /// substituted and declared string scalars coerced. On failure returns
    /// the first [`CheckError`] encountered in traversal order; nothing
    /// past that position is visited. Neither input is modified.
    pub fn check(&self, value: &Value, schema: &SchemaNode) -> Result<Value, CheckError> {
        let root_path = ValuePath::root();
        audit(schema, self.options.untrusted, &root_path)?;

        let walk = Walk {
            options: &self.options,
            registry: &self.registry,
            root: value,
        };
        let checked = walk.node(Some(value), schema, &root_path, self.options.strict)?;
        Ok(checked.unwrap_or_else(|| value.clone()))
    }
}

/// Checks a value with a default [`Checker`].
///
/// # Example
///
/// ```rust
/// use chek::{ErrorCode, SchemaNode, check};
/// use serde_json::json;
///
/// let schema = SchemaNode::new()
///     .field("s1", SchemaNode::of_type("string").one_of("foo|bar|baz"));
///
/// let err = check(&json!({"s1": "qux"}), &schema).unwrap_err();
/// assert_eq!(err.code, ErrorCode::BadValue);
/// ```
pub fn check(value: &Value, schema: &SchemaNode) -> Result<Value, CheckError> {
    Checker::new().check(value, schema)
}

/// One traversal's shared state: options, registry, and the root value
/// exposed to validators for cross-field checks.
struct Walk<'a> {
    options: &'a CheckOptions,
    registry: &'a TypeRegistry,
    root: &'a Value,
}

impl Walk<'_> {
    /// Checks one slot against one node.
    ///
    /// `slot` is `None` when the position is absent (as opposed to
    /// present-but-null). Returns the normalized value for the slot, or
    /// `None` when it is still absent after defaulting.
    fn node(
        &self,
        slot: Option<&Value>,
        node: &SchemaNode,
        path: &ValuePath,
        strict: bool,
    ) -> Result<Option<Value>, CheckError> {
        // Defaults fill absent slots only; null is never overridden.
        let mut current: Option<Value> = match slot {
            Some(v) => Some(v.clone()),
            None if !self.options.ignore_defaults => node.default.clone(),
            None => None,
        };

        if !self.options.ignore_required
            && node.required
            && !matches!(current, Some(ref v) if !v.is_null())
        {
            return Err(CheckError::new(
                ErrorCode::MissingParam,
                path.clone(),
                "required value is missing or null",
            ));
        }

        if !self.options.no_coerce {
            if let (Some(Value::String(raw)), Some(target)) =
                (&current, coerce::target(node.kind.as_deref()))
            {
                let coerced = coerce::coerce(raw, target);
                current = Some(coerced);
            }
        }

        if let (Some(kind_set), Some(value)) = (&node.kind, &current) {
            if !value.is_null() && !self.registry.in_set(value, kind_set) {
                return Err(CheckError::new(
                    ErrorCode::BadType,
                    path.clone(),
                    "type not allowed by schema",
                )
                .with_got(classify(value).name())
                .with_expected(kind_set.clone()));
            }
        }

        // Local strict always beats the inherited setting, and the local
        // choice becomes ambient for everything beneath this node.
        let strict = node.strict.unwrap_or(strict);

        let checked = match current {
            Some(Value::Object(map)) => Some(self.object(&map, node, path, strict)?),
            Some(Value::Array(items)) => Some(self.array(&items, node, path, strict)?),
            other => self.scalar(other, node, path)?,
        };

        if let (Some(validator), Some(value)) = (&node.validate, &checked) {
            let ctx = ValidatorContext {
                root: self.root,
                path,
            };
            validator.invoke(value, &ctx)?;
        }

        Ok(checked)
    }

    /// Object dispatch: strict scan, per-field defaults and required,
    /// then recursion into each present key with a field node.
    fn object(
        &self,
        map: &Map<String, Value>,
        node: &SchemaNode,
        path: &ValuePath,
        strict: bool,
    ) -> Result<Value, CheckError> {
        let empty = indexmap::IndexMap::new();
        let fields = match &node.rule {
            Some(ValueRule::Fields(f)) => f,
            _ => &empty,
        };

        if strict {
            for key in map.keys() {
                if !fields.contains_key(key) {
                    return Err(CheckError::new(
                        ErrorCode::BadParam,
                        path.push_field(key),
                        format!("unrecognized key '{}'", key),
                    ));
                }
            }
        }

        let mut out = map.clone();

        for (name, field) in fields {
            if !self.options.ignore_defaults && !out.contains_key(name) {
                if let Some(default) = &field.default {
                    out.insert(name.clone(), default.clone());
                }
            }

            if !self.options.ignore_required
                && field.required
                && !matches!(out.get(name), Some(v) if !v.is_null())
            {
                return Err(CheckError::new(
                    ErrorCode::MissingParam,
                    path.push_field(name),
                    format!("required field '{}' is missing or null", name),
                ));
            }
        }

        for (name, field) in fields {
            if let Some(present) = out.get(name) {
                let field_path = path.push_field(name);
                if let Some(checked) = self.node(Some(present), field, &field_path, strict)? {
                    out.insert(name.clone(), checked);
                }
            }
        }

        Ok(Value::Object(out))
    }

    /// Array dispatch: apply the element schema in index order.
    fn array(
        &self,
        items: &[Value],
        node: &SchemaNode,
        path: &ValuePath,
        strict: bool,
    ) -> Result<Value, CheckError> {
        let element = match &node.rule {
            Some(ValueRule::Element(element)) => element,
            _ => return Ok(Value::Array(items.to_vec())),
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            let checked = self.node(Some(item), element, &item_path, strict)?;
            out.push(checked.unwrap_or(Value::Null));
        }
        Ok(Value::Array(out))
    }

    /// Scalar dispatch: null and absent always pass (required was already
    /// enforced); otherwise apply the node's value rule.
    fn scalar(
        &self,
        current: Option<Value>,
        node: &SchemaNode,
        path: &ValuePath,
    ) -> Result<Option<Value>, CheckError> {
        let value = match current {
            Some(v) if !v.is_null() => v,
            other => return Ok(other),
        };

        match &node.rule {
            None => {}
            Some(ValueRule::Check(validator)) => {
                let ctx = ValidatorContext {
                    root: self.root,
                    path,
                };
                validator.invoke(&value, &ctx)?;
            }
            Some(ValueRule::OneOf(tokens)) => {
                let matched = value
                    .as_str()
                    .map(|s| pipe_match(s, tokens))
                    .unwrap_or(false);
                if !matched {
                    return Err(CheckError::new(
                        ErrorCode::BadValue,
                        path.clone(),
                        "value not in allowed set",
                    )
                    .with_got(value.to_string())
                    .with_expected(tokens.clone()));
                }
            }
            Some(ValueRule::Exact(expected)) => {
                if !values_equal(&value, expected) {
                    return Err(CheckError::new(
                        ErrorCode::BadValue,
                        path.clone(),
                        "value does not match exactly",
                    )
                    .with_got(value.to_string())
                    .with_expected(expected.to_string()));
                }
            }
            Some(ValueRule::Fields(_)) | Some(ValueRule::Element(_)) => {
                return Err(CheckError::new(
                    ErrorCode::BadSchema,
                    path.clone(),
                    "structural value rule applied to a scalar",
                )
                .with_got(classify(&value).name()));
            }
        }

        Ok(Some(value))
    }
}
