//! The schema data model and its builder.

use indexmap::IndexMap;
use serde_json::Value;

use crate::validator::Validator;

/// The rule carried by a schema node's `value` slot.
///
/// The original notation overloads one key with five meanings depending on
/// its shape; here each reading is its own variant.
#[derive(Debug, Clone)]
pub enum ValueRule {
    /// Field-name to node map, used when descending into objects.
    Fields(IndexMap<String, SchemaNode>),
    /// Schema applied to every element of an array.
    Element(Box<SchemaNode>),
    /// Pipe-delimited enum of allowed exact string values.
    OneOf(String),
    /// Exact-match constraint; must hold a number or boolean.
    Exact(Value),
    /// Custom validator function.
    Check(Validator),
}

/// Declarative constraints for one position in a value tree.
///
/// Nodes are built with chainable methods and read-only during checking.
/// An empty node accepts anything.
///
/// # Example
///
/// ```rust
/// use chek::{SchemaNode, check};
/// use serde_json::json;
///
/// let schema = SchemaNode::new()
///     .field("s1", SchemaNode::of_type("string").required())
///     .field("s2", SchemaNode::of_type("string").default(json!("hi")));
///
/// let out = check(&json!({"s1": "hello"}), &schema).unwrap();
/// assert_eq!(out["s2"], json!("hi"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    pub(crate) kind: Option<String>,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) rule: Option<ValueRule>,
    pub(crate) strict: Option<bool>,
    pub(crate) validate: Option<Validator>,
}

impl SchemaNode {
    /// A node with no constraints.
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// A node constraining the value to a pipe-delimited type-name set,
    /// e.g. `"string"` or `"string|number"`.
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..<Self as Default>::default()
        }
    }

    /// Marks this position as required: absent or null values fail.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets a default substituted when the position is absent.
    ///
    /// Never applied to a present-but-null value.
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Overrides the ambient strict-mode setting for this node's own
    /// object check. Local always wins over inherited.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Adds a field schema, used when the value here is an object.
    ///
    /// Replaces any non-field rule already set on this node.
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        let mut fields = match self.rule.take() {
            Some(ValueRule::Fields(f)) => f,
            _ => IndexMap::new(),
        };
        fields.insert(name.into(), node);
        self.rule = Some(ValueRule::Fields(fields));
        self
    }

    /// Sets the whole field map at once.
    pub fn fields(mut self, fields: IndexMap<String, SchemaNode>) -> Self {
        self.rule = Some(ValueRule::Fields(fields));
        self
    }

    /// Sets the schema applied to every element, used when the value here
    /// is an array.
    pub fn element(mut self, node: SchemaNode) -> Self {
        self.rule = Some(ValueRule::Element(Box::new(node)));
        self
    }

    /// Restricts a string value to one of the pipe-delimited tokens,
    /// e.g. `"foo|bar|baz"`.
    pub fn one_of(mut self, tokens: impl Into<String>) -> Self {
        self.rule = Some(ValueRule::OneOf(tokens.into()));
        self
    }

    /// Requires the value to equal the given number or boolean exactly.
    pub fn exact(mut self, value: Value) -> Self {
        self.rule = Some(ValueRule::Exact(value));
        self
    }

    /// Sets a custom validator as this node's value rule.
    pub fn check_with(mut self, validator: Validator) -> Self {
        self.rule = Some(ValueRule::Check(validator));
        self
    }

    /// Sets a final whole-value check, run after every other rule on this
    /// node has passed.
    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.validate = Some(validator);
        self
    }

    /// The declared type set, if any.
    pub fn type_set(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// True if this position is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The value rule, if any.
    pub fn rule(&self) -> Option<&ValueRule> {
        self.rule.as_ref()
    }
}
