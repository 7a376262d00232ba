//! Runtime type classification and the extensible type-name registry.
//!
//! [`classify`] maps any `serde_json::Value` to one of the closed set of
//! built-in [`Kind`]s. Schemas may also name custom types; those are
//! resolved through a [`TypeRegistry`] of caller-registered predicates,
//! constructed explicitly and injected into a
//! [`Checker`](crate::Checker) rather than living in global state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// The built-in value kinds.
///
/// Absence is not a kind: the engine models absent slots as `Option::None`
/// and never classifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// The canonical name of this kind, as used in schema type sets.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

/// Classifies a value into its built-in [`Kind`].
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Boolean,
        Value::Number(_) => Kind::Number,
        Value::String(_) => Kind::String,
        Value::Array(_) => Kind::Array,
        Value::Object(_) => Kind::Object,
    }
}

/// A named type-membership predicate.
pub type TypePredicate = dyn Fn(&Value) -> bool + Send + Sync;

type PredicateMap = Arc<RwLock<HashMap<String, Arc<TypePredicate>>>>;

/// A thread-safe registry of custom type names.
///
/// Schemas refer to types by name in pipe-delimited sets such as
/// `"string|timestamp"`. The six built-in kind names always resolve;
/// any other token resolves through this registry's predicates.
///
/// Cloning a registry shares the underlying table, so a registry can be
/// handed to several [`Checker`](crate::Checker)s. Checkers built with
/// different registries never see each other's type vocabularies.
///
/// # Example
///
/// ```rust
/// use chek::TypeRegistry;
/// use serde_json::json;
///
/// let registry = TypeRegistry::new();
/// registry
///     .register("timestamp", |v| {
///         v.as_i64().map(|n| n > 0).unwrap_or(false)
///     })
///     .unwrap();
///
/// assert!(registry.is_name(&json!(1700000000), "timestamp"));
/// assert!(!registry.is_name(&json!("soon"), "timestamp"));
/// ```
pub struct TypeRegistry {
    predicates: PredicateMap,
}

impl TypeRegistry {
    /// Creates an empty registry (built-in kind names only).
    pub fn new() -> Self {
        Self {
            predicates: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a custom type name backed by a membership predicate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReservedName`] for built-in kind names and
    /// [`RegistryError::DuplicateName`] if the name is already registered.
    pub fn register<F>(&self, name: impl Into<String>, predicate: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if is_builtin_name(&name) {
            return Err(RegistryError::ReservedName(name));
        }

        let mut predicates = self.predicates.write();
        if predicates.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        predicates.insert(name, Arc::new(predicate));
        Ok(())
    }

    /// Tests whether a value belongs to the named type.
    ///
    /// Built-in names match the value's classified kind; other names match
    /// when a registered predicate accepts the value. Unknown names never
    /// match.
    pub fn is_name(&self, value: &Value, name: &str) -> bool {
        if classify(value).name() == name {
            return true;
        }
        let predicate = self.predicates.read().get(name).cloned();
        match predicate {
            Some(p) => p(value),
            None => false,
        }
    }

    /// Tests membership of a value in a pipe-delimited type-name set.
    pub fn in_set(&self, value: &Value, set: &str) -> bool {
        set.split('|').any(|name| self.is_name(value, name))
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("custom_types", &self.predicates.read().len())
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TypeRegistry {
    fn clone(&self) -> Self {
        Self {
            predicates: Arc::clone(&self.predicates),
        }
    }
}

fn is_builtin_name(name: &str) -> bool {
    matches!(
        name,
        "null" | "boolean" | "number" | "string" | "array" | "object"
    )
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a type name that already exists.
    #[error("type '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to register one of the built-in kind names.
    #[error("type '{0}' is a built-in kind")]
    ReservedName(String),
}
