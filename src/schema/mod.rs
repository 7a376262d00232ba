//! Schema definitions.
//!
//! A schema is a tree of [`SchemaNode`]s describing the expected shape of
//! a value: allowed types, required positions, defaults, value rules, and
//! strict-mode overrides. Build nodes with the chainable methods on
//! [`SchemaNode`], or parse the JSON notation with
//! [`SchemaNode::from_value`].

mod audit;
mod node;
mod parse;

pub use node::{SchemaNode, ValueRule};

pub(crate) use audit::audit;
