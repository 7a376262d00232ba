//! # Chek
//!
//! A synchronous, schema-driven value validator and normalizer.
//!
//! ## Overview
//!
//! Given a `serde_json::Value` and a declarative schema, chek verifies the
//! value conforms, substitutes declared defaults, coerces string-encoded
//! scalars to their declared types, enforces required and strict policies,
//! and runs caller-supplied validator functions. It returns either the
//! normalized value or the first [`CheckError`] encountered, never
//! panicking and never modifying its inputs. Traversal stops at the first
//! failure; there is no error-accumulation mode.
//!
//! ## Core types
//!
//! - [`SchemaNode`]: declarative constraints for one position in a value
//!   tree, built with chainable methods or parsed from JSON notation
//! - [`Checker`] / [`check`]: the validation engine and its one-shot form
//! - [`CheckError`] / [`ErrorCode`]: a structured first failure with a
//!   closed taxonomy code
//! - [`TypeRegistry`]: injectable custom type-name vocabulary
//! - [`Validator`]: caller-supplied check invoked under panic isolation
//!
//! ## Example
//!
//! ```rust
//! use chek::{check, ErrorCode, SchemaNode};
//! use serde_json::json;
//!
//! let schema = SchemaNode::new()
//!     .field("name", SchemaNode::of_type("string").required())
//!     .field("role", SchemaNode::of_type("string")
//!         .one_of("user|admin")
//!         .default(json!("user")))
//!     .field("age", SchemaNode::of_type("number"));
//!
//! // Defaults are applied and string scalars coerced on the returned
//! // value; the input is untouched.
//! let out = check(&json!({"name": "Alice", "age": "30"}), &schema).unwrap();
//! assert_eq!(out["role"], json!("user"));
//! assert_eq!(out["age"], json!(30));
//!
//! // The first failure carries a machine-checkable code.
//! let err = check(&json!({"role": "admin"}), &schema).unwrap_err();
//! assert_eq!(err.code, ErrorCode::MissingParam);
//! ```

mod coerce;
mod matcher;

pub mod engine;
pub mod error;
pub mod kind;
pub mod path;
pub mod schema;
pub mod validator;

pub use engine::{check, CheckOptions, Checker};
pub use error::{CheckError, ErrorCode};
pub use kind::{classify, Kind, RegistryError, TypeRegistry};
pub use path::{PathSegment, ValuePath};
pub use schema::{SchemaNode, ValueRule};
pub use validator::{Validator, ValidatorContext};
