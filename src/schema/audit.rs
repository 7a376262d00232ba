//! Schema self-check.
//!
//! Runs once at the entry point, before any value is examined, so that
//! "your rules are invalid" is reported distinctly from "your data is
//! invalid". Shape errors a Rust caller could only produce through the
//! JSON notation are caught in [`parse`](super::parse); this audit covers
//! what the type system cannot: empty type-set tokens, non-scalar
//! exact-match payloads, and the untrusted policy.

use crate::error::{CheckError, ErrorCode};
use crate::path::ValuePath;

use super::node::{SchemaNode, ValueRule};

/// Recursively validates a schema tree against the meta rules.
///
/// Under `untrusted`, any node carrying an executable validator is
/// rejected outright; the function is never invoked.
pub(crate) fn audit(node: &SchemaNode, untrusted: bool, path: &ValuePath) -> Result<(), CheckError> {
    if let Some(kind) = &node.kind {
        if kind.is_empty() || kind.split('|').any(str::is_empty) {
            return Err(CheckError::new(
                ErrorCode::BadSchema,
                path.clone(),
                "type set contains an empty token",
            )
            .with_got(format!("{:?}", kind)));
        }
    }

    if untrusted && node.validate.is_some() {
        return Err(untrusted_error(path));
    }

    match &node.rule {
        Some(ValueRule::Check(_)) if untrusted => Err(untrusted_error(path)),
        Some(ValueRule::Exact(value)) if !value.is_number() && !value.is_boolean() => {
            Err(CheckError::new(
                ErrorCode::BadSchema,
                path.clone(),
                "exact-match rule must hold a number or boolean",
            )
            .with_got(value.to_string()))
        }
        Some(ValueRule::Fields(fields)) => {
            for (name, field) in fields {
                audit(field, untrusted, &path.push_field(name))?;
            }
            Ok(())
        }
        Some(ValueRule::Element(element)) => audit(element, untrusted, path),
        _ => Ok(()),
    }
}

fn untrusted_error(path: &ValuePath) -> CheckError {
    CheckError::new(
        ErrorCode::BadSchema,
        path.clone(),
        "validator functions are not allowed in untrusted schemas",
    )
}
