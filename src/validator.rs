//! Caller-supplied validator functions and their invocation boundary.
//!
//! Validators are arbitrary caller code, so the engine defends itself at
//! the call site: a panicking validator is caught and surfaced as a
//! `badSchema` error ("the validator is broken") rather than crossing the
//! boundary, while a returned error means "the value is invalid".

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use crate::error::{CheckError, ErrorCode};
use crate::path::ValuePath;

/// Context handed to a validator alongside the candidate value.
///
/// Exposes the whole root value for cross-field checks and the path of
/// the position under validation.
pub struct ValidatorContext<'a> {
    /// The root value the current check started from.
    pub root: &'a Value,
    /// The path of the value being validated.
    pub path: &'a ValuePath,
}

type ValidatorFn = dyn Fn(&Value, &ValidatorContext<'_>) -> Result<(), CheckError> + Send + Sync;

/// A caller-supplied validation function.
///
/// Return `Ok(())` for success. Return any [`CheckError`] for failure;
/// [`CheckError::invalid`] is the usual constructor and the engine fills
/// in the path. Validators are cheap to clone and safe to share across
/// threads.
///
/// # Example
///
/// ```rust
/// use chek::{CheckError, SchemaNode, Validator, check};
/// use serde_json::json;
///
/// let positive = Validator::new(|value, _ctx| {
///     if value.as_i64().map(|n| n > 0).unwrap_or(false) {
///         Ok(())
///     } else {
///         Err(CheckError::invalid("must be positive"))
///     }
/// });
///
/// let schema = SchemaNode::of_type("number").check_with(positive);
/// assert!(check(&json!(3), &schema).is_ok());
/// assert!(check(&json!(-3), &schema).is_err());
/// ```
#[derive(Clone)]
pub struct Validator {
    func: Arc<ValidatorFn>,
}

impl Validator {
    /// Wraps a closure as a validator.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value, &ValidatorContext<'_>) -> Result<(), CheckError> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invokes the validator under panic isolation.
    ///
    /// A panic becomes a `badSchema` error carrying the panic message; a
    /// returned error has the current path attached when the validator
    /// left it at root.
    pub(crate) fn invoke(&self, value: &Value, ctx: &ValidatorContext<'_>) -> Result<(), CheckError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| (self.func)(value, ctx)));
        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err.at(ctx.path)),
            Err(panic) => Err(CheckError::new(
                ErrorCode::BadSchema,
                ctx.path.clone(),
                format!("validator panicked: {}", panic_message(&*panic)),
            )),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
