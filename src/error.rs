//! Validation error types.
//!
//! A failed check produces exactly one [`CheckError`]: the first failure
//! encountered in traversal order. Callers branch on [`CheckError::code`]
//! for programmatic handling; the remaining fields are diagnostics.

use std::fmt::{self, Display};

use crate::path::ValuePath;

/// The closed taxonomy of validation failure categories.
///
/// Every error belongs to exactly one category. Programmatic error handling
/// should branch on this code rather than parse messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A required value was absent or explicitly null.
    MissingParam,
    /// An object contained a key not declared in a strict schema.
    BadParam,
    /// The value's type was not in the schema's allowed type set.
    BadType,
    /// The value failed an exact-match, enum, or custom-validator check.
    BadValue,
    /// The schema itself was malformed, carried a disallowed validator
    /// function under an untrusted policy, or a validator panicked.
    BadSchema,
}

impl ErrorCode {
    /// The machine-checkable wire name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingParam => "missingParam",
            ErrorCode::BadParam => "badParam",
            ErrorCode::BadType => "badType",
            ErrorCode::BadValue => "badValue",
            ErrorCode::BadSchema => "badSchema",
        }
    }

    /// A short human description of this category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MissingParam => "Missing Required Parameter",
            ErrorCode::BadParam => "Unrecognized Parameter",
            ErrorCode::BadType => "Invalid Type",
            ErrorCode::BadValue => "Invalid Value",
            ErrorCode::BadSchema => "Invalid Schema",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure with full context.
///
/// Carries the taxonomy [`code`](ErrorCode), the [`ValuePath`] of the
/// offending position, a human-readable message, and optional
/// `got`/`expected` diagnostics.
///
/// # Example
///
/// ```rust
/// use chek::{CheckError, ErrorCode, ValuePath};
///
/// let error = CheckError::new(
///     ErrorCode::BadType,
///     ValuePath::root().push_field("age"),
///     "type not allowed",
/// )
/// .with_got("string")
/// .with_expected("number");
///
/// assert_eq!(error.code, ErrorCode::BadType);
/// assert!(error.to_string().contains("Invalid Type"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CheckError {
    /// The failure category.
    pub code: ErrorCode,
    /// Where in the value tree the failure occurred.
    pub path: ValuePath,
    /// Human-readable description of the failure.
    pub message: String,
    /// What was actually found (formatted, diagnostics only).
    pub got: Option<String>,
    /// What was expected instead (diagnostics only).
    pub expected: Option<String>,
}

impl CheckError {
    /// Creates a new error with the given code, path, and message.
    pub fn new(code: ErrorCode, path: ValuePath, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
            got: None,
            expected: None,
        }
    }

    /// Creates a `badValue` error at the root path.
    ///
    /// This is the convenience constructor for custom validators: the
    /// engine attaches the current path when the error surfaces.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadValue, ValuePath::root(), message)
    }

    /// Sets the "got" (actual value) diagnostic and returns self.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" diagnostic and returns self.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Replaces a root path with the given one, leaving set paths alone.
    ///
    /// Errors returned by custom validators usually carry no location;
    /// the engine fills in the position it invoked them from.
    pub(crate) fn at(mut self, path: &ValuePath) -> Self {
        if self.path.is_root() {
            self.path = path.clone();
        }
        self
    }
}

impl Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}: {}", self.code.description(), path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for CheckError {}

// CheckError must stay shareable across threads; these assertions fail to
// compile if a field change breaks that.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CheckError>();
    assert_sync::<CheckError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wire_names() {
        assert_eq!(ErrorCode::MissingParam.as_str(), "missingParam");
        assert_eq!(ErrorCode::BadParam.as_str(), "badParam");
        assert_eq!(ErrorCode::BadType.as_str(), "badType");
        assert_eq!(ErrorCode::BadValue.as_str(), "badValue");
        assert_eq!(ErrorCode::BadSchema.as_str(), "badSchema");
    }

    #[test]
    fn test_error_display_with_context() {
        let error = CheckError::new(
            ErrorCode::BadType,
            ValuePath::root().push_field("age"),
            "type not allowed",
        )
        .with_expected("number")
        .with_got("string");

        let display = error.to_string();
        assert!(display.contains("Invalid Type: age: type not allowed"));
        assert!(display.contains("expected: number"));
        assert!(display.contains("got: string"));
    }

    #[test]
    fn test_error_display_root() {
        let error = CheckError::new(ErrorCode::BadSchema, ValuePath::root(), "schema required");
        assert!(error.to_string().contains("(root)"));
    }

    #[test]
    fn test_invalid_defaults_to_bad_value() {
        let error = CheckError::invalid("out of range");
        assert_eq!(error.code, ErrorCode::BadValue);
        assert!(error.path.is_root());
    }

    #[test]
    fn test_at_fills_only_root_paths() {
        let here = ValuePath::root().push_field("n");
        let filled = CheckError::invalid("nope").at(&here);
        assert_eq!(filled.path, here);

        let elsewhere = ValuePath::root().push_field("other");
        let kept = CheckError::new(ErrorCode::BadValue, elsewhere.clone(), "nope").at(&here);
        assert_eq!(kept.path, elsewhere);
    }
}
