//! String-to-scalar coercion.
//!
//! Query-string and form parameters arrive as strings; when a schema
//! declares a bare `number` or `boolean` type, the engine coerces string
//! input before type checking. Coercion never fails: an unconvertible
//! string passes through unchanged and fails the type check instead.

use serde_json::Value;

/// A scalar type that string input may be coerced into.
///
/// Coercion applies only when the declared type set is exactly one of
/// these names; a wider set like `"string|number"` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Number,
    Boolean,
}

/// Resolves a schema type set to a coercion target, if any.
pub(crate) fn target(kind: Option<&str>) -> Option<Target> {
    match kind {
        Some("number") => Some(Target::Number),
        Some("boolean") => Some(Target::Boolean),
        _ => None,
    }
}

/// Coerces a string to the target scalar, or returns it unchanged.
///
/// Numbers use a dual prefix-parse: the input is read both as a float and
/// as an integer, and the parse with the larger absolute magnitude wins
/// (so `"1.7"` stays 1.7 and `"1e2"` becomes 100), falling back to the
/// integer when it is non-zero. Only the literal `"0"` coerces to zero.
///
/// Booleans: case-insensitive `"true"` or `"yes"`, or a string with a
/// positive integer prefix, become `true`; everything else is `false`.
pub(crate) fn coerce(raw: &str, target: Target) -> Value {
    match target {
        Target::Number => coerce_number(raw),
        Target::Boolean => Value::Bool(truthy(raw)),
    }
}

fn coerce_number(raw: &str) -> Value {
    let float = parse_float_prefix(raw);
    let int = parse_int_prefix(raw);

    match (float, int) {
        (Some(f), Some(i)) if f.abs() > (i as f64).abs() => {
            match serde_json::Number::from_f64(f) {
                Some(n) => Value::Number(n),
                None => Value::String(raw.to_string()),
            }
        }
        (_, Some(i)) if i != 0 => Value::Number(i.into()),
        _ if raw == "0" => Value::Number(0.into()),
        _ => Value::String(raw.to_string()),
    }
}

// True for 'true'/'yes' (any case) and strings with a positive integer
// prefix; negative numbers are false.
fn truthy(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    if lower == "true" || lower == "yes" {
        return true;
    }
    matches!(parse_int_prefix(raw), Some(i) if i > 0)
}

/// Parses the longest leading decimal integer, ignoring trailing text.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: &str = &rest[..rest.chars().take_while(|c| c.is_ascii_digit()).count()];
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Parses the longest leading float literal, ignoring trailing text.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. The exponent is consumed only when it is complete
/// (`"1e"` parses as 1).
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    if pos < bytes.len() && (bytes[pos] == b'-' || bytes[pos] == b'+') {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp_pos = pos + 1;
        if exp_pos < bytes.len() && (bytes[exp_pos] == b'-' || bytes[exp_pos] == b'+') {
            exp_pos += 1;
        }
        let exp_digits = count_digits(&bytes[exp_pos..]);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    s[..pos].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
