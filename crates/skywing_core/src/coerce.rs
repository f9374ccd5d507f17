//! Explicit value and parameter coercions.
//!
//! Rule strings carry their parameters as text, and several rules look at a
//! value "as text" or "as a number". Every such conversion lives here so the
//! fallbacks are documented in one place:
//!
//! - [`to_int`]: parameter coercion, non-numeric text becomes `0`
//! - [`parse_int`]: whole-string integer parsing for the `int` rule
//! - [`is_numeric`]: numeric-string grammar for the `num` rule
//! - [`text_of`]: the text view of a value used by length, format and membership rules
//! - [`is_empty_value`]: the emptiness test used by `required`
//! - [`loose_eq`]: non-strict equality used by `equals`

use crate::DataValue;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)$").expect("integer pattern is valid"));

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric pattern is valid")
});

/// Coerces a rule parameter to an integer.
///
/// Leading whitespace and an optional sign are accepted, then as many decimal
/// digits as follow. Anything after the digits is ignored and text without
/// leading digits yields `0`. Values beyond the `i64` range saturate.
///
/// ```rust
/// use skywing_core::coerce::to_int;
///
/// assert_eq!(to_int("42"), 42);
/// assert_eq!(to_int(" -7px"), -7);
/// assert_eq!(to_int("abc"), 0);
/// ```
pub fn to_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            let digit = i64::from(b - b'0');
            if negative {
                acc.saturating_mul(10).saturating_sub(digit)
            } else {
                acc.saturating_mul(10).saturating_add(digit)
            }
        })
}

/// Parses text that is entirely an integer.
///
/// Surrounding whitespace is allowed, an optional sign is allowed, leading
/// zeros are not (except for `0` itself). Returns `None` for anything else,
/// including values outside the `i64` range.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if !INTEGER.is_match(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Returns true if the text is a decimal or exponent-form number.
///
/// Surrounding whitespace is allowed. `inf`, `nan` and hexadecimal forms are
/// not numeric.
pub fn is_numeric(text: &str) -> bool {
    NUMERIC.is_match(text.trim())
}

/// Returns the text view of a value.
///
/// Missing values and nulls read as `""`, `true` as `"1"`, `false` as `""`,
/// numbers in their shortest decimal form. Lists and maps have no text view.
pub fn text_of(value: Option<&DataValue>) -> Option<Cow<'_, str>> {
    match value {
        None | Some(DataValue::Null) => Some(Cow::Borrowed("")),
        Some(DataValue::Bool(true)) => Some(Cow::Borrowed("1")),
        Some(DataValue::Bool(false)) => Some(Cow::Borrowed("")),
        Some(DataValue::Int(i)) => Some(Cow::Owned(i.to_string())),
        Some(DataValue::Float(f)) => Some(Cow::Owned(f.to_string())),
        Some(DataValue::String(s)) => Some(Cow::Borrowed(s.as_str())),
        Some(DataValue::List(_) | DataValue::Map(_)) => None,
    }
}

/// Returns true if a value counts as empty.
///
/// Missing, null, `""`, `"0"`, `false`, `0`, `0.0` and empty containers are
/// all empty.
pub fn is_empty_value(value: Option<&DataValue>) -> bool {
    match value {
        None | Some(DataValue::Null) => true,
        Some(DataValue::Bool(b)) => !b,
        Some(DataValue::Int(i)) => *i == 0,
        Some(DataValue::Float(f)) => *f == 0.0,
        Some(DataValue::String(s)) => s.is_empty() || s == "0",
        Some(DataValue::List(items)) => items.is_empty(),
        Some(DataValue::Map(map)) => map.is_empty(),
    }
}

/// Returns the truthiness of a literal: `""` and `"0"` are false.
pub fn truthy(literal: &str) -> bool {
    !(literal.is_empty() || literal == "0")
}

/// Compares a value with a literal without requiring matching types.
///
/// - numbers and numeric strings compare numerically against a numeric literal,
///   exactly as `i64` when both sides are integers
/// - booleans compare against the truthiness of the literal
/// - missing values and nulls equal only the empty literal
/// - lists and maps never equal a literal
/// - everything else compares as exact text
pub fn loose_eq(value: Option<&DataValue>, literal: &str) -> bool {
    let literal_int = parse_int(literal);
    let literal_number = numeric_value(literal);

    match value {
        None | Some(DataValue::Null) => literal.is_empty(),
        Some(DataValue::Bool(b)) => *b == truthy(literal),
        Some(DataValue::Int(i)) => match (literal_int, literal_number) {
            (Some(n), _) => *i == n,
            (None, Some(n)) => (*i as f64) == n,
            (None, None) => i.to_string() == literal,
        },
        Some(DataValue::Float(f)) => match literal_number {
            Some(n) => *f == n,
            None => f.to_string() == literal,
        },
        Some(DataValue::String(s)) => match (parse_int(s), literal_int) {
            (Some(a), Some(b)) => a == b,
            _ => match (numeric_value(s), literal_number) {
                (Some(a), Some(b)) => a == b,
                _ => s == literal,
            },
        },
        Some(DataValue::List(_) | DataValue::Map(_)) => false,
    }
}

fn numeric_value(text: &str) -> Option<f64> {
    if is_numeric(text) {
        text.trim().parse().ok()
    } else {
        None
    }
}
