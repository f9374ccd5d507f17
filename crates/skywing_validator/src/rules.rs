//! Built-in rule set.
//!
//! Every rule in the catalog maps to one stateless evaluator through
//! [`evaluator`]. An evaluator returns `None` when the value passes and the
//! failure message otherwise: the override from the schema if one was given,
//! the default template naming the field and the constraint if not.
//!
//! Rules that look at text use [`text_of`]: missing and null values read as
//! `""`, lists and maps have no text and fail format/membership checks.
//! Lengths are counted in characters after trimming surrounding whitespace.

use skywing_core::coerce::{is_empty_value, is_numeric, loose_eq, parse_int, text_of};
use skywing_core::{DataValue, Parameter, Record, RuleKind};
use validator::{ValidateEmail, ValidateUrl};

/// Everything an evaluator may look at for one rule invocation.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Field being validated
    pub field: &'a str,
    /// Field value, `None` when the record has no such key
    pub value: Option<&'a DataValue>,
    /// Compiled rule parameter
    pub parameter: &'a Parameter,
    /// Message override from the schema
    pub message: Option<&'a str>,
    /// Whole record, for cross-field rules
    pub record: &'a Record,
}

/// Signature shared by every evaluator.
pub type RuleFn = fn(&RuleInput<'_>) -> Option<String>;

/// Returns the evaluator for a catalog entry.
pub fn evaluator(kind: RuleKind) -> RuleFn {
    match kind {
        RuleKind::Required => required,
        RuleKind::Email => email,
        RuleKind::Url => url,
        RuleKind::Min => min,
        RuleKind::Max => max,
        RuleKind::Between => between,
        RuleKind::In => one_of,
        RuleKind::Str => string,
        RuleKind::Arr => array,
        RuleKind::Bool => boolean,
        RuleKind::Int => integer,
        RuleKind::Num => number,
        RuleKind::Alphanum => alphanum,
        RuleKind::Equals => equals,
        RuleKind::Match => matches_field,
        RuleKind::Custom => custom,
    }
}

fn check(passed: bool, input: &RuleInput<'_>, default: impl FnOnce() -> String) -> Option<String> {
    if passed {
        None
    } else {
        Some(input.message.map_or_else(default, str::to_string))
    }
}

fn trimmed_len(value: Option<&DataValue>) -> i64 {
    let len = text_of(value).map_or(0, |text| text.trim().chars().count());
    i64::try_from(len).unwrap_or(i64::MAX)
}

fn required(input: &RuleInput<'_>) -> Option<String> {
    check(!is_empty_value(input.value), input, || {
        format!("{} is required", input.field)
    })
}

fn email(input: &RuleInput<'_>) -> Option<String> {
    let valid = text_of(input.value).is_some_and(|text| text.validate_email());
    check(valid, input, || format!("{} must be a valid email", input.field))
}

fn url(input: &RuleInput<'_>) -> Option<String> {
    let valid = text_of(input.value).is_some_and(|text| text.validate_url());
    check(valid, input, || format!("{} must be a valid URL", input.field))
}

fn min(input: &RuleInput<'_>) -> Option<String> {
    let min = input.parameter.as_integer().unwrap_or(0);
    check(trimmed_len(input.value) >= min, input, || {
        format!("{} must be at least {} characters long", input.field, min)
    })
}

fn max(input: &RuleInput<'_>) -> Option<String> {
    let max = input.parameter.as_integer().unwrap_or(0);
    check(trimmed_len(input.value) <= max, input, || {
        format!("{} must be at most {} characters long", input.field, max)
    })
}

fn between(input: &RuleInput<'_>) -> Option<String> {
    let (min, max) = input.parameter.as_range().unwrap_or((0, 0));
    let len = trimmed_len(input.value);
    check(len >= min && len <= max, input, || {
        format!(
            "{} must be between {} and {} characters long",
            input.field, min, max
        )
    })
}

fn one_of(input: &RuleInput<'_>) -> Option<String> {
    let options = input.parameter.as_options().unwrap_or_default();
    let member = text_of(input.value)
        .is_some_and(|text| options.iter().any(|option| *option == *text));
    check(member, input, || {
        format!("{} must be one of: {}", input.field, options.join(", "))
    })
}

fn string(input: &RuleInput<'_>) -> Option<String> {
    check(
        matches!(input.value, Some(DataValue::String(_))),
        input,
        || format!("{} must be string", input.field),
    )
}

fn array(input: &RuleInput<'_>) -> Option<String> {
    check(
        input.value.is_some_and(DataValue::is_container),
        input,
        || format!("{} must be an array", input.field),
    )
}

fn boolean(input: &RuleInput<'_>) -> Option<String> {
    let valid = match input.value {
        Some(DataValue::Bool(_)) | Some(DataValue::Int(0 | 1)) => true,
        Some(DataValue::String(s)) => s == "0" || s == "1",
        _ => false,
    };
    check(valid, input, || format!("{} must be a boolean", input.field))
}

fn integer(input: &RuleInput<'_>) -> Option<String> {
    let valid = match input.value {
        Some(DataValue::Int(_)) => true,
        Some(DataValue::Float(f)) => {
            f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64
        }
        Some(DataValue::String(s)) => parse_int(s).is_some(),
        _ => false,
    };
    check(valid, input, || format!("{} must be an integer", input.field))
}

fn number(input: &RuleInput<'_>) -> Option<String> {
    let valid = match input.value {
        Some(DataValue::Int(_) | DataValue::Float(_)) => true,
        Some(DataValue::String(s)) => is_numeric(s),
        _ => false,
    };
    check(valid, input, || format!("{} must be a number", input.field))
}

fn alphanum(input: &RuleInput<'_>) -> Option<String> {
    let valid = match input.value {
        Some(DataValue::String(s)) => {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    check(valid, input, || format!("{} must be alphanumeric", input.field))
}

fn equals(input: &RuleInput<'_>) -> Option<String> {
    let literal = input.parameter.as_raw().unwrap_or_default();
    check(loose_eq(input.value, literal), input, || {
        format!("{} value must equal {}", input.field, literal)
    })
}

/// `match`: the target key must exist (a null value counts), and the two
/// values must be equal in type and value.
fn matches_field(input: &RuleInput<'_>) -> Option<String> {
    let target = input.parameter.as_field_ref().unwrap_or_default();
    let valid = match input.record.get(target) {
        Some(other) => input.value == Some(other),
        None => false,
    };
    check(valid, input, || format!("{} must match {}", input.field, target))
}

fn custom(input: &RuleInput<'_>) -> Option<String> {
    let passed = input
        .parameter
        .as_custom()
        .is_some_and(|check| check.check(input.value));
    check(passed, input, String::new)
}
