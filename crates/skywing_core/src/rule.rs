//! Rule catalog tags and compiled rule invocations.

use crate::DataValue;
use std::fmt;
use std::sync::Arc;

/// The closed catalog of built-in rules.
///
/// Rule names in a rule string resolve to one of these tags at compile time.
/// Names that resolve to nothing are kept as unknown invocations and skipped
/// when the schema runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Value is not empty
    Required,
    /// Value is an email address
    Email,
    /// Value is a URL
    Url,
    /// Trimmed length lower bound
    Min,
    /// Trimmed length upper bound
    Max,
    /// Trimmed length within an inclusive range
    Between,
    /// Value is one of a set of options
    In,
    /// Value is a string
    Str,
    /// Value is a list or map
    Arr,
    /// Value is a canonical boolean representation
    Bool,
    /// Value is an integer
    Int,
    /// Value is numeric
    Num,
    /// Value is ASCII letters and digits only
    Alphanum,
    /// Value loosely equals a literal
    Equals,
    /// Value equals another field's value
    Match,
    /// Value satisfies a caller-supplied predicate
    Custom,
}

impl RuleKind {
    /// Every rule in the catalog.
    pub const ALL: [RuleKind; 16] = [
        RuleKind::Required,
        RuleKind::Email,
        RuleKind::Url,
        RuleKind::Min,
        RuleKind::Max,
        RuleKind::Between,
        RuleKind::In,
        RuleKind::Str,
        RuleKind::Arr,
        RuleKind::Bool,
        RuleKind::Int,
        RuleKind::Num,
        RuleKind::Alphanum,
        RuleKind::Equals,
        RuleKind::Match,
        RuleKind::Custom,
    ];

    /// Looks up a rule by the name used in rule strings.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "required" => RuleKind::Required,
            "email" => RuleKind::Email,
            "url" => RuleKind::Url,
            "min" => RuleKind::Min,
            "max" => RuleKind::Max,
            "between" => RuleKind::Between,
            "in" => RuleKind::In,
            "str" => RuleKind::Str,
            "arr" => RuleKind::Arr,
            "bool" => RuleKind::Bool,
            "int" => RuleKind::Int,
            "num" => RuleKind::Num,
            "alphanum" => RuleKind::Alphanum,
            "equals" => RuleKind::Equals,
            "match" => RuleKind::Match,
            "custom" => RuleKind::Custom,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the name used in rule strings.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Email => "email",
            RuleKind::Url => "url",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Between => "between",
            RuleKind::In => "in",
            RuleKind::Str => "str",
            RuleKind::Arr => "arr",
            RuleKind::Bool => "bool",
            RuleKind::Int => "int",
            RuleKind::Num => "num",
            RuleKind::Alphanum => "alphanum",
            RuleKind::Equals => "equals",
            RuleKind::Match => "match",
            RuleKind::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicate signature for `custom` rules. A missing field is passed as `None`.
pub type Predicate = dyn Fn(Option<&DataValue>) -> bool + Send + Sync;

/// A caller-supplied check bound to the `custom` rule.
///
/// The predicate must be side-effect free; the engine calls it once per
/// invocation and never retries.
#[derive(Clone)]
pub struct CustomCheck {
    predicate: Arc<Predicate>,
    message: String,
}

impl CustomCheck {
    /// Creates a check from a predicate and the message recorded when it fails.
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(Option<&DataValue>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Creates a check whose failure message is empty.
    pub fn silent<F>(predicate: F) -> Self
    where
        F: Fn(Option<&DataValue>) -> bool + Send + Sync + 'static,
    {
        Self::new(predicate, String::new())
    }

    /// Runs the predicate.
    pub fn check(&self, value: Option<&DataValue>) -> bool {
        (self.predicate)(value)
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A rule parameter after compile-time coercion.
#[derive(Debug, Clone, Default)]
pub enum Parameter {
    /// No parameter
    #[default]
    None,
    /// Single integer (`min`, `max`)
    Integer(i64),
    /// Inclusive integer range (`between`)
    Range(i64, i64),
    /// Set of options (`in`)
    Options(Vec<String>),
    /// Name of another field (`match`)
    FieldRef(String),
    /// Uninterpreted parameter text
    Raw(String),
    /// Predicate and message (`custom`)
    Custom(CustomCheck),
}

impl Parameter {
    /// Returns the integer parameter, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Parameter::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the range parameter, if any.
    pub fn as_range(&self) -> Option<(i64, i64)> {
        match self {
            Parameter::Range(min, max) => Some((*min, *max)),
            _ => None,
        }
    }

    /// Returns the options parameter, if any.
    pub fn as_options(&self) -> Option<&[String]> {
        match self {
            Parameter::Options(options) => Some(options),
            _ => None,
        }
    }

    /// Returns the referenced field name, if any.
    pub fn as_field_ref(&self) -> Option<&str> {
        match self {
            Parameter::FieldRef(field) => Some(field),
            _ => None,
        }
    }

    /// Returns the raw parameter text, if any.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Parameter::Raw(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the custom check, if any.
    pub fn as_custom(&self) -> Option<&CustomCheck> {
        match self {
            Parameter::Custom(check) => Some(check),
            _ => None,
        }
    }
}

/// One compiled segment of a rule string.
#[derive(Debug, Clone)]
pub struct RuleInvocation {
    /// Rule name as written in the rule string
    pub name: String,

    /// Catalog entry, `None` when the name is not a known rule
    pub kind: Option<RuleKind>,

    /// Coerced parameter
    pub parameter: Parameter,

    /// Override for the default failure message
    pub message: Option<String>,
}

impl RuleInvocation {
    /// Returns true if the rule name resolved to a catalog entry.
    pub fn is_known(&self) -> bool {
        self.kind.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_catalog() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(RuleKind::from_name("zzz"), None);
        assert_eq!(RuleKind::from_name("Required"), None);
    }

    #[test]
    fn test_custom_check() {
        let check = CustomCheck::new(|v| v.is_some(), "must be present");
        assert!(check.check(Some(&DataValue::Null)));
        assert!(!check.check(None));
        assert_eq!(check.message(), "must be present");
        assert_eq!(CustomCheck::silent(|_| true).message(), "");
    }
}
