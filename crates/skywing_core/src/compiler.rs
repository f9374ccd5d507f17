//! Rule-string compiler.
//!
//! Turns each field's rule string into an ordered list of [`RuleInvocation`]s.
//! The grammar is a `|`-separated list of segments, each `name` or
//! `name:parameter`:
//!
//! ```text
//! required|min:3|between:[4,8]|in:[red,green,blue]|match:[password]
//! ```
//!
//! Parameters are coerced eagerly, per rule:
//!
//! | Rule | Parameter |
//! |---|---|
//! | `in` | `[a,b,c]` → options (one layer of brackets stripped, split on `,`) |
//! | `between` | `[min,max]` → integer range via [`to_int`] |
//! | `min`, `max` | `n` → integer via [`to_int`] |
//! | `match` | `[field]` → field reference, resolved when a record is validated |
//! | `custom` | bare or `custom:name` → the field's registered [`CustomCheck`](crate::CustomCheck) |
//! | anything else | raw text |
//!
//! Unknown rule names compile to invocations without a [`RuleKind`] and are
//! skipped at run time, unless [`CompileOptions::strict`] is set.

use crate::coerce::to_int;
use crate::{FieldSpec, Parameter, Result, RuleInvocation, RuleKind, Schema, SchemaError};

/// Options controlling schema compilation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompileOptions {
    /// Reject unknown rule names instead of skipping them
    pub strict: bool,
}

impl CompileOptions {
    /// Creates options with default settings (permissive).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict compilation mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// The compiled rules of one field.
#[derive(Debug, Clone)]
pub struct CompiledField {
    /// Field name
    pub name: String,

    /// Rules in declared order
    pub rules: Vec<RuleInvocation>,
}

/// A schema whose rule strings have been compiled.
///
/// Immutable once built. It can be shared between threads and reused for any
/// number of records.
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    fields: Vec<CompiledField>,
}

impl CompiledSchema {
    /// Compiles a schema with default (permissive) options.
    pub fn compile(schema: &Schema) -> Result<Self> {
        Self::compile_with(schema, &CompileOptions::default())
    }

    /// Compiles a schema with the given options.
    pub fn compile_with(schema: &Schema, options: &CompileOptions) -> Result<Self> {
        let fields = schema
            .iter()
            .map(|(name, spec)| {
                Ok(CompiledField {
                    name: name.to_string(),
                    rules: compile_field(name, spec, options)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields })
    }

    /// Returns the compiled fields in declaration order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Returns the compiled rules of a field.
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the total number of rule invocations, known or not.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|field| field.rules.len()).sum()
    }

    /// Returns `(field, rule)` pairs whose rule name is not in the catalog.
    pub fn unknown_rules(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .flat_map(|field| {
                field
                    .rules
                    .iter()
                    .filter(|rule| !rule.is_known())
                    .map(move |rule| (field.name.as_str(), rule.name.as_str()))
            })
            .collect()
    }
}

impl Schema {
    /// Compiles this schema with default options.
    pub fn compile(&self) -> Result<CompiledSchema> {
        CompiledSchema::compile(self)
    }
}

/// Compiles one field's spec into its ordered rule invocations.
///
/// Blank segments (for example from a trailing `|`) are ignored.
pub fn compile_field(
    field: &str,
    spec: &FieldSpec,
    options: &CompileOptions,
) -> Result<Vec<RuleInvocation>> {
    spec.rules()
        .split('|')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| compile_segment(field, segment, spec, options))
        .collect()
}

fn compile_segment(
    field: &str,
    segment: &str,
    spec: &FieldSpec,
    options: &CompileOptions,
) -> Result<RuleInvocation> {
    let (name, raw) = match segment.split_once(':') {
        Some((name, param)) => (name.trim(), Some(param)),
        None => (segment.trim(), None),
    };
    let kind = RuleKind::from_name(name);

    let parameter = match kind {
        None if options.strict => return Err(SchemaError::unknown_rule(field, name)),
        Some(RuleKind::In) => Parameter::Options(
            split_list(raw.unwrap_or_default())
                .map(str::to_string)
                .collect(),
        ),
        Some(RuleKind::Between) => {
            let mut bounds = split_list(raw.unwrap_or_default()).map(to_int);
            let min = bounds.next().unwrap_or(0);
            let max = bounds.next().unwrap_or(0);
            Parameter::Range(min, max)
        }
        Some(RuleKind::Min | RuleKind::Max) => Parameter::Integer(raw.map_or(0, to_int)),
        Some(RuleKind::Match) => Parameter::FieldRef(parse_field_ref(field, segment, raw)?),
        Some(RuleKind::Custom) => {
            let check_name = raw.unwrap_or_default().trim();
            let check = spec.custom_check(check_name).ok_or_else(|| {
                SchemaError::invalid_configuration(
                    field,
                    segment.trim(),
                    if check_name.is_empty() {
                        "no predicate registered for the custom rule".to_string()
                    } else {
                        format!("no predicate registered under '{check_name}'")
                    },
                )
            })?;
            Parameter::Custom(check.clone())
        }
        _ => raw.map_or(Parameter::None, |param| Parameter::Raw(param.to_string())),
    };

    // `custom` falls back to the message its check was registered with.
    let message = spec
        .message_for(name)
        .map(str::to_string)
        .or_else(|| parameter.as_custom().map(|check| check.message().to_string()));

    Ok(RuleInvocation {
        name: name.to_string(),
        kind,
        parameter,
        message,
    })
}

/// Strips one enclosing `[`/`]` pair (each side independently) and splits on `,`.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    let inner = raw.strip_prefix('[').unwrap_or(raw);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner.split(',')
}

fn parse_field_ref(field: &str, segment: &str, raw: Option<&str>) -> Result<String> {
    raw.and_then(|param| param.strip_prefix('['))
        .and_then(|param| param.strip_suffix(']'))
        .filter(|target| !target.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            SchemaError::syntax(
                field,
                segment.trim(),
                "expected a bracketed field name, e.g. match:[password]",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldSpecBuilder, SchemaBuilder};
    use pretty_assertions::assert_eq;

    fn compile(rules: &str) -> Vec<RuleInvocation> {
        compile_field("field", &FieldSpec::from(rules), &CompileOptions::default())
            .expect("rules should compile")
    }

    #[test]
    fn test_segments_in_declared_order() {
        let rules = compile("required|email|min:3");
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["required", "email", "min"]);
        assert_eq!(rules[0].kind, Some(RuleKind::Required));
        assert!(matches!(rules[0].parameter, Parameter::None));
        assert_eq!(rules[2].parameter.as_integer(), Some(3));
    }

    #[test]
    fn test_in_options() {
        let rules = compile("in:[red,green,blue]");
        assert_eq!(
            rules[0].parameter.as_options(),
            Some(&["red".to_string(), "green".to_string(), "blue".to_string()][..])
        );

        let rules = compile("in:a,b");
        assert_eq!(rules[0].parameter.as_options().map(<[String]>::len), Some(2));

        let rules = compile("in");
        assert_eq!(rules[0].parameter.as_options(), Some(&[String::new()][..]));
    }

    #[test]
    fn test_between_range() {
        assert_eq!(compile("between:[4,8]")[0].parameter.as_range(), Some((4, 8)));
        assert_eq!(compile("between:[x,8]")[0].parameter.as_range(), Some((0, 8)));
        assert_eq!(compile("between:[5]")[0].parameter.as_range(), Some((5, 0)));
    }

    #[test]
    fn test_min_max_coercion() {
        assert_eq!(compile("min:abc")[0].parameter.as_integer(), Some(0));
        assert_eq!(compile("max")[0].parameter.as_integer(), Some(0));
        assert_eq!(compile("max:12chars")[0].parameter.as_integer(), Some(12));
    }

    #[test]
    fn test_match_reference() {
        let rules = compile("match:[password]");
        assert_eq!(rules[0].parameter.as_field_ref(), Some("password"));
    }

    #[test]
    fn test_match_without_brackets_is_syntax_error() {
        for rules in ["match", "match:password", "match:[]", "match:[password"] {
            let err = compile_field("confirm", &FieldSpec::from(rules), &CompileOptions::default())
                .expect_err("malformed match should fail");
            assert!(
                matches!(err, SchemaError::Syntax { ref field, .. } if field == "confirm"),
                "unexpected error for {rules:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_unknown_rules_are_kept_but_unresolved() {
        let rules = compile("required|zzz:1|min:2");
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[1].kind, None);
        assert_eq!(rules[1].parameter.as_raw(), Some("1"));
    }

    #[test]
    fn test_strict_rejects_unknown_rules() {
        let err = compile_field(
            "name",
            &FieldSpec::from("required|zzz"),
            &CompileOptions::new().with_strict(true),
        )
        .expect_err("strict mode should reject zzz");
        assert_eq!(err, SchemaError::unknown_rule("name", "zzz"));
    }

    #[test]
    fn test_blank_segments_are_ignored() {
        assert_eq!(compile("required||min:1|").len(), 2);
        assert!(compile("").is_empty());
        assert_eq!(compile(" required ")[0].kind, Some(RuleKind::Required));
    }

    #[test]
    fn test_message_overrides() {
        let spec = FieldSpecBuilder::new("required|min:3")
            .message("min", "too short")
            .message("max", "unused")
            .build();
        let rules = compile_field("name", &spec, &CompileOptions::default()).expect("compiles");

        assert_eq!(rules[0].message, None);
        assert_eq!(rules[1].message.as_deref(), Some("too short"));
    }

    #[test]
    fn test_custom_binds_registered_check() {
        let spec = FieldSpecBuilder::new("custom|custom:even")
            .custom(|v| v.is_some(), "must be present")
            .custom_named("even", |_| true, "")
            .message("custom", "overridden")
            .build();
        let rules = compile_field("n", &spec, &CompileOptions::default()).expect("compiles");

        assert!(rules[0].parameter.as_custom().is_some());
        assert_eq!(rules[0].message.as_deref(), Some("overridden"));
        assert!(rules[1].parameter.as_custom().is_some());
    }

    #[test]
    fn test_custom_message_falls_back_to_check() {
        let spec = FieldSpecBuilder::new("custom")
            .custom(|_| false, "must be positive")
            .build();
        let rules = compile_field("n", &spec, &CompileOptions::default()).expect("compiles");
        assert_eq!(rules[0].message.as_deref(), Some("must be positive"));
    }

    #[test]
    fn test_custom_without_predicate_is_configuration_error() {
        let err = compile_field("n", &FieldSpec::from("custom"), &CompileOptions::default())
            .expect_err("custom without predicate should fail");
        assert!(matches!(err, SchemaError::InvalidRuleConfiguration { .. }));

        let spec = FieldSpecBuilder::new("custom:odd").custom(|_| true, "").build();
        let err = compile_field("n", &spec, &CompileOptions::default())
            .expect_err("unregistered name should fail");
        assert!(err.to_string().contains("odd"));
    }

    #[test]
    fn test_compiled_schema_reports_unknown_rules() {
        let schema = SchemaBuilder::new()
            .field("a", "required|foo")
            .field("b", "bar|email")
            .build();
        let compiled = schema.compile().expect("compiles");

        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled.rule_count(), 4);
        assert_eq!(compiled.unknown_rules(), vec![("a", "foo"), ("b", "bar")]);
        assert_eq!(compiled.field("b").map(|f| f.rules.len()), Some(2));
    }

    #[test]
    fn test_schema_error_stops_compilation() {
        let schema = SchemaBuilder::new()
            .field("ok", "required")
            .field("bad", "match:oops")
            .build();
        assert!(schema.compile().is_err());
    }
}
