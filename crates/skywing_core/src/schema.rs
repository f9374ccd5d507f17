//! Schema and field spec types.
//!
//! A [`Schema`] maps field names to [`FieldSpec`]s. Field order is the order
//! fields are declared in, and it is the order the engine validates them in.

use crate::CustomCheck;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;

/// Rule specification for a single field.
///
/// In schema files a field spec is either a bare rule string:
///
/// ```yaml
/// email: required|email
/// ```
///
/// or a structured spec with per-rule message overrides:
///
/// ```yaml
/// password:
///   rules: required|min:8
///   messages:
///     min: Password is too short
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// A bare `|`-delimited rule string
    RuleString(String),

    /// A rule string with message overrides and custom checks
    WithMessages {
        /// The `|`-delimited rule string
        rules: String,

        /// Rule name to override message
        #[serde(default)]
        messages: HashMap<String, String>,

        /// Check name to predicate, bound to `custom` / `custom:<name>` rules
        #[serde(skip)]
        custom: HashMap<String, CustomCheck>,
    },
}

impl FieldSpec {
    /// Returns the rule string.
    pub fn rules(&self) -> &str {
        match self {
            FieldSpec::RuleString(rules) | FieldSpec::WithMessages { rules, .. } => rules,
        }
    }

    /// Returns the message override for a rule name, if one was given.
    pub fn message_for(&self, rule: &str) -> Option<&str> {
        match self {
            FieldSpec::RuleString(_) => None,
            FieldSpec::WithMessages { messages, .. } => messages.get(rule).map(String::as_str),
        }
    }

    /// Returns the custom check registered under `name`.
    ///
    /// The bare `custom` rule looks up the empty name.
    pub fn custom_check(&self, name: &str) -> Option<&CustomCheck> {
        match self {
            FieldSpec::RuleString(_) => None,
            FieldSpec::WithMessages { custom, .. } => custom.get(name),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(rules: &str) -> Self {
        FieldSpec::RuleString(rules.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(rules: String) -> Self {
        FieldSpec::RuleString(rules)
    }
}

/// An ordered mapping from field name to [`FieldSpec`].
///
/// # Example
///
/// ```rust
/// use skywing_core::Schema;
///
/// let schema: Schema = [("name", "required|min:2"), ("email", "required|email")]
///     .into_iter()
///     .collect();
///
/// let names: Vec<&str> = schema.field_names().collect();
/// assert_eq!(names, vec!["name", "email"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldSpec)>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, or replaces the spec of an existing one in place.
    ///
    /// Returns the previous spec when the field was already declared.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        spec: impl Into<FieldSpec>,
    ) -> Option<FieldSpec> {
        let name = name.into();
        let spec = spec.into();

        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, spec)),
            None => {
                self.fields.push((name, spec));
                None
            }
        }
    }

    /// Returns the spec for a field.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    /// Iterates over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Iterates over field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Schema
where
    K: Into<String>,
    V: Into<FieldSpec>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut schema = Schema::new();
        for (name, spec) in iter {
            schema.insert(name, spec);
        }
        schema
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to rule strings or rule specs")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Schema, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut schema = Schema::new();
                while let Some((name, spec)) = map.next_entry::<String, FieldSpec>()? {
                    schema.insert(name, spec);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
