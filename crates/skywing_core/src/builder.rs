//! Builder pattern for creating schemas.
//!
//! This module provides ergonomic builders for constructing schemas and
//! structured field specs with a fluent API.

use crate::{CustomCheck, DataValue, FieldSpec, Schema};
use std::collections::HashMap;

/// Builder for creating a `Schema`.
///
/// # Example
///
/// ```rust
/// use skywing_core::{FieldSpecBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .field("email", "required|email")
///     .field(
///         "password",
///         FieldSpecBuilder::new("required|min:8").message("min", "Password is too short"),
///     )
///     .field("password_confirmation", "match:[password]")
///     .build();
///
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Creates a new, empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Declaring the same field twice keeps its original
    /// position and the latest spec.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.schema.insert(name, spec);
        self
    }

    /// Declares multiple fields in order.
    pub fn fields<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FieldSpec>,
    {
        for (name, spec) in fields {
            self.schema.insert(name, spec);
        }
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        self.schema
    }
}

/// Builder for a structured `FieldSpec`.
///
/// # Example
///
/// ```rust
/// use skywing_core::FieldSpecBuilder;
///
/// let spec = FieldSpecBuilder::new("required|custom")
///     .message("required", "Age is mandatory")
///     .custom(
///         |value| value.and_then(|v| v.as_float()).is_some_and(|n| n > 0.0),
///         "must be positive",
///     )
///     .build();
///
/// assert_eq!(spec.rules(), "required|custom");
/// assert!(spec.custom_check("").is_some());
/// ```
#[derive(Debug)]
pub struct FieldSpecBuilder {
    rules: String,
    messages: HashMap<String, String>,
    custom: HashMap<String, CustomCheck>,
}

impl FieldSpecBuilder {
    /// Creates a new field spec builder from a rule string.
    pub fn new(rules: impl Into<String>) -> Self {
        Self {
            rules: rules.into(),
            messages: HashMap::new(),
            custom: HashMap::new(),
        }
    }

    /// Overrides the failure message of a rule.
    pub fn message(mut self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(rule.into(), message.into());
        self
    }

    /// Registers the predicate used by the bare `custom` rule.
    pub fn custom<F>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(Option<&DataValue>) -> bool + Send + Sync + 'static,
    {
        self.check("", CustomCheck::new(predicate, message))
    }

    /// Registers the predicate used by a `custom:<name>` rule.
    pub fn custom_named<F>(
        self,
        name: impl Into<String>,
        predicate: F,
        message: impl Into<String>,
    ) -> Self
    where
        F: Fn(Option<&DataValue>) -> bool + Send + Sync + 'static,
    {
        self.check(name, CustomCheck::new(predicate, message))
    }

    /// Registers an already constructed check under `name`.
    pub fn check(mut self, name: impl Into<String>, check: CustomCheck) -> Self {
        self.custom.insert(name.into(), check);
        self
    }

    /// Builds the field spec.
    ///
    /// A builder with no messages and no checks yields a plain rule string.
    pub fn build(self) -> FieldSpec {
        if self.messages.is_empty() && self.custom.is_empty() {
            return FieldSpec::RuleString(self.rules);
        }

        FieldSpec::WithMessages {
            rules: self.rules,
            messages: self.messages,
            custom: self.custom,
        }
    }
}

impl From<FieldSpecBuilder> for FieldSpec {
    fn from(builder: FieldSpecBuilder) -> Self {
        builder.build()
    }
}
