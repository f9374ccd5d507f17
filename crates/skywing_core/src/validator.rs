//! Validation traits and report types.
//!
//! This module defines the trait implemented by record validators and the
//! report they produce. Field errors are collected per field, in the order
//! rules were evaluated.

use crate::{CompiledSchema, Record};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Core trait for validating records against a compiled schema.
///
/// # Example
///
/// ```rust
/// use skywing_core::{CompiledSchema, Record, RecordValidator, ValidationReport};
///
/// struct AcceptEverything;
///
/// impl RecordValidator for AcceptEverything {
///     fn validate(&self, _schema: &CompiledSchema, _record: &Record) -> ValidationReport {
///         ValidationReport::success()
///     }
/// }
///
/// let report = AcceptEverything.validate(&CompiledSchema::default(), &Record::new());
/// assert!(report.pass());
/// ```
pub trait RecordValidator: Send + Sync {
    /// Validates one record. Every rule of every field is evaluated.
    fn validate(&self, schema: &CompiledSchema, record: &Record) -> ValidationReport;

    /// Validates a batch of records, one report per record, in input order.
    fn validate_all(&self, schema: &CompiledSchema, records: &[Record]) -> Vec<ValidationReport> {
        records
            .iter()
            .map(|record| self.validate(schema, record))
            .collect()
    }
}

/// Error messages grouped by field.
///
/// Fields appear in the order their first failure was recorded; messages
/// within a field keep rule order. Fields without failures are absent.
/// Serializes as a map of field name to message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    /// Returns the messages for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Returns true if the field has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterates over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Iterates over the names of fields with failures.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of fields with failures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of messages across all fields.
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }
}

/// Collects `(field, message)` pairs, grouping repeated fields in place.
impl<K, V> FromIterator<(K, V)> for FieldErrors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        for (field, message) in iter {
            let field = field.into();
            match entries.iter_mut().find(|(name, _)| *name == field) {
                Some((_, messages)) => messages.push(message.into()),
                None => entries.push((field, vec![message.into()])),
            }
        }
        Self { entries }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Report of a single validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Failure messages per field
    pub errors: FieldErrors,

    /// Run statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    /// Number of fields walked
    pub fields_checked: usize,

    /// Number of rules dispatched to an evaluator
    pub rules_evaluated: usize,

    /// Number of rules skipped because their name is unknown
    pub rules_skipped: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a report with no failures.
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a report from collected errors and stats.
    pub fn new(errors: FieldErrors, stats: ValidationStats) -> Self {
        Self { errors, stats }
    }

    /// Returns true iff no field failed.
    pub fn pass(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the failure messages per field.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_errors_grouping() {
        let errors: FieldErrors = [
            ("name", "name is required"),
            ("email", "email must be a valid email"),
            ("name", "name must be at least 3 characters long"),
        ]
        .into_iter()
        .collect();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_count(), 3);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "email"]);
        assert_eq!(
            errors.get("name"),
            Some(
                &[
                    "name is required".to_string(),
                    "name must be at least 3 characters long".to_string()
                ][..]
            )
        );
        assert!(!errors.contains("age"));
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let errors: FieldErrors = [("b", "one"), ("a", "two")].into_iter().collect();
        let json = serde_json::to_string(&errors).expect("serializes");
        assert_eq!(json, r#"{"b":["one"],"a":["two"]}"#);
    }

    #[test]
    fn test_report_pass() {
        assert!(ValidationReport::success().pass());

        let errors: FieldErrors = [("x", "x is required")].into_iter().collect();
        let report = ValidationReport::new(errors, ValidationStats::default());
        assert!(!report.pass());
        assert_eq!(report.errors().len(), 1);
    }
}
