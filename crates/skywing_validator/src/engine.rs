//! Main validation engine.
//!
//! This module provides the [`RuleExecutor`] that walks a compiled schema
//! against a record, and the eager [`Validator`] facade built on top of it.

use crate::ErrorAggregator;
use crate::rules::{RuleInput, evaluator};
use skywing_core::{
    CompiledSchema, FieldErrors, Record, RecordValidator, Schema, SchemaError, ValidationReport,
    ValidationStats,
};
use std::time::Instant;
use tracing::{debug, trace};

/// Runs compiled schemas against records.
///
/// Fields are visited in declaration order and rules in declared order. All
/// rules run, including those after a failure on the same field. Rules whose
/// name is not in the catalog are skipped without producing an error.
///
/// # Example
///
/// ```rust
/// use skywing_core::{record_from, RecordValidator, SchemaBuilder};
/// use skywing_validator::RuleExecutor;
///
/// let schema = SchemaBuilder::new()
///     .field("name", "required|min:3")
///     .build()
///     .compile()
///     .unwrap();
///
/// let report = RuleExecutor::new().validate(&schema, &record_from([("name", "")]));
///
/// assert!(!report.pass());
/// assert_eq!(
///     report.errors.get("name").unwrap(),
///     ["name is required", "name must be at least 3 characters long"]
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleExecutor;

impl RuleExecutor {
    /// Creates a new rule executor.
    pub fn new() -> Self {
        Self
    }

    /// Validates a record against a compiled schema.
    pub fn run(&self, schema: &CompiledSchema, record: &Record) -> ValidationReport {
        let start = Instant::now();
        let mut errors = ErrorAggregator::new();
        let mut stats = ValidationStats::default();

        for field in schema.fields() {
            stats.fields_checked += 1;
            let value = record.get(&field.name);

            for rule in &field.rules {
                let Some(kind) = rule.kind else {
                    stats.rules_skipped += 1;
                    debug!(field = %field.name, rule = %rule.name, "skipping unknown rule");
                    continue;
                };
                stats.rules_evaluated += 1;

                let input = RuleInput {
                    field: &field.name,
                    value,
                    parameter: &rule.parameter,
                    message: rule.message.as_deref(),
                    record,
                };

                if let Some(message) = evaluator(kind)(&input) {
                    trace!(field = %field.name, rule = %kind, %message, "rule failed");
                    errors.push(field.name.as_str(), message);
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        let errors = errors.finish();

        debug!(
            fields = stats.fields_checked,
            evaluated = stats.rules_evaluated,
            skipped = stats.rules_skipped,
            failed_fields = errors.len(),
            "validation run finished"
        );

        ValidationReport::new(errors, stats)
    }
}

impl RecordValidator for RuleExecutor {
    fn validate(&self, schema: &CompiledSchema, record: &Record) -> ValidationReport {
        self.run(schema, record)
    }
}

/// A finished validation of one record.
///
/// Construction compiles the schema (when needed) and runs every rule
/// immediately; the accessors only read the result.
///
/// # Example
///
/// ```rust
/// use skywing_core::{record_from, SchemaBuilder};
/// use skywing_validator::Validator;
///
/// let schema = SchemaBuilder::new()
///     .field("password", "required|min:8")
///     .field("password_confirmation", "match:[password]")
///     .build();
///
/// let record = record_from([
///     ("password", "correct horse"),
///     ("password_confirmation", "correct horse"),
/// ]);
///
/// let validator = Validator::new(&record, &schema).expect("schema compiles");
/// assert!(validator.pass());
/// assert!(validator.errors().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    report: ValidationReport,
}

impl Validator {
    /// Compiles `schema` and validates `record` against it.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the schema does not compile. No rule is
    /// evaluated in that case.
    pub fn new(record: &Record, schema: &Schema) -> Result<Self, SchemaError> {
        let compiled = schema.compile()?;
        Ok(Self::from_compiled(record, &compiled))
    }

    /// Validates `record` against an already compiled schema.
    pub fn from_compiled(record: &Record, schema: &CompiledSchema) -> Self {
        Self {
            report: RuleExecutor::new().run(schema, record),
        }
    }

    /// Returns the failure messages per field.
    pub fn errors(&self) -> &FieldErrors {
        &self.report.errors
    }

    /// Returns true iff no field failed.
    pub fn pass(&self) -> bool {
        self.report.pass()
    }

    /// Returns the full report, including run statistics.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Consumes the validator and returns its report.
    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}
