//! Error types for schema compilation.
//!
//! Validation failures are data, not errors: they end up in a
//! [`FieldErrors`](crate::FieldErrors) collection. The types here describe
//! mistakes in the schema itself and are reported to the schema author before
//! any record is looked at.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur while compiling a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A rule segment could not be parsed
    #[error("Syntax error in rule '{rule}' for field '{field}': {message}")]
    Syntax {
        /// Field whose rule string is malformed
        field: String,
        /// Offending rule segment
        rule: String,
        /// What is wrong with it
        message: String,
    },

    /// A rule is well-formed but cannot run as configured
    #[error("Invalid configuration for rule '{rule}' on field '{field}': {reason}")]
    InvalidRuleConfiguration {
        /// Field the rule belongs to
        field: String,
        /// Rule name
        rule: String,
        /// Why the configuration is invalid
        reason: String,
    },

    /// Rule name is not part of the catalog (strict mode only)
    #[error("Unknown rule '{rule}' for field '{field}'")]
    UnknownRule {
        /// Field the rule belongs to
        field: String,
        /// Unrecognized rule name
        rule: String,
    },
}

impl SchemaError {
    /// Creates a new syntax error.
    pub fn syntax(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Creates a new invalid rule configuration error.
    pub fn invalid_configuration(
        field: impl Into<String>,
        rule: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRuleConfiguration {
            field: field.into(),
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unknown rule error.
    pub fn unknown_rule(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::UnknownRule {
            field: field.into(),
            rule: rule.into(),
        }
    }

    /// Returns the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Syntax { field, .. }
            | Self::InvalidRuleConfiguration { field, .. }
            | Self::UnknownRule { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SchemaError::syntax("confirm", "match:password", "expected [field]");
        assert_eq!(
            err.to_string(),
            "Syntax error in rule 'match:password' for field 'confirm': expected [field]"
        );
        assert_eq!(err.field(), "confirm");

        let err = SchemaError::unknown_rule("name", "zzz");
        assert_eq!(err.to_string(), "Unknown rule 'zzz' for field 'name'");
    }
}
