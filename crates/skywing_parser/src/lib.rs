//! Loader for Skywing schemas and input records (YAML/TOML/JSON formats).
//!
//! This module provides functionality to parse schema files into the
//! strongly-typed [`Schema`] structure, and payload files into [`Record`]s.
//!
//! A schema file maps each field to a rule string or a structured spec:
//!
//! ```rust
//! use skywing_parser::parse_yaml;
//!
//! let yaml = r#"
//! username: required|alphanum|between:[4,16]
//! email: required|email
//! password:
//!   rules: required|min:8
//!   messages:
//!     min: Password is too short
//! "#;
//!
//! let schema = parse_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.get("password").unwrap().message_for("min"), Some("Password is too short"));
//! ```

use skywing_core::{DataValue, Record, Schema};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading schemas or records.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Payload is not an object (or a list of objects)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a schema from a YAML string.
///
/// Field order in the document is the validation order.
pub fn parse_yaml(content: &str) -> Result<Schema> {
    let schema: Schema = serde_yaml_ng::from_str(content)?;
    Ok(schema)
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use skywing_parser::parse_toml;
///
/// let toml = r#"
/// email = "required|email"
///
/// [nickname]
/// rules = "min:3"
/// messages = { min = "too short" }
/// "#;
///
/// let schema = parse_toml(toml).unwrap();
/// assert_eq!(schema.get("email").unwrap().rules(), "required|email");
/// assert_eq!(schema.get("nickname").unwrap().message_for("min"), Some("too short"));
/// ```
pub fn parse_toml(content: &str) -> Result<Schema> {
    let schema: Schema =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(schema)
}

/// Parse a schema from a JSON string.
pub fn parse_json(content: &str) -> Result<Schema> {
    let schema: Schema = serde_json::from_str(content)?;
    Ok(schema)
}

/// Detect the file format from a path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `FileFormat::Yaml`
/// * `.toml` → `FileFormat::Toml`
/// * `.json` → `FileFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        "json" => Ok(FileFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from text in the given format.
pub fn parse_schema(content: &str, format: FileFormat) -> Result<Schema> {
    match format {
        FileFormat::Yaml => parse_yaml(content),
        FileFormat::Toml => parse_toml(content),
        FileFormat::Json => parse_json(content),
    }
}

/// Parse a schema from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use skywing_parser::parse_file;
/// use std::path::Path;
///
/// let schema = parse_file(Path::new("schemas/signup.yml")).unwrap();
/// println!("Loaded schema with {} fields", schema.len());
/// ```
pub fn parse_file(path: &Path) -> Result<Schema> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_schema(&content, format)
}

/// Parse input records from text in the given format.
///
/// The document is either a single object (one record) or, for YAML and
/// JSON, a list of objects.
pub fn parse_records(content: &str, format: FileFormat) -> Result<Vec<Record>> {
    let value: serde_json::Value = match format {
        FileFormat::Yaml => serde_yaml_ng::from_str(content)?,
        FileFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?
        }
        FileFormat::Json => serde_json::from_str(content)?,
    };
    records_from_value(value)
}

/// Parse input records from a file with automatic format detection.
pub fn parse_record_file(path: &Path) -> Result<Vec<Record>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_records(&content, format)
}

fn records_from_value(value: serde_json::Value) -> Result<Vec<Record>> {
    use serde_json::Value;

    match value {
        Value::Object(map) => Ok(vec![record_from_object(map)]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(record_from_object(map)),
                other => Err(ParserError::InvalidRecord(format!(
                    "item {index} is {}, expected an object",
                    json_kind(&other)
                ))),
            })
            .collect(),
        other => Err(ParserError::InvalidRecord(format!(
            "document is {}, expected an object or a list of objects",
            json_kind(&other)
        ))),
    }
}

fn record_from_object(map: serde_json::Map<String, serde_json::Value>) -> Record {
    map.into_iter()
        .map(|(field, value)| (field, DataValue::from(value)))
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skywing_core::FieldSpec;
    use std::io::Write;

    #[test]
    fn test_parse_yaml_rule_strings() {
        let yaml = r#"
name: required|min:2
email: required|email
color: in:[red,green,blue]
"#;

        let schema = parse_yaml(yaml).expect("Failed to parse YAML schema");

        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["name", "email", "color"]
        );
        assert_eq!(schema.get("color").map(FieldSpec::rules), Some("in:[red,green,blue]"));
    }

    #[test]
    fn test_parse_yaml_structured_spec() {
        let yaml = r#"
password:
  rules: required|min:8
  messages:
    required: Please choose a password
    min: Password is too short
password_confirmation: match:[password]
"#;

        let schema = parse_yaml(yaml).expect("Failed to parse YAML with messages");

        let password = schema.get("password").expect("password should be present");
        assert_eq!(password.rules(), "required|min:8");
        assert_eq!(password.message_for("required"), Some("Please choose a password"));
        assert_eq!(password.message_for("min"), Some("Password is too short"));
        assert!(matches!(
            schema.get("password_confirmation"),
            Some(FieldSpec::RuleString(_))
        ));
    }

    #[test]
    fn test_parse_yaml_schema_compiles() {
        let yaml = r#"
age: required|int|between:[1,3]
"#;
        let schema = parse_yaml(yaml).unwrap();
        let compiled = schema.compile().expect("schema should compile");
        assert_eq!(compiled.rule_count(), 3);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_yaml("- just\n- a list\n");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));

        let result = parse_yaml("name: [unclosed");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_yaml_rejects_non_string_rules() {
        let result = parse_yaml("age: 42\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_toml_schema() {
        let toml = r#"
name = "required|min:2"

[password]
rules = "required|min:8"

[password.messages]
min = "too short"
"#;

        let schema = parse_toml(toml).expect("Failed to parse TOML schema");

        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["name", "password"]);
        assert_eq!(schema.get("name").map(FieldSpec::rules), Some("required|min:2"));
        assert_eq!(
            schema.get("password").and_then(|spec| spec.message_for("min")),
            Some("too short")
        );
    }

    #[test]
    fn test_parse_toml_schema_preserves_order() {
        let toml = "zeta = \"required\"\nalpha = \"required\"\nmid = \"required\"\n";
        let schema = parse_toml(toml).expect("Failed to parse TOML schema");
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml("name = \"required\"\n[[[invalid syntax\n");
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_parse_json_schema_preserves_order() {
        let json = r#"{"zeta": "required", "alpha": {"rules": "email"}}"#;
        let schema = parse_json(json).expect("Failed to parse JSON schema");
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("schema.yaml")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("schema.YML")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("schema.toml")).unwrap(), FileFormat::Toml);
        assert_eq!(detect_format(Path::new("payload.json")).unwrap(), FileFormat::Json);
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("schema.xml"));
        assert!(matches!(
            result.unwrap_err(),
            ParserError::UnsupportedFormat(ref ext) if ext == "xml"
        ));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("schema"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_parse_records_single_object() {
        let records = parse_records(
            r#"{"name": "Ada", "age": 36, "tags": ["x"], "nickname": null}"#,
            FileFormat::Json,
        )
        .expect("Failed to parse record");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.get("name"), Some(&DataValue::String("Ada".into())));
        assert_eq!(record.get("age"), Some(&DataValue::Int(36)));
        assert_eq!(record.get("nickname"), Some(&DataValue::Null));
        assert!(record.get("tags").is_some_and(DataValue::is_container));
    }

    #[test]
    fn test_parse_records_list() {
        let yaml = r#"
- name: Ada
- name: Grace
  admin: true
"#;
        let records = parse_records(yaml, FileFormat::Yaml).expect("Failed to parse records");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("admin"), Some(&DataValue::Bool(true)));
    }

    #[test]
    fn test_parse_records_rejects_scalars() {
        let result = parse_records("42", FileFormat::Json);
        assert!(matches!(result.unwrap_err(), ParserError::InvalidRecord(_)));

        let result = parse_records(r#"[{"a": 1}, "b"]"#, FileFormat::Json);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("item 1"), "unexpected message: {err}");
    }

    #[test]
    fn test_parse_file_round_trip() {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(file, "email: required|email").unwrap();

        let schema = parse_file(file.path()).expect("Failed to parse schema file");
        assert_eq!(schema.get("email").map(FieldSpec::rules), Some("required|email"));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file(Path::new("does/not/exist.yml"));
        assert!(matches!(result.unwrap_err(), ParserError::IoError(_)));
    }
}
