//! Input values and records.
//!
//! This module provides the types for representing the data handed to the
//! validation engine: a single [`DataValue`] and a [`Record`] of named values.

use std::collections::HashMap;

/// A value in an input record.
///
/// Represents the different kinds of values a request payload or form
/// submission can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Explicit null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// List/array value
    List(Vec<DataValue>),
    /// Map/object value
    Map(HashMap<String, DataValue>),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns true for list and map values.
    pub fn is_container(&self) -> bool {
        matches!(self, DataValue::List(_) | DataValue::Map(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "int64",
            DataValue::Float(_) => "float64",
            DataValue::String(_) => "string",
            DataValue::List(_) => "list",
            DataValue::Map(_) => "map",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a list.
    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<i32> for DataValue {
    fn from(i: i32) -> Self {
        DataValue::Int(i64::from(i))
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(items: Vec<DataValue>) -> Self {
        DataValue::List(items)
    }
}

impl From<HashMap<String, DataValue>> for DataValue {
    fn from(map: HashMap<String, DataValue>) -> Self {
        DataValue::Map(map)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => DataValue::Null,
            Value::Bool(b) => DataValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DataValue::Int(i),
                None => DataValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => DataValue::String(s),
            Value::Array(items) => DataValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                DataValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// A single input record: field name to value.
///
/// A field that is absent from the record is distinct from a field that is
/// present with [`DataValue::Null`] or an empty string.
pub type Record = HashMap<String, DataValue>;

/// Builds a [`Record`] from `(name, value)` pairs.
///
/// # Example
///
/// ```rust
/// use skywing_core::{record_from, DataValue};
///
/// let record = record_from([("name", DataValue::from("Ada")), ("age", DataValue::from(36))]);
/// assert_eq!(record.get("age"), Some(&DataValue::Int(36)));
/// ```
pub fn record_from<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<DataValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_data_value_types() {
        assert_eq!(DataValue::Null.type_name(), "null");
        assert_eq!(DataValue::String("test".into()).type_name(), "string");
        assert_eq!(DataValue::Int(42).type_name(), "int64");
        assert_eq!(DataValue::Float(3.5).type_name(), "float64");
        assert_eq!(DataValue::Bool(true).type_name(), "boolean");
        assert_eq!(DataValue::List(vec![]).type_name(), "list");
    }

    #[test]
    fn test_data_value_conversions() {
        let val = DataValue::from("hello");
        assert_eq!(val.as_string(), Some("hello"));
        assert_eq!(val.as_int(), None);

        let val = DataValue::from(42);
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_float(), Some(42.0));
        assert_eq!(val.as_string(), None);

        assert_eq!(DataValue::from(None::<i64>), DataValue::Null);
        assert!(DataValue::from(vec![DataValue::Int(1)]).is_container());
    }

    #[test]
    fn test_from_json() {
        let value = DataValue::from(json!({
            "name": "Ada",
            "age": 36,
            "score": 9.5,
            "tags": ["a", null],
            "admin": false
        }));

        let DataValue::Map(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map["name"], DataValue::String("Ada".into()));
        assert_eq!(map["age"], DataValue::Int(36));
        assert_eq!(map["score"], DataValue::Float(9.5));
        assert_eq!(
            map["tags"],
            DataValue::List(vec![DataValue::String("a".into()), DataValue::Null])
        );
        assert_eq!(map["admin"], DataValue::Bool(false));
    }

    #[test]
    fn test_record_from_pairs() {
        let record = record_from([("a", 1), ("b", 2)]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), Some(&DataValue::Int(2)));
        assert!(!record.contains_key("c"));
    }
}
