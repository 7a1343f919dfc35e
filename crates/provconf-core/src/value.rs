//! Configuration store values
//!
//! The store is dynamically typed: values can be scalars (string, int,
//! float, bool, null), sequences or mappings. Only strings are accepted
//! for headers, security definitions and region.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A value held by a configuration store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[derive(Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Sequence of values
    Sequence(Vec<Value>),
    /// Mapping of string keys to values
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// Get as str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Consume the value, returning the string or a type mismatch error
    /// naming `path`
    pub fn into_string(self, path: &str) -> Result<String> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(path, "string", other.type_name())),
        }
    }

    /// Returns the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_into_string() {
        let value = Value::from("secret123");
        assert_eq!(value.into_string("x_api_key").unwrap(), "secret123");
    }

    #[test]
    fn test_into_string_type_mismatch() {
        let err = Value::Integer(42).into_string("x_api_key").unwrap_err();

        assert_eq!(
            err.kind,
            ErrorKind::TypeMismatch {
                expected: "string".into(),
                got: "integer".into(),
            }
        );
        assert_eq!(err.path, Some("x_api_key".into()));
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: Value =
            serde_yaml::from_str("region: us-east-1\nretries: 3\nratio: 0.5\nzones: [a, b]\n")
                .unwrap();
        let Value::Mapping(map) = value else {
            panic!("expected a mapping");
        };

        assert_eq!(map["region"].as_str(), Some("us-east-1"));
        assert_eq!(map["retries"], Value::Integer(3));
        assert_eq!(map["ratio"].type_name(), "float");
        assert_eq!(
            map["zones"],
            Value::Sequence(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Float(2.5).type_name(), "float");
        assert_eq!(Value::Sequence(Vec::new()).type_name(), "sequence");
        assert_eq!(Value::Mapping(IndexMap::new()).type_name(), "mapping");
    }

    #[test]
    fn test_as_str_only_for_strings() {
        assert_eq!(Value::from("us-west-2").as_str(), Some("us-west-2"));
        assert_eq!(Value::from(7).as_str(), None);
        assert_eq!(Value::Null.as_str(), None);
    }
}
