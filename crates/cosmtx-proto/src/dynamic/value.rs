//! Runtime values accepted by the dynamic schema registry.

use crate::ProtoError;

/// A literal value in a mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Map(Mapping),
    Seq(Vec<Value>),
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Map(_) => "map",
            Value::Seq(_) => "seq",
        }
    }

    /// Convert a JSON value. `null` and integers outside `i64` are rejected.
    pub fn from_json(json: serde_json::Value) -> Result<Self, ProtoError> {
        Self::from_json_at(json, "$")
    }

    fn from_json_at(json: serde_json::Value, path: &str) -> Result<Self, ProtoError> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Err(ProtoError::UnsupportedValue {
                field: path.to_string(),
                reason: "null has no protobuf representation".to_string(),
            }),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if n.is_u64() {
                    Err(ProtoError::UnsupportedValue {
                        field: path.to_string(),
                        reason: format!("integer {} exceeds the 64-bit signed range", n),
                    })
                } else {
                    n.as_f64().map(Value::Float).ok_or_else(|| ProtoError::UnsupportedValue {
                        field: path.to_string(),
                        reason: format!("number {} is not representable", n),
                    })
                }
            }
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Self::from_json_at(item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Seq),
            Json::Object(object) => {
                let mut mapping = Mapping::new();
                for (key, item) in object {
                    let child = Self::from_json_at(item, &format!("{}.{}", path, key))?;
                    mapping.insert(key, child);
                }
                Ok(Value::Map(mapping))
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ProtoError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Value::from_json(json)
    }
}

/// An insertion-ordered string-keyed mapping.
///
/// Order matters: it fixes the field numbers of a synthesized schema.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Mapping {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Mapping::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert a JSON object, keeping its key order.
    pub fn from_json(json: serde_json::Value) -> Result<Self, ProtoError> {
        match Value::from_json(json)? {
            Value::Map(mapping) => Ok(mapping),
            other => Err(ProtoError::TypeMismatch {
                field: "$".to_string(),
                expected: "map",
                found: other.kind_name(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}
