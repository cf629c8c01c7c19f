//! Query string parameters.

use serde::Serialize;
use serde_json::Value;

use crate::error::HostexError;

/// Ordered query parameters for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Flatten a parameter struct into pairs.
    ///
    /// Fields serialized as `null` are left out, so `Option::None` means
    /// "not sent" and `Some(0)` is sent as `0`. Arrays of scalars become
    /// comma-separated lists. Nested objects are rejected.
    pub fn from_params<P: Serialize + ?Sized>(params: &P) -> Result<Self, HostexError> {
        let fields = match serde_json::to_value(params).map_err(HostexError::Serialization)? {
            Value::Null => return Ok(Self::new()),
            Value::Object(fields) => fields,
            other => return Err(unsupported("parameters", &other)),
        };

        let mut query = Self::new();
        for (key, value) in fields {
            let rendered = match value {
                Value::Null => continue,
                Value::Array(items) => items
                    .iter()
                    .map(|item| scalar(&key, item))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(","),
                other => scalar(&key, &other)?,
            };
            query.push(key, rendered);
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn scalar(key: &str, value: &Value) -> Result<String, HostexError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(unsupported(key, other)),
    }
}

fn unsupported(what: &str, value: &Value) -> HostexError {
    HostexError::Serialization(serde::ser::Error::custom(format!(
        "{what}: cannot encode {value} as a query value"
    )))
}
