use std::fmt;

use serde_json::Value;

/// Raw value handed back by a tool backend.
///
/// Backends are free to return plain data or opaque objects; nothing here is
/// guaranteed to be serializable until it has gone through
/// [`crate::tools::serializer::serialize`].
#[derive(Debug)]
pub enum ToolOutput {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Vec<ToolOutput>),
    Mapping(Vec<(String, ToolOutput)>),
    Object(Box<dyn ForeignObject>),
}

/// Capabilities a foreign result object may expose to the serializer.
///
/// The serializer asks for [`dump`](ForeignObject::dump) first, then
/// [`attributes`](ForeignObject::attributes), and falls back to
/// [`describe`](ForeignObject::describe).
pub trait ForeignObject: fmt::Debug + Send + Sync {
    /// Structured dump of the object, if it knows how to produce one.
    fn dump(&self) -> Option<ToolOutput> {
        None
    }

    /// Named attributes of the object. Names starting with `_` are internal
    /// and never serialized.
    fn attributes(&self) -> Option<Vec<(String, ToolOutput)>> {
        None
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl ToolOutput {
    pub fn object(obj: impl ForeignObject + 'static) -> Self {
        ToolOutput::Object(Box::new(obj))
    }

    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, ToolOutput)>) -> Self {
        ToolOutput::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ToolOutput::Null,
            Value::Bool(b) => ToolOutput::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => ToolOutput::Int(i),
                (None, Some(u)) => ToolOutput::UInt(u),
                _ => ToolOutput::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ToolOutput::String(s),
            Value::Array(items) => {
                ToolOutput::Sequence(items.into_iter().map(ToolOutput::from).collect())
            }
            Value::Object(map) => {
                ToolOutput::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        ToolOutput::String(value.to_string())
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        ToolOutput::String(value)
    }
}

impl From<i64> for ToolOutput {
    fn from(value: i64) -> Self {
        ToolOutput::Int(value)
    }
}

impl From<u64> for ToolOutput {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(ToolOutput::UInt(value), ToolOutput::Int)
    }
}

impl From<bool> for ToolOutput {
    fn from(value: bool) -> Self {
        ToolOutput::Bool(value)
    }
}
