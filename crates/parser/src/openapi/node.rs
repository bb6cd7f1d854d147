//! Permissive accessors over a YAML tree
//!
//! Every lookup yields a [`Node`] that may be absent. Reading an absent or
//! mistyped node returns `None`, never an error.

use serde_yaml::Value;

/// A possibly-absent position in a YAML tree
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    pub fn is_present(&self) -> bool {
        matches!(self.value, Some(v) if !v.is_null())
    }

    /// Child of a mapping by key
    pub fn get(&self, key: &str) -> Node<'a> {
        match self.value {
            Some(Value::Mapping(map)) => Node {
                value: map.get(key),
            },
            _ => Node::absent(),
        }
    }

    /// Scalar as text; numbers and booleans are rendered as written
    pub fn as_string(&self) -> Option<String> {
        match self.value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Scalar as text, or an empty string
    pub fn string_or_default(&self) -> String {
        self.as_string().unwrap_or_default()
    }

    /// Number of items in a sequence, 0 for anything else
    pub fn seq_len(&self) -> usize {
        match self.value {
            Some(Value::Sequence(seq)) => seq.len(),
            _ => 0,
        }
    }

    /// Mapping entries in source order with keys rendered as text
    ///
    /// Unquoted status codes such as `200:` load as numeric keys, so scalar
    /// keys of any kind are accepted.
    pub fn entries(&self) -> Vec<(String, Node<'a>)> {
        match self.value {
            Some(Value::Mapping(map)) => map
                .iter()
                .filter_map(|(k, v)| Node::new(k).as_string().map(|key| (key, Node::new(v))))
                .collect(),
            _ => Vec::new(),
        }
    }
}
