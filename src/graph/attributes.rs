//! Ordered Graphviz attribute storage

use std::fmt;

/// A scalar attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl AttrValue {
    /// Empty strings are never rendered
    pub fn is_empty(&self) -> bool {
        matches!(self, AttrValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => write!(f, "{text}"),
            AttrValue::Integer(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::Integer(value as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// Key/value attributes rendered in insertion order
///
/// Overwriting a key keeps its original position. Unset and empty values
/// keep their slot but are skipped when rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    entries: Vec<(String, Option<AttrValue>)>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.store(key, Some(value.into()));
    }

    pub fn unset(&mut self, key: &str) {
        self.store(key, None);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Copy every renderable entry of `other` into this bag
    pub fn extend(&mut self, other: &AttributeBag) {
        for (key, value) in other.iter() {
            self.set(key, value.clone());
        }
    }

    /// Entries that will be rendered, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((key.as_str(), value)),
            _ => None,
        })
    }

    /// True when nothing would be rendered
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Render as `key="value"` pairs joined by `"; "`
    pub fn render(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}=\"{}\"", escape(&value.to_string())))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn store(&mut self, key: &str, value: Option<AttrValue>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

impl fmt::Display for AttributeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Escape a string for use inside a double-quoted DOT ID.
pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
