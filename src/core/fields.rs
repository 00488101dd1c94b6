//! Call-supplied key/value fields for contextual logging

use super::field_value::FieldValue;
use std::fmt;

/// Ordered list of fields supplied at a single emission call
///
/// Order is kept so that a name supplied twice resolves to the value given
/// last when the fields are merged into a record.
///
/// # Example
///
/// ```
/// use rust_context_logger::{fields, Fields, FieldValue};
///
/// // Typed pairs
/// let typed = Fields::new().with("user_id", 42).with("active", true);
/// assert_eq!(typed.len(), 2);
///
/// // Flat alternating name/value list; the dangling "orphan" is dropped
/// let flat = fields!["user_id", 42, "active", true, "orphan"];
/// assert_eq!(flat.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pairs: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Build from an alternating `name, value, name, value, ...` list
    ///
    /// A trailing name without a value is ignored. Names that are not
    /// strings use their display form.
    pub fn from_flat(values: Vec<FieldValue>) -> Self {
        let mut pairs = Vec::with_capacity(values.len() / 2);
        let mut iter = values.into_iter();
        while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
            pairs.push((name.into_field_name(), value));
        }
        Self { pairs }
    }

    /// Add a field
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Add a field (mutable version)
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl From<Vec<FieldValue>> for Fields {
    fn from(values: Vec<FieldValue>) -> Self {
        Fields::from_flat(values)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}
