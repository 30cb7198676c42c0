// src/models/record.rs

//! Field values and insertion-ordered records.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single scraped or derived cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Plain text
    Text(String),

    /// Multi-line body split into lines
    Lines(Vec<String>),

    /// Person name to profile URL
    Links(BTreeMap<String, String>),

    /// Numeric value produced by normalization
    Number(f64),
}

impl FieldValue {
    /// Text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as a single CSV cell.
    pub fn to_cell(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.1}"),
            Self::Number(n) => n.to_string(),
            // Serializing strings and string maps cannot fail.
            Self::Lines(_) | Self::Links(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Column name to value mapping that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; an existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Text value of a field, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    /// Merge another record into this one, later values winning.
    pub fn extend(&mut self, other: Record) {
        for (key, value) in other.fields {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("a", "1");
        record.insert("b", "2");
        record.insert("a", "3");

        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.text("a"), Some("3"));
    }

    #[test]
    fn number_cells_keep_a_decimal() {
        assert_eq!(FieldValue::Number(6.0).to_cell(), "6.0");
        assert_eq!(FieldValue::Number(7.5).to_cell(), "7.5");
    }

    #[test]
    fn structured_cells_render_as_json() {
        let lines = FieldValue::Lines(vec!["P1 (3)".into(), "P2 (4.5)".into()]);
        assert_eq!(lines.to_cell(), r#"["P1 (3)","P2 (4.5)"]"#);

        let mut persons = BTreeMap::new();
        persons.insert("Ada Lovelace".to_string(), "https://example.com/ada".to_string());
        assert_eq!(
            FieldValue::Links(persons).to_cell(),
            r#"{"Ada Lovelace":"https://example.com/ada"}"#
        );
    }
}
