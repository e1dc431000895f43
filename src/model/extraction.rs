//! Reducer outputs.

use super::Table;
use serde::{Deserialize, Serialize};

/// A key/value pair read from a form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    /// Key text
    #[serde(rename = "Key")]
    pub key: String,

    /// Value text (empty when the key has no resolvable value)
    #[serde(rename = "Value")]
    pub value: String,
}

impl FormEntry {
    /// Create a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check whether the value is empty.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Text lines, form entries, and tables reduced from one document graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// LINE texts in discovery order
    pub lines: Vec<String>,

    /// Form entries in discovery order
    pub forms: Vec<FormEntry>,

    /// Tables in discovery order
    pub tables: Vec<Table>,
}

impl Extraction {
    /// Create an empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.forms.is_empty() && self.tables.is_empty()
    }

    /// Look up the value of the first entry with this key.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.forms
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Lines joined with newlines.
    pub fn plain_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Split into (lines, forms, tables).
    pub fn into_parts(self) -> (Vec<String>, Vec<FormEntry>, Vec<Table>) {
        (self.lines, self.forms, self.tables)
    }
}
