//! JSON rendering for extractions.

use crate::error::{Error, Result};
use crate::model::Extraction;
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an extraction to JSON.
pub fn to_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    serialize(extraction, format)
}

/// Convert form entries to a flat JSON object of key to value.
///
/// When a key repeats, the first entry
/// wins, matching [`Extraction::form_value`]. Entries with an empty key
/// are left out.
pub fn to_forms_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    let mut fields = Map::new();
    for entry in extraction.forms.iter().filter(|e| !e.key.is_empty()) {
        if !fields.contains_key(&entry.key) {
            fields.insert(entry.key.clone(), Value::String(entry.value.clone()));
        }
    }
    serialize(&fields, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
