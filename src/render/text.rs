//! Plain text rendering for extractions.

use crate::error::Result;
use crate::model::Extraction;

use super::RenderOptions;

/// Convert an extraction to plain text.
///
/// Lines come first, then `key: value` pairs, then tables as tab-separated
/// rows. Disabled sections are left out.
pub fn to_text(extraction: &Extraction, options: &RenderOptions) -> Result<String> {
    let mut parts = Vec::new();

    if options.sections.text && !extraction.lines.is_empty() {
        parts.push(extraction.plain_text());
    }

    if options.sections.forms && !extraction.forms.is_empty() {
        let forms = extraction
            .forms
            .iter()
            .map(|e| format!("{}: {}", e.key, e.value))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(forms);
    }

    if options.sections.tables {
        for table in &extraction.tables {
            if !table.is_empty() {
                parts.push(table.plain_text());
            }
        }
    }

    Ok(parts.join("\n\n").trim().to_string())
}
