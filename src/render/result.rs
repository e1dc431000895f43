//! Rendering result with statistics.

use crate::model::Extraction;
use serde::{Deserialize, Serialize};

/// Result of rendering an extraction, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics about an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of text lines
    pub line_count: u32,

    /// Approximate word count over lines (whitespace-separated tokens)
    pub word_count: u32,

    /// Number of form entries
    pub form_count: u32,

    /// Form entries whose value is empty
    pub empty_value_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Total cells across all tables, placeholders included
    pub cell_count: u32,

    /// Cells that are empty (missing or without words)
    pub empty_cell_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute statistics for an extraction.
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let mut stats = Self::new();
        for line in &extraction.lines {
            stats.add_line(line);
        }
        for entry in &extraction.forms {
            stats.add_form(entry.has_value());
        }
        for table in &extraction.tables {
            stats.add_table();
            for cell in table.rows.iter().flat_map(|r| &r.cells) {
                stats.add_cell(cell.is_empty());
            }
        }
        stats
    }

    /// Record one text line.
    pub fn add_line(&mut self, line: &str) {
        self.line_count += 1;
        self.word_count += line.split_whitespace().count() as u32;
    }

    /// Record one form entry.
    pub fn add_form(&mut self, has_value: bool) {
        self.form_count += 1;
        if !has_value {
            self.empty_value_count += 1;
        }
    }

    /// Record one table.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Record one table cell.
    pub fn add_cell(&mut self, empty: bool) {
        self.cell_count += 1;
        if empty {
            self.empty_cell_count += 1;
        }
    }

    /// Merge statistics from another instance.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.line_count += other.line_count;
        self.word_count += other.word_count;
        self.form_count += other.form_count;
        self.empty_value_count += other.empty_value_count;
        self.table_count += other.table_count;
        self.cell_count += other.cell_count;
        self.empty_cell_count += other.empty_cell_count;
    }
}
