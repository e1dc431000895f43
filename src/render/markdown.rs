//! Markdown rendering for extractions.

use crate::error::Result;
use crate::model::{Extraction, FormEntry, Table};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert an extraction to Markdown.
pub fn to_markdown(extraction: &Extraction, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(extraction)
}

/// Convert an extraction to Markdown with statistics.
pub fn to_markdown_with_stats(
    extraction: &Extraction,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(extraction)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render an extraction to Markdown.
    pub fn render(mut self, extraction: &Extraction) -> Result<String> {
        self.render_internal(extraction)
    }

    /// Render an extraction to Markdown with statistics.
    pub fn render_with_stats(mut self, extraction: &Extraction) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(extraction)?;
        Ok(RenderResult::new(content, self.stats))
    }

    fn render_internal(&mut self, extraction: &Extraction) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            self.render_frontmatter(&mut output, extraction);
        }

        let sections = self.options.sections;
        if sections.text && !extraction.lines.is_empty() {
            self.render_lines(&mut output, &extraction.lines);
        }
        if sections.forms && !extraction.forms.is_empty() {
            self.render_forms(&mut output, &extraction.forms);
        }
        let any_table = extraction
            .tables
            .iter()
            .any(|t| self.options.include_empty_tables || !is_blank_table(t));
        if sections.tables && any_table {
            output.push_str("## Extracted Tables\n\n");
            for (i, table) in extraction.tables.iter().enumerate() {
                self.render_table(&mut output, i + 1, table);
            }
        }

        Ok(output.trim().to_string())
    }

    fn render_frontmatter(&self, output: &mut String, extraction: &Extraction) {
        output.push_str("---\n");
        if let Some(ref title) = self.options.title {
            output.push_str(&format!("title: \"{}\"\n", escape_yaml(title)));
        }
        output.push_str(&format!("lines: {}\n", extraction.lines.len()));
        output.push_str(&format!("forms: {}\n", extraction.forms.len()));
        output.push_str(&format!("tables: {}\n", extraction.tables.len()));
        output.push_str("---\n\n");
    }

    fn render_lines(&mut self, output: &mut String, lines: &[String]) {
        output.push_str("## Extracted Text\n\n");
        for line in lines {
            if self.options.collect_stats {
                self.stats.add_line(line);
            }
            output.push_str(&self.escape_line(line));
            output.push_str("  \n");
        }
        output.push('\n');
    }

    fn render_forms(&mut self, output: &mut String, forms: &[FormEntry]) {
        output.push_str("## Extracted Forms\n\n");
        output.push_str("| Key | Value |\n| --- | --- |\n");
        for entry in forms {
            if self.options.collect_stats {
                self.stats.add_form(entry.has_value());
            }
            output.push_str(&format!(
                "| {} | {} |\n",
                self.cell(&entry.key),
                self.cell(&entry.value)
            ));
        }
        output.push('\n');
    }

    fn render_table(&mut self, output: &mut String, number: usize, table: &Table) {
        if is_blank_table(table) && !self.options.include_empty_tables {
            return;
        }

        if self.options.collect_stats {
            self.stats.add_table();
        }

        output.push_str(&format!("### Table {}\n\n", number));

        if table.is_empty() {
            output.push_str("_Empty table_\n\n");
            return;
        }

        for (i, row) in table.rows.iter().enumerate() {
            output.push('|');
            for cell in &row.cells {
                if self.options.collect_stats {
                    self.stats.add_cell(cell.is_empty());
                }
                output.push_str(&format!(" {} |", self.cell(cell)));
            }
            output.push('\n');

            // First row doubles as the header row
            if i == 0 {
                output.push('|');
                for _ in &row.cells {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    /// A whole text line, with leading block markers neutralized.
    fn escape_line(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_line_start(&escape_markdown(text))
        } else {
            text.to_string()
        }
    }

    /// Cell content on a single line with pipes escaped.
    fn cell(&self, text: &str) -> String {
        let text = text.replace('\n', " ");
        if self.options.escape_special_chars {
            escape_markdown(text.trim())
        } else {
            text.trim().replace('|', "\\|")
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Escape a marker that would open a heading, quote, list, or rule at the
/// start of a line (e.g. `# 42`, `- 3 PLCS`, `1. NOTE`).
fn escape_line_start(line: &str) -> String {
    let rest = line.trim_start();
    let lead = &line[..line.len() - rest.len()];

    match rest.chars().next() {
        Some('#' | '>' | '-' | '+' | '=') => format!("{}\\{}", lead, rest),
        Some(c) if c.is_ascii_digit() => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            match rest[digits..].chars().next() {
                Some('.' | ')') => format!("{}{}\\{}", lead, &rest[..digits], &rest[digits..]),
                _ => line.to_string(),
            }
        }
        _ => line.to_string(),
    }
}

fn is_blank_table(table: &Table) -> bool {
    table.rows.iter().all(|r| r.is_blank())
}

fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;
    use crate::render::Sections;

    fn sample() -> Extraction {
        let mut table = Table::new("t");
        table.add_row(TableRow::from_strings(["A", "B"]));
        table.add_row(TableRow::from_strings(["C", ""]));

        Extraction {
            lines: vec!["Title *draft*".to_string(), "Rev B".to_string()],
            forms: vec![FormEntry::new("Weight", "12kg"), FormEntry::new("Material", "")],
            tables: vec![table],
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("a|b"), "a\\|b");
    }

    #[test]
    fn test_escape_line_start() {
        assert_eq!(escape_line_start("# 42"), "\\# 42");
        assert_eq!(escape_line_start("- 3 PLCS"), "\\- 3 PLCS");
        assert_eq!(escape_line_start("  > ref"), "  \\> ref");
        assert_eq!(escape_line_start("1. NOTE"), "1\\. NOTE");
        assert_eq!(escape_line_start("12) DIA"), "12\\) DIA");
        assert_eq!(escape_line_start("12kg"), "12kg");
        assert_eq!(escape_line_start("R 0.5"), "R 0.5");
    }

    #[test]
    fn test_render_lines_keep_markers_literal() {
        let extraction = Extraction {
            lines: vec!["# 42".to_string(), "- 3 PLCS".to_string()],
            ..Extraction::default()
        };
        let result = to_markdown(&extraction, &RenderOptions::new()).unwrap();
        assert!(result.contains("\\# 42  \n\\- 3 PLCS"));

        let raw = to_markdown(&extraction, &RenderOptions::new().with_escaping(false)).unwrap();
        assert!(raw.contains("# 42  \n- 3 PLCS"));
    }

    #[test]
    fn test_render_sections() {
        let result = to_markdown(&sample(), &RenderOptions::new()).unwrap();
        assert!(result.starts_with("## Extracted Text"));
        assert!(result.contains("Title \\*draft\\*"));
        assert!(result.contains("| Weight | 12kg |"));
        assert!(result.contains("| Material |  |"));
        assert!(result.contains("### Table 1"));
        assert!(result.contains("| A | B |\n| --- | --- |\n| C |  |"));
    }

    #[test]
    fn test_render_selected_sections() {
        let options = RenderOptions::new().with_sections(Sections {
            text: false,
            forms: true,
            tables: false,
        });
        let result = to_markdown(&sample(), &options).unwrap();
        assert!(!result.contains("Extracted Text"));
        assert!(result.contains("Extracted Forms"));
        assert!(!result.contains("Extracted Tables"));
    }

    #[test]
    fn test_render_with_frontmatter() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_title("drawing \"A\".json");
        let result = to_markdown(&sample(), &options).unwrap();
        assert!(result.starts_with("---\ntitle: \"drawing \\\"A\\\".json\"\n"));
        assert!(result.contains("forms: 2\n"));
    }

    #[test]
    fn test_unescaped_cells_still_escape_pipes() {
        let extraction = Extraction {
            forms: vec![FormEntry::new("a|b", "x_y")],
            ..Extraction::default()
        };
        let result = to_markdown(&extraction, &RenderOptions::new().with_escaping(false)).unwrap();
        assert!(result.contains("| a\\|b | x_y |"));
    }

    #[test]
    fn test_empty_tables() {
        let extraction = Extraction {
            tables: vec![Table::new("t1"), Table::new("t2")],
            ..Extraction::default()
        };
        let shown = to_markdown(&extraction, &RenderOptions::new()).unwrap();
        assert!(shown.contains("### Table 2\n\n_Empty table_"));

        let hidden =
            to_markdown(&extraction, &RenderOptions::new().with_empty_tables(false)).unwrap();
        assert!(!hidden.contains("### Table"));
        assert!(!hidden.contains("## Extracted Tables"));
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_render_with_stats() {
        let result = to_markdown_with_stats(&sample(), &RenderOptions::new()).unwrap();
        assert_eq!(result.stats, ExtractionStats::from_extraction(&sample()));
    }
}
