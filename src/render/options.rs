//! Rendering options and configuration.

/// Options for rendering an extraction.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Which sections to render
    pub sections: Sections,

    /// Include YAML frontmatter with title and count metadata
    pub include_frontmatter: bool,

    /// Title written to the frontmatter (usually the source file name)
    pub title: Option<String>,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Render tables whose cells are all empty
    pub include_empty_tables: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendered sections.
    pub fn with_sections(mut self, sections: Sections) -> Self {
        self.sections = sections;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the frontmatter title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable rendering of blank tables.
    pub fn with_empty_tables(mut self, include: bool) -> Self {
        self.include_empty_tables = include;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sections: Sections::ALL,
            include_frontmatter: false,
            title: None,
            escape_special_chars: true,
            include_empty_tables: true,
            collect_stats: false,
        }
    }
}

/// Sections of rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    /// "Extracted Text"
    pub text: bool,
    /// "Extracted Forms"
    pub forms: bool,
    /// "Extracted Tables"
    pub tables: bool,
}

impl Sections {
    /// Every section.
    pub const ALL: Sections = Sections {
        text: true,
        forms: true,
        tables: true,
    };

    /// Parse a comma-separated section list (e.g., "forms,tables").
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut sections = Sections {
            text: false,
            forms: false,
            tables: false,
        };
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "text" | "lines" => sections.text = true,
                "forms" | "kv" => sections.forms = true,
                "tables" => sections.tables = true,
                "all" => sections = Sections::ALL,
                other => return Err(format!("Unknown section: {}", other)),
            }
        }
        Ok(sections)
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::ALL
    }
}
