//! # untextract
//!
//! Reduce document-analysis block graphs into text, forms, and tables.
//!
//! A document-analysis service returns its result as a flat list of typed
//! blocks (pages, lines, words, tables, cells, key/value sets) linked by
//! id-based relationships. This library loads that response, reduces it into
//! three structured outputs, and renders them as Markdown, plain text, JSON,
//! or xlsx workbooks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untextract::{parse_file, reduce, render};
//!
//! fn main() -> untextract::Result<()> {
//!     let graph = parse_file("analysis.json")?;
//!     let extraction = reduce(&graph);
//!
//!     for entry in &extraction.forms {
//!         println!("{} = {}", entry.key, entry.value);
//!     }
//!
//!     let markdown = render::to_markdown(&extraction, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lines**: LINE text in the order the service emitted it
//! - **Forms**: key/value pairs, with empty values kept rather than dropped
//! - **Tables**: dense rectangular grids, gaps filled with empty strings
//! - **Tolerant**: dangling references and missing text never fail
//! - **Exports**: Markdown, plain text, JSON, and xlsx workbooks

pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod reduce;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use export::ExportOptions;
pub use model::{
    AnalysisResponse, Block, BlockType, DocumentGraph, EntityType, Extraction, FormEntry,
    JobStatus, Relationship, RelationshipType, ResponseDocument, Table, TableRow,
};
pub use reduce::{
    reduce, Features, PageSelection, ReduceOptions, Reducer, TextNormalization,
};
pub use render::{ExtractionStats, JsonFormat, RenderOptions, Sections};

use std::io::Read;
use std::path::Path;

/// Load an analysis response file into a document graph.
///
/// The file may hold one response object, an array of paginated responses,
/// or a bare array of blocks.
///
/// # Example
///
/// ```no_run
/// use untextract::parse_file;
///
/// let graph = parse_file("analysis.json").unwrap();
/// println!("Blocks: {}", graph.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentGraph> {
    let data = std::fs::read(path)?;
    parse_bytes(&data)
}

/// Load several response files as consecutive pages of one job.
///
/// # Example
///
/// ```no_run
/// use untextract::parse_files;
///
/// let graph = parse_files(&["page-1.json", "page-2.json"]).unwrap();
/// ```
pub fn parse_files<P: AsRef<Path>>(paths: &[P]) -> Result<DocumentGraph> {
    let mut responses = Vec::new();
    for path in paths {
        let data = std::fs::read(path)?;
        responses.extend(parse_document(&data)?.into_responses());
    }
    DocumentGraph::from_responses(responses)
}

/// Load an analysis response from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<DocumentGraph> {
    DocumentGraph::from_responses(parse_document(data)?.into_responses())
}

/// Load an analysis response from a reader.
///
/// # Example
///
/// ```no_run
/// use untextract::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("analysis.json").unwrap();
/// let graph = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(mut reader: R) -> Result<DocumentGraph> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_bytes(&data)
}

/// Load an analysis response file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P) -> Result<DocumentGraph> {
    let data = tokio::fs::read(path).await?;
    parse_bytes(&data)
}

/// Parse the raw JSON document without checking job status.
pub fn parse_document(data: &[u8]) -> Result<ResponseDocument> {
    detect_format_from_bytes(data)?;
    Ok(serde_json::from_slice(detect::strip_bom(data))?)
}

/// Load and reduce an analysis response file with default options.
///
/// # Example
///
/// ```no_run
/// use untextract::extract_file;
///
/// let extraction = untextract::extract_file("analysis.json").unwrap();
/// println!("{} tables", extraction.tables.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let graph = parse_file(path)?;
    Ok(reduce(&graph))
}

/// Extract plain text lines from an analysis response file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(extract_file(path)?.plain_text())
}

/// Convert an analysis response file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_markdown(&extraction, &RenderOptions::default())
}

/// Convert an analysis response file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_json(&extraction, format)
}

/// Builder for loading, reducing, and rendering analysis responses.
///
/// # Example
///
/// ```no_run
/// use untextract::{PageSelection, Untextract};
///
/// let result = Untextract::new()
///     .with_pages(PageSelection::Range(1..=2))
///     .with_frontmatter()
///     .sequential()
///     .parse("analysis.json")?;
///
/// let markdown = result.to_markdown()?;
/// result.write_tables_xlsx("tables_output.xlsx")?;
/// # Ok::<(), untextract::Error>(())
/// ```
pub struct Untextract {
    reduce_options: ReduceOptions,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl Untextract {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            reduce_options: ReduceOptions::default(),
            render_options: RenderOptions::default(),
            export_options: ExportOptions::default(),
        }
    }

    /// Restrict which extraction passes run.
    pub fn with_features(mut self, features: Features) -> Self {
        self.reduce_options = self.reduce_options.with_features(features);
        self
    }

    /// Extract text lines only.
    pub fn text_only(mut self) -> Self {
        self.reduce_options = self.reduce_options.text_only();
        self
    }

    /// Disable parallel table reconstruction.
    pub fn sequential(mut self) -> Self {
        self.reduce_options = self.reduce_options.sequential();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.reduce_options = self.reduce_options.with_pages(pages);
        self
    }

    /// Set Unicode normalization of extracted text.
    pub fn with_normalization(mut self, normalization: TextNormalization) -> Self {
        self.reduce_options = self.reduce_options.with_normalization(normalization);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set rendered sections.
    pub fn with_sections(mut self, sections: Sections) -> Self {
        self.render_options = self.render_options.with_sections(sections);
        self
    }

    /// Set spreadsheet export options.
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// Load and reduce a response file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UntextractResult> {
        let graph = parse_file(path)?;
        Ok(self.reduce(&graph))
    }

    /// Load and reduce several response files as pages of one job.
    pub fn parse_files<P: AsRef<Path>>(self, paths: &[P]) -> Result<UntextractResult> {
        let graph = parse_files(paths)?;
        Ok(self.reduce(&graph))
    }

    /// Load and reduce a response from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UntextractResult> {
        let graph = parse_bytes(data)?;
        Ok(self.reduce(&graph))
    }

    /// Reduce an already loaded graph.
    pub fn reduce(self, graph: &DocumentGraph) -> UntextractResult {
        let extraction = Reducer::new(self.reduce_options).reduce(graph);
        UntextractResult {
            extraction,
            render_options: self.render_options,
            export_options: self.export_options,
        }
    }
}

impl Default for Untextract {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reducing an analysis response.
pub struct UntextractResult {
    /// The extracted lines, forms, and tables
    pub extraction: Extraction,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl UntextractResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.extraction, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.extraction, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.extraction, format)
    }

    /// Write the forms workbook.
    pub fn write_forms_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::write_forms_xlsx(&self.extraction.forms, path, &self.export_options)
    }

    /// Write the tables workbook.
    pub fn write_tables_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::write_tables_xlsx(&self.extraction.tables, path, &self.export_options)
    }

    /// Statistics over the extraction.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_extraction(&self.extraction)
    }

    /// Get the extraction.
    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }
}
