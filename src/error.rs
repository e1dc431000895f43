//! Error types for untextract library.

use std::io;
use thiserror::Error;

/// Result type alias for untextract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, rendering, or exporting.
///
/// The reducer itself never produces these: incomplete block graphs degrade
/// to empty strings and skipped references instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The response body is not valid JSON or does not match the block schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not look like an analysis response.
    #[error("Unknown input format: expected a JSON object or array")]
    UnknownFormat,

    /// The remote analysis job finished in the FAILED state.
    #[error("Analysis job failed: {0}")]
    JobFailed(String),

    /// The response belongs to a job that has not finished yet.
    #[error("Analysis job is still in progress")]
    JobInProgress,

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error writing a spreadsheet workbook.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        match err {
            rust_xlsxwriter::XlsxError::IoError(e) => Error::Io(e),
            _ => Error::Export(err.to_string()),
        }
    }
}
