//! Spreadsheet export.
//!
//! Form entries go to a single two-column sheet; each table gets a sheet of
//! its own. Workbooks can be written to disk or kept in memory.
//!
//! # Example
//!
//! ```no_run
//! use untextract::export::{write_forms_xlsx, write_tables_xlsx, ExportOptions};
//!
//! fn main() -> untextract::Result<()> {
//!     let extraction = untextract::extract_file("analysis.json")?;
//!     let options = ExportOptions::default();
//!     write_forms_xlsx(&extraction.forms, "forms_output.xlsx", &options)?;
//!     write_tables_xlsx(&extraction.tables, "tables_output.xlsx", &options)?;
//!     Ok(())
//! }
//! ```

mod sheet_name;
mod xlsx;

pub use sheet_name::{SheetNamer, MAX_SHEET_NAME_LEN};
pub use xlsx::{forms_workbook, tables_workbook, MAX_CELL_CHARS};

use crate::error::Result;
use crate::model::{FormEntry, Table};
use std::path::Path;

/// Options for spreadsheet export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Name of the forms sheet
    pub forms_sheet_name: String,

    /// Prefix of table sheet names; the 1-based table number is appended
    pub table_sheet_prefix: String,

    /// Name of the placeholder sheet written when there are no tables
    pub empty_sheet_name: String,

    /// Write the source column indices as a header row above each table
    pub column_header: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the forms sheet name.
    pub fn with_forms_sheet(mut self, name: impl Into<String>) -> Self {
        self.forms_sheet_name = name.into();
        self
    }

    /// Set the table sheet prefix.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_sheet_prefix = prefix.into();
        self
    }

    /// Enable or disable the column index header row.
    pub fn with_column_header(mut self, include: bool) -> Self {
        self.column_header = include;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            forms_sheet_name: "Forms".to_string(),
            table_sheet_prefix: "Table_".to_string(),
            empty_sheet_name: "Tables".to_string(),
            column_header: false,
        }
    }
}

/// Write form entries to an xlsx file.
pub fn write_forms_xlsx<P: AsRef<Path>>(
    forms: &[FormEntry],
    path: P,
    options: &ExportOptions,
) -> Result<()> {
    let mut workbook = forms_workbook(forms, options)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Write tables to an xlsx file.
pub fn write_tables_xlsx<P: AsRef<Path>>(
    tables: &[Table],
    path: P,
    options: &ExportOptions,
) -> Result<()> {
    let mut workbook = tables_workbook(tables, options)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Serialize form entries to xlsx bytes.
pub fn forms_to_xlsx_bytes(forms: &[FormEntry], options: &ExportOptions) -> Result<Vec<u8>> {
    let mut workbook = forms_workbook(forms, options)?;
    Ok(workbook.save_to_buffer()?)
}

/// Serialize tables to xlsx bytes.
pub fn tables_to_xlsx_bytes(tables: &[Table], options: &ExportOptions) -> Result<Vec<u8>> {
    let mut workbook = tables_workbook(tables, options)?;
    Ok(workbook.save_to_buffer()?)
}
