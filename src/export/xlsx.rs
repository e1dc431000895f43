//! xlsx workbook builders.

use super::{ExportOptions, SheetNamer};
use crate::error::{Error, Result};
use crate::model::{FormEntry, Table};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// Most characters a single worksheet cell holds.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Build the forms workbook: one sheet, `Key` and `Value` columns.
pub fn forms_workbook(forms: &[FormEntry], options: &ExportOptions) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let mut namer = SheetNamer::new();
    let header = Format::new().set_bold();

    let name = namer.claim(&options.forms_sheet_name);
    let sheet = workbook.add_worksheet();
    sheet.set_name(name.as_str())?;
    sheet.write_string_with_format(0, 0, "Key", &header)?;
    sheet.write_string_with_format(0, 1, "Value", &header)?;

    for (i, entry) in forms.iter().enumerate() {
        let row = row_number(i + 1)?;
        sheet.write_string(row, 0, cell_text(&name, row, 0, &entry.key))?;
        sheet.write_string(row, 1, cell_text(&name, row, 1, &entry.value))?;
    }

    log::debug!("Forms workbook: {} entries", forms.len());
    Ok(workbook)
}

/// Build the tables workbook: one sheet per table, row-major.
pub fn tables_workbook(tables: &[Table], options: &ExportOptions) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let mut namer = SheetNamer::new();

    if tables.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(namer.claim(&options.empty_sheet_name))?;
        return Ok(workbook);
    }

    for (i, table) in tables.iter().enumerate() {
        let name = namer.claim(&format!("{}{}", options.table_sheet_prefix, i + 1));
        let sheet = workbook.add_worksheet();
        sheet.set_name(name.as_str())?;
        write_table(sheet, &name, table, options)?;
    }

    log::debug!("Tables workbook: {} sheets", tables.len());
    Ok(workbook)
}

fn write_table(
    sheet: &mut Worksheet,
    name: &str,
    table: &Table,
    options: &ExportOptions,
) -> Result<()> {
    let mut first_row = 0;

    if options.column_header {
        let header = Format::new().set_bold();
        for (c, index) in table.column_indices.iter().enumerate() {
            sheet.write_number_with_format(0, column_number(c)?, f64::from(*index), &header)?;
        }
        first_row = 1;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_num = row_number(first_row + r)?;
        for (c, text) in row.cells.iter().enumerate() {
            // Placeholders stay blank cells
            if !text.is_empty() {
                let col = column_number(c)?;
                sheet.write_string(row_num, col, cell_text(name, row_num, col, text))?;
            }
        }
    }

    Ok(())
}

/// Cut text to what a cell holds, on a char boundary.
fn cell_text<'a>(sheet: &str, row: u32, col: u16, text: &'a str) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            log::warn!(
                "Sheet {}: cell ({}, {}) truncated to {} characters",
                sheet,
                row,
                col,
                MAX_CELL_CHARS
            );
            &text[..end]
        }
        None => text,
    }
}

fn row_number(i: usize) -> Result<u32> {
    u32::try_from(i).map_err(|_| Error::Export(format!("row {} out of range", i)))
}

fn column_number(i: usize) -> Result<u16> {
    u16::try_from(i).map_err(|_| Error::Export(format!("column {} out of range", i)))
}
