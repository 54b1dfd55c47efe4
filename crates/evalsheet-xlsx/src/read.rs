//! Loading workbook sheets into in-memory grids.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::{debug, trace};

use evalsheet_model::{CellGrid, CellValue, MemoryGrid, Patterns};

use crate::error::ReadError;

/// One sheet loaded from a workbook, with its original name.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    pub name: String,
    pub grid: MemoryGrid,
}

/// True when a sheet holds a filled-in response.
///
/// Aggregate summary sheets, the cover sheet, and sheets with a blank name
/// are never responses.
pub fn is_response_sheet(name: &str, patterns: &Patterns) -> bool {
    let name = name.trim();
    !name.is_empty()
        && name != patterns.cover_sheet_name()
        && !name.starts_with(patterns.summary_sheet_prefix())
}

/// Read every response sheet of an xlsx workbook.
///
/// Sheets appear in workbook order. Cell coordinates are absolute, so the
/// grids line up with what a user sees in a spreadsheet application.
pub fn read_workbook(path: &Path, patterns: &Patterns) -> Result<Vec<SheetGrid>, ReadError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        if !is_response_sheet(&name, patterns) {
            trace!(sheet = %name, "skipping non-response sheet");
            continue;
        }
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| ReadError::Sheet {
                sheet: name.clone(),
                source,
            })?;

        let mut grid = MemoryGrid::new();
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        for (row, cells) in range.rows().enumerate() {
            for (col, data) in cells.iter().enumerate() {
                let value = cell_value(data);
                if !value.is_blank() {
                    grid.set(
                        row_offset as usize + row,
                        col_offset as usize + col,
                        value,
                    );
                }
            }
        }
        debug!(sheet = %name, rows = grid.row_count(), "sheet loaded");
        sheets.push(SheetGrid { name, grid });
    }
    Ok(sheets)
}

/// Map one calamine cell onto the model cell type.
///
/// Date-formatted cells become [`CellValue::Date`]; plain numerics stay
/// numbers so the serial-date heuristic can decide later. Error cells read
/// as blank.
fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Blank,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::Text(if *flag { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(stamp) => match stamp.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(stamp.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
    }
}
