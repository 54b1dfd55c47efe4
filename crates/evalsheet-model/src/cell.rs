use chrono::NaiveDate;

/// A raw typed spreadsheet cell as supplied by a workbook reader.
///
/// Formula cells never appear here: readers hand over the cached formula
/// result, so downstream code only ever sees these four shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Verbatim text content.
    Text(String),
    /// A numeric cell; may still turn out to be a serial date.
    Number(f64),
    /// A cell whose display format already marks it as a date.
    Date(NaiveDate),
    /// Missing or empty cell.
    Blank,
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Blank
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// An already-fully-loaded, in-memory cell grid.
///
/// All extraction operates on this abstraction; there is no I/O behind it.
/// Coordinates are zero-based. Reads outside the populated area return
/// [`CellValue::Blank`].
pub trait CellGrid {
    /// The cell at `(row, col)`, or `Blank` when out of range.
    fn value(&self, row: usize, col: usize) -> CellValue;

    /// Number of rows in the grid.
    fn row_count(&self) -> usize;

    /// Number of populated cells in `row` (exclusive column bound).
    fn last_col_of(&self, row: usize) -> usize;
}

/// Row-major owned grid, the standard [`CellGrid`] implementation.
///
/// Workbook readers produce one per sheet; tests build them literally.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    rows: Vec<Vec<CellValue>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Place a value at `(row, col)`, growing the grid with blanks as needed.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Blank);
        }
        cells[col] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CellGrid for MemoryGrid {
    fn value(&self, row: usize, col: usize) -> CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .cloned()
            .unwrap_or(CellValue::Blank)
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn last_col_of(&self, row: usize) -> usize {
        self.rows.get(row).map(Vec::len).unwrap_or(0)
    }
}
