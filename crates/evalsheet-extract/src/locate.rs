//! Locating the evaluation table and its evaluation/comment columns.

use tracing::{debug, trace};

use evalsheet_model::{CellGrid, Patterns};

use crate::normalize::normalize_cell;

/// Columns are scanned this far when a header row reports no width.
const MAX_HEADER_SCAN_COLS: usize = 52;

/// Data rows probed by the column fallback heuristics.
const COLUMN_PROBE_ROWS: usize = 10;

/// Find the row where evaluation data starts.
///
/// Scans rows top-to-bottom, cells left-to-right, for the first cell whose
/// normalized value equals the table header token, and returns the row
/// immediately below it. `None` means the sheet carries no evaluation data,
/// which is not an error.
pub fn find_table_start(grid: &dyn CellGrid, patterns: &Patterns) -> Option<usize> {
    for row in 0..grid.row_count() {
        for col in 0..grid.last_col_of(row) {
            if normalize_cell(&grid.value(row, col)) == patterns.table_header_token() {
                debug!(row, col, "evaluation table header located");
                return Some(row + 1);
            }
        }
    }
    debug!("no evaluation table header in sheet");
    None
}

/// Resolved roles of the evaluation table's two value columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub eval_col: usize,
    pub comment_col: usize,
}

/// Determine which columns hold evaluation codes and comments.
///
/// The row immediately above `start_row` is the column header row; exact
/// matches of the evaluation/comment header tokens win. Unresolved roles
/// fall back to probing the first data rows: the evaluation column is the
/// first one showing an evaluation-code match, the comment column the first
/// one showing free text. Returns `None` only when no evaluation column can
/// be resolved at all, in which case the table yields no data.
pub fn detect_column_roles(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    start_row: usize,
) -> Option<ColumnRoles> {
    let header_row = start_row.checked_sub(1)?;

    let mut max_cols = grid.last_col_of(header_row);
    if max_cols == 0 {
        max_cols = MAX_HEADER_SCAN_COLS;
    }

    let mut eval_col = None;
    let mut comment_col = None;
    for col in 0..max_cols {
        let value = normalize_cell(&grid.value(header_row, col));
        if value == patterns.evaluation_header_token() && eval_col.is_none() {
            eval_col = Some(col);
        } else if value == patterns.comment_header_token() && comment_col.is_none() {
            comment_col = Some(col);
        }
    }

    if eval_col.is_none() {
        eval_col = probe_for_evaluation_column(grid, patterns, start_row);
    }
    let eval_col = match eval_col {
        Some(col) => col,
        None => {
            debug!(start_row, "no evaluation column resolved; table yields no data");
            return None;
        }
    };

    if comment_col.is_none() || comment_col == Some(eval_col) {
        comment_col = probe_for_comment_column(grid, patterns, start_row);
    }
    if comment_col.is_none() || comment_col == Some(eval_col) {
        comment_col = (eval_col + 1..max_cols)
            .find(|&col| column_has_comment_data(grid, patterns, start_row, col));
    }
    let comment_col = comment_col.unwrap_or(eval_col + 1);

    debug!(eval_col, comment_col, "evaluation table columns resolved");
    Some(ColumnRoles {
        eval_col,
        comment_col,
    })
}

/// First column showing an evaluation-code match in the probe window.
fn probe_for_evaluation_column(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    start_row: usize,
) -> Option<usize> {
    for row in probe_rows(grid, start_row) {
        for col in 0..grid.last_col_of(row) {
            let value = normalize_cell(&grid.value(row, col));
            if patterns.is_evaluation_code(&value) {
                trace!(row, col, value, "evaluation code probe hit");
                return Some(col);
            }
        }
    }
    None
}

/// First column showing free text (non-empty, not a code, not a bare angle
/// bracket) in the probe window.
fn probe_for_comment_column(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    start_row: usize,
) -> Option<usize> {
    for row in probe_rows(grid, start_row) {
        for col in 0..grid.last_col_of(row) {
            let value = normalize_cell(&grid.value(row, col));
            if !value.is_empty()
                && !patterns.is_evaluation_code(&value)
                && !patterns.is_bare_angle(&value)
            {
                trace!(row, col, value, "comment text probe hit");
                return Some(col);
            }
        }
    }
    None
}

fn column_has_comment_data(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    start_row: usize,
    col: usize,
) -> bool {
    probe_rows(grid, start_row).any(|row| {
        let value = normalize_cell(&grid.value(row, col));
        !value.is_empty()
            && !patterns.is_evaluation_code(&value)
            && !patterns.is_bare_angle(&value)
    })
}

fn probe_rows(grid: &dyn CellGrid, start_row: usize) -> std::ops::Range<usize> {
    start_row..grid.row_count().min(start_row + COLUMN_PROBE_ROWS)
}
