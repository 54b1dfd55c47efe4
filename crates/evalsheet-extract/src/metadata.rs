//! Header metadata scanning above the evaluation table.

use tracing::trace;

use evalsheet_model::{CellGrid, Patterns, ResponseMetadata};

use crate::normalize::normalize_cell;

/// Extract ordered key/value header pairs from the rows above the table.
///
/// `limit` is the exclusive row bound: the sentinel row when a table was
/// located, the whole sheet otherwise. Within each row, the first non-empty,
/// non-note cell becomes a candidate key and the next non-empty cell its
/// value; pairs with an empty or note-classified value are dropped and
/// scanning resumes after the consumed value cell. Later rows overwrite
/// earlier keys.
pub fn scan_metadata(grid: &dyn CellGrid, patterns: &Patterns, limit: usize) -> ResponseMetadata {
    let mut metadata = ResponseMetadata::new();
    let limit = limit.min(grid.row_count());

    for row in 0..limit {
        if row_contains_sentinel(grid, patterns, row) {
            trace!(row, "skipping sentinel row during metadata scan");
            continue;
        }

        let max_cols = grid.last_col_of(row);
        let mut col = 0;
        while col < max_cols {
            while col < max_cols && normalize_cell(&grid.value(row, col)).is_empty() {
                col += 1;
            }
            if col >= max_cols {
                break;
            }
            let key = normalize_cell(&grid.value(row, col));
            if patterns.is_note(&key) {
                col += 1;
                continue;
            }

            let mut value_col = col + 1;
            while value_col < max_cols && normalize_cell(&grid.value(row, value_col)).is_empty() {
                value_col += 1;
            }
            let value = if value_col < max_cols {
                normalize_cell(&grid.value(row, value_col))
            } else {
                String::new()
            };

            if !value.is_empty() && !patterns.is_note(&value) {
                trace!(row, key_col = col, value_col, %key, %value, "metadata pair");
                metadata.insert(key, value);
                col = value_col + 1;
            } else {
                col += 1;
            }
        }
    }

    metadata
}

fn row_contains_sentinel(grid: &dyn CellGrid, patterns: &Patterns, row: usize) -> bool {
    (0..grid.last_col_of(row))
        .any(|col| normalize_cell(&grid.value(row, col)) == patterns.table_header_token())
}
