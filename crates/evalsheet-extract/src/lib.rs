//! Heuristic table extraction for survey evaluation sheets.
//!
//! Classifies the rows and cells of an in-memory grid into metadata headers
//! and evaluation items without a fixed schema, relying on textual pattern
//! recognition rather than cell coordinates. Extraction is pure and
//! deterministic: a sheet with no recognizable structure yields an empty
//! [`Extraction`], never an error.

pub mod locate;
pub mod metadata;
pub mod normalize;
pub mod records;

pub use locate::{ColumnRoles, detect_column_roles, find_table_start};
pub use metadata::scan_metadata;
pub use normalize::{DATE_FORMAT, SERIAL_DATE_MAX, SERIAL_DATE_MIN, normalize_cell, tidy_text};
pub use records::extract_records;

use evalsheet_model::{CellGrid, Extraction, Patterns};

/// Run one full extraction pass over one sheet.
///
/// Locates the evaluation table, scans header metadata above it, resolves
/// the evaluation/comment columns, and walks the table rows. Every
/// structural failure degrades to an empty scope rather than an error.
pub fn extract_response(grid: &dyn CellGrid, patterns: &Patterns) -> Extraction {
    let start = find_table_start(grid, patterns);
    let metadata_limit = match start {
        Some(start_row) => start_row.saturating_sub(1),
        None => grid.row_count(),
    };
    let metadata = scan_metadata(grid, patterns, metadata_limit);

    let items = match start {
        None => Vec::new(),
        Some(start_row) => match detect_column_roles(grid, patterns, start_row) {
            None => Vec::new(),
            Some(roles) => extract_records(grid, patterns, roles, start_row),
        },
    };

    Extraction { metadata, items }
}
