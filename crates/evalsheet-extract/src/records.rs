//! The evaluation-row extraction state machine.
//!
//! Walks the rows below the located table start, classifying them into
//! main-item sections and emitting normalized `(MainItem, SubItem,
//! Evaluation, Comment)` records. A section with no recognizable content
//! legitimately contributes zero records.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use evalsheet_model::{CellGrid, EvaluationRecord, MainItemKind, Patterns};

use crate::locate::ColumnRoles;
use crate::normalize::normalize_cell;

/// Where the extractor currently is within the evaluation table.
#[derive(Debug, Clone, PartialEq)]
enum SectionState {
    /// No heading seen yet; rows are skipped until one appears.
    ScanningForMainItem,
    /// Standard section: each row may yield one sub-item record.
    InStandardSection {
        main_item: String,
        /// Legacy circled-number lookup built by the heading look-ahead,
        /// used only as a fallback label source.
        sub_labels: BTreeMap<String, String>,
    },
    /// Priority section: the whole block window is consumed in one step.
    InPrioritySection {
        main_item: String,
        /// Exclusive row bound of the section (next heading or sheet end).
        until_row: usize,
    },
    /// Request section: each row may yield one free-form record.
    InRequestSection { main_item: String },
}

/// Extract all evaluation records from the table starting at `start_row`.
///
/// Pure function of `(grid, roles, start_row)`; repeated calls yield
/// identical ordered output.
pub fn extract_records(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    roles: ColumnRoles,
    start_row: usize,
) -> Vec<EvaluationRecord> {
    let mut records = Vec::new();
    let mut state = SectionState::ScanningForMainItem;
    let mut row = start_row;

    while row < grid.row_count() {
        // A heading always starts a new section, whatever the current state.
        if let Some(main_item) = main_item_text(grid, patterns, row) {
            let kind = patterns.classify_main_item(&main_item);
            debug!(row, %main_item, %kind, "main item detected");
            let until_row = next_main_item_row(grid, patterns, row);
            state = match kind {
                MainItemKind::Standard => SectionState::InStandardSection {
                    sub_labels: collect_sub_labels(grid, patterns, row + 1, until_row),
                    main_item,
                },
                MainItemKind::Priority => SectionState::InPrioritySection {
                    main_item,
                    until_row,
                },
                MainItemKind::Request => SectionState::InRequestSection { main_item },
            };
            row += 1;
            continue;
        }

        match &state {
            SectionState::ScanningForMainItem => {
                row += 1;
            }
            SectionState::InStandardSection {
                main_item,
                sub_labels,
            } => {
                if let Some(record) =
                    standard_row_record(grid, patterns, roles, main_item, sub_labels, row)
                {
                    records.push(record);
                }
                row += 1;
            }
            SectionState::InPrioritySection {
                main_item,
                until_row,
            } => {
                extract_priority_blocks(grid, patterns, main_item, row, *until_row, &mut records);
                row = *until_row;
                state = SectionState::ScanningForMainItem;
            }
            SectionState::InRequestSection { main_item } => {
                if let Some(record) = request_row_record(grid, patterns, main_item, row) {
                    records.push(record);
                }
                row += 1;
            }
        }
    }

    records
}

/// The first cell in `row` matching the main-item heading pattern, if any.
fn main_item_text(grid: &dyn CellGrid, patterns: &Patterns, row: usize) -> Option<String> {
    (0..grid.last_col_of(row))
        .map(|col| normalize_cell(&grid.value(row, col)))
        .find(|value| patterns.is_main_item(value))
}

/// Row index of the next heading after `row`, or the row count.
fn next_main_item_row(grid: &dyn CellGrid, patterns: &Patterns, row: usize) -> usize {
    (row + 1..grid.row_count())
        .find(|&r| main_item_text(grid, patterns, r).is_some())
        .unwrap_or(grid.row_count())
}

/// Look ahead through a section's rows for circled-number sub-item labels.
fn collect_sub_labels(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    from_row: usize,
    until_row: usize,
) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    for row in from_row..until_row.min(grid.row_count()) {
        let mut number = String::new();
        let mut text = String::new();
        for col in 0..grid.last_col_of(row) {
            let value = normalize_cell(&grid.value(row, col));
            if patterns.is_enumerator(&value) && number.is_empty() {
                number = value;
            } else if !value.is_empty()
                && !patterns.is_bare_angle(&value)
                && !patterns.is_evaluation_code(&value)
            {
                text = value;
                break;
            }
        }
        if !number.is_empty() && !text.is_empty() {
            labels.insert(number, text);
        }
    }
    labels
}

/// Assemble one record from a standard-section row, if the row has content.
fn standard_row_record(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    roles: ColumnRoles,
    main_item: &str,
    sub_labels: &BTreeMap<String, String>,
    row: usize,
) -> Option<EvaluationRecord> {
    let max_cols = grid.last_col_of(row);
    let mut enumerator = String::new();
    let mut evaluation = String::new();
    let mut comment_parts: Vec<String> = Vec::new();

    for col in 0..max_cols {
        let value = normalize_cell(&grid.value(row, col));
        if value.is_empty() {
            continue;
        }
        if patterns.is_enumerator(&value) && enumerator.is_empty() {
            enumerator = value;
        } else if col == roles.eval_col {
            if patterns.is_evaluation_code(&value) {
                trace!(row, col, %value, "evaluation code found");
                evaluation = value;
            }
        } else if (col == roles.comment_col || col > roles.eval_col)
            && !patterns.is_evaluation_code(&value)
        {
            comment_parts.push(value);
        }
    }
    let comment = comment_parts.join(" ");

    if enumerator.is_empty() && evaluation.is_empty() && comment.is_empty() {
        return None;
    }

    // Effective label: the first cell that is not scaffolding.
    let mut label = String::new();
    for col in 0..max_cols {
        let value = normalize_cell(&grid.value(row, col));
        if !value.is_empty()
            && !patterns.is_bare_angle(&value)
            && !patterns.is_evaluation_code(&value)
            && !patterns.is_enumerator(&value)
        {
            label = value;
            break;
        }
    }
    if label.is_empty() {
        if let Some(known) = sub_labels.get(&enumerator) {
            label = known.clone();
        }
    }
    if enumerator.is_empty() && label.is_empty() {
        return None;
    }

    let sub_item = if enumerator.is_empty() {
        label
    } else if label.is_empty() {
        enumerator
    } else {
        format!("{enumerator} {label}")
    };
    trace!(row, %sub_item, %evaluation, %comment, "standard item extracted");
    Some(EvaluationRecord::new(main_item, sub_item, evaluation, comment))
}

/// Extract the side-by-side ranked blocks of a priority section.
///
/// The first row in the window containing any priority-header cell defines
/// the ordered blocks; the row immediately below supplies each block's
/// evaluation (start column) and description (remaining block columns). A
/// malformed section (no header row, or no row below it) is skipped whole.
fn extract_priority_blocks(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    main_item: &str,
    from_row: usize,
    until_row: usize,
    records: &mut Vec<EvaluationRecord>,
) {
    let header_row = (from_row..until_row.min(grid.row_count())).find(|&row| {
        (0..grid.last_col_of(row))
            .any(|col| patterns.is_priority_header(&normalize_cell(&grid.value(row, col))))
    });
    let Some(header_row) = header_row else {
        debug!(%main_item, "no priority header row; section skipped");
        return;
    };
    let data_row = header_row + 1;
    if data_row >= grid.row_count() {
        debug!(%main_item, "no data row below priority headers; section skipped");
        return;
    }

    let block_starts: Vec<usize> = (0..grid.last_col_of(header_row))
        .filter(|&col| patterns.is_priority_header(&normalize_cell(&grid.value(header_row, col))))
        .collect();
    let data_cols = grid.last_col_of(data_row);

    for (block, &start_col) in block_starts.iter().enumerate() {
        let evaluation = normalize_cell(&grid.value(data_row, start_col));
        let end_col = block_starts
            .get(block + 1)
            .copied()
            .unwrap_or(data_cols)
            .min(data_cols);

        let mut parts = Vec::new();
        for col in start_col + 1..end_col {
            let value = normalize_cell(&grid.value(data_row, col));
            if !value.is_empty()
                && !patterns.is_note(&value)
                && !patterns.is_evaluation_code(&value)
            {
                parts.push(value);
            }
        }
        let description = parts.join(" ");

        if !evaluation.is_empty() || !description.is_empty() {
            trace!(block, %evaluation, %description, "priority block extracted");
            // Priority items key off their description: SubItem == Comment.
            records.push(EvaluationRecord::new(
                main_item,
                description.clone(),
                evaluation,
                description,
            ));
        }
    }
}

/// Assemble one free-form record from a request-section row, if non-empty.
fn request_row_record(
    grid: &dyn CellGrid,
    patterns: &Patterns,
    main_item: &str,
    row: usize,
) -> Option<EvaluationRecord> {
    let mut parts = Vec::new();
    for col in 0..grid.last_col_of(row) {
        let value = normalize_cell(&grid.value(row, col));
        if !value.is_empty() && !patterns.is_evaluation_code(&value) {
            parts.push(value);
        }
    }
    if parts.is_empty() {
        return None;
    }
    let comment = parts.join(" | ");
    trace!(row, %comment, "request row extracted");
    Some(EvaluationRecord::new(main_item, "", "", comment))
}
