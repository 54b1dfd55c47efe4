//! Rendering a pivot layout onto an abstract sheet writer.
//!
//! The writer trait keeps this crate free of any workbook format; the xlsx
//! backend and the test mocks both implement it.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use tracing::debug;

use evalsheet_model::{Patterns, Response};

use crate::schema::{ColumnKind, PivotSchema, build_schema};

/// Header of the first column, above the per-response labels.
pub const RESPONSE_LABEL_HEADER: &str = "Response";
/// Leaf header of an evaluation column.
pub const EVALUATION_LEAF_LABEL: &str = "Evaluation";
/// Leaf header of a comment column.
pub const COMMENT_LEAF_LABEL: &str = "Comment";

/// Header rows above the first data row.
pub const HEADER_ROWS: usize = 3;

/// Receives the rendered pivot sheet cell by cell.
///
/// Merges always span at least two cells; single-cell headers arrive through
/// [`SheetWriter::header_cell`].
pub trait SheetWriter {
    fn header_cell(&mut self, row: usize, col: usize, text: &str) -> Result<()>;

    /// Merge the inclusive row and column ranges into one header cell.
    fn header_merge(
        &mut self,
        rows: (usize, usize),
        cols: (usize, usize),
        text: &str,
    ) -> Result<()>;

    fn data_cell(&mut self, row: usize, col: usize, text: &str) -> Result<()>;
}

/// The complete layout of one pivoted sheet: metadata columns plus schema.
#[derive(Debug, Clone)]
pub struct PivotLayout {
    /// Metadata keys in first-seen order across all responses; one column
    /// each, between the response label and the first data column.
    pub metadata_keys: Vec<String>,
    pub schema: PivotSchema,
}

impl PivotLayout {
    /// Total column count of the rendered sheet.
    pub fn column_count(&self) -> usize {
        self.schema.last_col() + 1
    }
}

/// Build the layout for a group of responses destined for one sheet.
pub fn build_layout(responses: &[Response], patterns: &Patterns) -> PivotLayout {
    let mut metadata_keys: Vec<String> = Vec::new();
    for response in responses {
        for key in response.metadata.keys() {
            if !metadata_keys.iter().any(|known| known == key) {
                metadata_keys.push(key.to_string());
            }
        }
    }
    let first_col = 1 + metadata_keys.len();
    let schema = build_schema(responses, patterns, first_col);
    PivotLayout {
        metadata_keys,
        schema,
    }
}

/// Render header rows and one data row per response onto `writer`.
///
/// Pairs a response never answered render as explicit empty cells, so every
/// data row covers the full schema width.
pub fn render_sheet(
    responses: &[Response],
    layout: &PivotLayout,
    writer: &mut dyn SheetWriter,
) -> Result<()> {
    render_headers(layout, writer)?;

    for (offset, response) in responses.iter().enumerate() {
        let row = HEADER_ROWS + offset;
        writer.data_cell(row, 0, &response.label)?;
        for (col, key) in layout.metadata_keys.iter().enumerate() {
            let value = response.metadata.get(key).unwrap_or("");
            writer.data_cell(row, col + 1, value)?;
        }

        // Last record wins when a response repeats a pair.
        let mut values: HashMap<(&str, &str), (&str, &str)> = HashMap::new();
        for item in &response.items {
            values.insert(
                (item.main_item.as_str(), item.sub_item.as_str()),
                (item.evaluation.as_str(), item.comment.as_str()),
            );
        }

        for column in &layout.schema.columns {
            let pair = values
                .get(&(column.main_item.as_str(), column.sub_item.as_str()))
                .copied();
            let text = match (column.kind, pair) {
                (_, None) => "",
                (ColumnKind::Evaluation, Some((evaluation, _))) => evaluation,
                (ColumnKind::Comment, Some((_, comment))) => comment,
                // A collapsed column shows whichever side is filled in.
                (ColumnKind::Single, Some((evaluation, comment))) => {
                    if evaluation.is_empty() {
                        comment
                    } else {
                        evaluation
                    }
                }
            };
            writer.data_cell(row, column.index, text)?;
        }
    }

    debug!(
        responses = responses.len(),
        columns = layout.column_count(),
        "pivot sheet rendered"
    );
    Ok(())
}

fn render_headers(layout: &PivotLayout, writer: &mut dyn SheetWriter) -> Result<()> {
    let mut seen = HashSet::new();
    let mut merge = |writer: &mut dyn SheetWriter,
                     rows: (usize, usize),
                     cols: (usize, usize),
                     text: &str|
     -> Result<()> {
        if !seen.insert((rows, cols)) {
            return Ok(());
        }
        if rows.0 == rows.1 && cols.0 == cols.1 {
            writer.header_cell(rows.0, cols.0, text)
        } else {
            writer.header_merge(rows, cols, text)
        }
    };

    merge(writer, (0, HEADER_ROWS - 1), (0, 0), RESPONSE_LABEL_HEADER)?;
    for (col, key) in layout.metadata_keys.iter().enumerate() {
        merge(writer, (0, HEADER_ROWS - 1), (col + 1, col + 1), key)?;
    }

    for group in &layout.schema.groups {
        if group.is_single() {
            merge(
                writer,
                (0, HEADER_ROWS - 1),
                (group.col_start, group.col_end),
                &group.main_item,
            )?;
            continue;
        }

        merge(
            writer,
            (0, 0),
            (group.col_start, group.col_end),
            &group.main_item,
        )?;
        for span in &group.subs {
            merge(writer, (1, 1), (span.col_start, span.col_end()), &span.label)?;
            writer.header_cell(2, span.col_start, EVALUATION_LEAF_LABEL)?;
            writer.header_cell(2, span.col_start + 1, COMMENT_LEAF_LABEL)?;
        }
    }

    Ok(())
}
