//! Run summaries printed after each command.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use evalsheet_xlsx::SheetStats;

use crate::commands::ExtractResult;

pub fn print_extract_summary(result: &ExtractResult) {
    println!("Responses: {}", result.out.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Metadata"),
        header_cell("Records"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in &result.sheets {
        table.add_row(vec![
            Cell::new(&sheet.sheet),
            Cell::new(sheet.metadata),
            Cell::new(sheet.records),
        ]);
    }
    println!("{table}");
}

pub fn print_export_summary(stats: &[SheetStats]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Responses"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in stats {
        table.add_row(vec![
            Cell::new(&sheet.sheet),
            Cell::new(sheet.responses),
            Cell::new(sheet.columns),
        ]);
    }
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
