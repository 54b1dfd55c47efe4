use evalsheet_extract::{ColumnRoles, detect_column_roles, extract_response, find_table_start};
use evalsheet_model::{CellValue, MemoryGrid, Patterns};

fn text(grid: &mut MemoryGrid, row: usize, col: usize, value: &str) {
    grid.set(row, col, CellValue::from(value));
}

/// A typical single-section survey sheet: metadata block, sentinel row,
/// one standard main item with two circled-number sub-item rows.
fn standard_sheet() -> MemoryGrid {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 1, 0, "会社名");
    text(&mut grid, 1, 1, "Acme");
    text(&mut grid, 2, 0, "※該当する番号を選択してください");
    text(&mut grid, 3, 0, "記入日");
    grid.set(3, 1, CellValue::Number(45_292.0)); // 2024-01-01

    text(&mut grid, 5, 0, "評価項目");
    text(&mut grid, 6, 2, "評価");
    text(&mut grid, 6, 3, "コメント");
    text(&mut grid, 7, 0, "1. 総合評価");
    text(&mut grid, 8, 0, "①");
    text(&mut grid, 8, 1, "対応の速さ");
    text(&mut grid, 8, 2, "3:Good");
    text(&mut grid, 8, 3, "コメントA");
    text(&mut grid, 9, 0, "②");
    text(&mut grid, 9, 1, "品質");
    text(&mut grid, 9, 2, "2:Fair");
    text(&mut grid, 9, 3, "コメントB");
    grid
}

#[test]
fn table_start_is_the_row_below_the_sentinel() {
    let patterns = Patterns::new();
    assert_eq!(find_table_start(&standard_sheet(), &patterns), Some(6));
    assert_eq!(find_table_start(&MemoryGrid::new(), &patterns), None);
}

#[test]
fn column_roles_fall_back_to_data_probing() {
    // Header tokens sit below the sentinel row, so the exact-header path
    // finds nothing and both roles resolve through the data probes.
    let patterns = Patterns::new();
    let grid = standard_sheet();
    let roles = detect_column_roles(&grid, &patterns, 6).unwrap();
    assert_eq!(
        roles,
        ColumnRoles {
            eval_col: 2,
            comment_col: 3
        }
    );
}

#[test]
fn column_roles_resolve_from_header_tokens() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "評価項目");
    text(&mut grid, 0, 4, "評価");
    text(&mut grid, 0, 6, "コメント");
    let roles = detect_column_roles(&grid, &Patterns::new(), 1);
    // No data rows at all, but the header row alone resolves both roles.
    assert_eq!(
        roles,
        Some(ColumnRoles {
            eval_col: 4,
            comment_col: 6
        })
    );
}

#[test]
fn standard_rows_extract_sub_items_evaluations_and_comments() {
    let extraction = extract_response(&standard_sheet(), &Patterns::new());

    let keys: Vec<&str> = extraction.metadata.keys().collect();
    assert_eq!(keys, vec!["会社名", "記入日"]);
    assert_eq!(extraction.metadata.get("記入日"), Some("01/01/2024"));

    assert_eq!(extraction.items.len(), 2);
    let first = &extraction.items[0];
    assert_eq!(first.main_item, "1. 総合評価");
    assert_eq!(first.sub_item, "① 対応の速さ");
    assert_eq!(first.evaluation, "3:Good");
    assert_eq!(first.comment, "コメントA");
    let second = &extraction.items[1];
    assert_eq!(second.sub_item, "② 品質");
    assert_eq!(second.evaluation, "2:Fair");
    assert_eq!(second.comment, "コメントB");
}

#[test]
fn extraction_is_deterministic() {
    let grid = standard_sheet();
    let patterns = Patterns::new();
    assert_eq!(
        extract_response(&grid, &patterns),
        extract_response(&grid, &patterns)
    );
}

#[test]
fn sheet_without_sentinel_yields_empty_extraction() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "自由記述");
    text(&mut grid, 1, 0, "特になし");

    let extraction = extract_response(&grid, &Patterns::new());
    // Rows still scan as metadata pairs; items stay empty.
    assert!(extraction.items.is_empty());
    assert!(extraction.metadata.is_empty() || extraction.metadata.get("自由記述").is_none());
}

#[test]
fn fully_blank_sheet_yields_empty_metadata_and_items() {
    let extraction = extract_response(&MemoryGrid::new(), &Patterns::new());
    assert!(extraction.metadata.is_empty());
    assert!(extraction.items.is_empty());
}

#[test]
fn metadata_pairs_skip_notes_and_overwrite_on_repeat() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "※記入のお願い");
    text(&mut grid, 0, 1, "会社名");
    text(&mut grid, 0, 3, "Acme");
    text(&mut grid, 1, 0, "会社名");
    text(&mut grid, 1, 1, "Acme Corp");
    text(&mut grid, 2, 0, "部署");
    text(&mut grid, 2, 1, "※選択ボックスから選択");
    text(&mut grid, 4, 0, "評価項目");

    let extraction = extract_response(&grid, &Patterns::new());
    let pairs: Vec<(&str, &str)> = extraction.metadata.iter().collect();
    // The note cell is skipped as a key; its value pair still forms from the
    // following cells. The repeated key keeps its position, last write wins.
    // "部署" pairs with a note value and is dropped.
    assert_eq!(pairs, vec![("会社名", "Acme Corp")]);
}

#[test]
fn priority_section_extracts_ordered_blocks() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "評価項目");
    text(&mut grid, 0, 2, "評価");
    text(&mut grid, 0, 3, "コメント");
    text(&mut grid, 1, 0, "4. より満足いただくために重要な項目");
    text(&mut grid, 2, 0, "＜1＞");
    text(&mut grid, 2, 3, "＜2＞");
    text(&mut grid, 3, 0, "3:Good");
    text(&mut grid, 3, 1, "価格");
    text(&mut grid, 3, 2, "重要");
    text(&mut grid, 3, 3, "2:Fair");
    text(&mut grid, 3, 4, "品質");

    let extraction = extract_response(&grid, &Patterns::new());
    assert_eq!(extraction.items.len(), 2);

    let first = &extraction.items[0];
    assert_eq!(first.evaluation, "3:Good");
    assert_eq!(first.comment, "価格 重要");
    // Priority items key off their description.
    assert_eq!(first.sub_item, first.comment);

    let second = &extraction.items[1];
    assert_eq!(second.evaluation, "2:Fair");
    assert_eq!(second.comment, "品質");
}

#[test]
fn priority_section_without_headers_is_skipped() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "評価項目");
    text(&mut grid, 0, 2, "評価");
    text(&mut grid, 1, 0, "4. より満足いただくために重要な項目");
    text(&mut grid, 2, 1, "ここに優先項目ヘッダーはない");
    text(&mut grid, 4, 0, "5. ご要望等");
    text(&mut grid, 5, 1, "次回もお願いします");

    let extraction = extract_response(&grid, &Patterns::new());
    // The malformed priority section yields nothing; the request section
    // after it still extracts.
    assert_eq!(extraction.items.len(), 1);
    assert_eq!(extraction.items[0].main_item, "5. ご要望等");
    assert_eq!(extraction.items[0].comment, "次回もお願いします");
}

#[test]
fn request_rows_join_cells_with_pipes() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "評価項目");
    text(&mut grid, 0, 2, "評価");
    text(&mut grid, 1, 0, "5. ご要望等がございましたらご記入ください。");
    text(&mut grid, 2, 1, "納期の短縮");
    text(&mut grid, 2, 4, "価格の見直し");
    text(&mut grid, 3, 1, "3:Good"); // stray code cell is ignored
    text(&mut grid, 4, 2, "特になし");

    let extraction = extract_response(&grid, &Patterns::new());
    assert_eq!(extraction.items.len(), 2);

    let first = &extraction.items[0];
    assert_eq!(first.sub_item, "");
    assert_eq!(first.evaluation, "");
    assert_eq!(first.comment, "納期の短縮 | 価格の見直し");
    assert_eq!(extraction.items[1].comment, "特になし");
}

#[test]
fn enumerator_only_rows_fall_back_to_lookahead_labels() {
    let mut grid = MemoryGrid::new();
    text(&mut grid, 0, 0, "評価項目");
    text(&mut grid, 0, 2, "評価");
    text(&mut grid, 0, 3, "コメント");
    text(&mut grid, 1, 0, "2. サポート体制");
    // Label row seen by the look-ahead.
    text(&mut grid, 2, 0, "①");
    text(&mut grid, 2, 1, "問い合わせ対応");
    text(&mut grid, 2, 2, "3:Good");
    // A later row carries only the enumerator and an evaluation.
    text(&mut grid, 3, 0, "①");
    text(&mut grid, 3, 2, "1:Poor");

    let extraction = extract_response(&grid, &Patterns::new());
    assert_eq!(extraction.items.len(), 2);
    assert_eq!(extraction.items[0].sub_item, "① 問い合わせ対応");
    // The bare enumerator row borrows the label from the look-ahead table.
    assert_eq!(extraction.items[1].sub_item, "① 問い合わせ対応");
    assert_eq!(extraction.items[1].evaluation, "1:Poor");
}
