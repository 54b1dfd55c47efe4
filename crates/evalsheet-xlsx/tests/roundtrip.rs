use evalsheet_model::{
    CellGrid, CellValue, EvaluationRecord, Extraction, Patterns, Response, ResponseMetadata,
};
use evalsheet_xlsx::{export_workbook, read_workbook};

fn response(label: &str, metadata: &[(&str, &str)], items: Vec<EvaluationRecord>) -> Response {
    let metadata: ResponseMetadata = metadata
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Response::new(label, "アンケート", Extraction { metadata, items })
}

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

#[test]
fn exported_workbook_reads_back_with_headers_and_data() {
    let groups = vec![(
        "アンケート".to_string(),
        vec![
            response(
                "resp1",
                &[("会社名", "Acme")],
                vec![
                    EvaluationRecord::new("1. 総合評価", "① 対応", "3:Good", "速い"),
                    EvaluationRecord::new("5. ご要望等", "", "", "特になし"),
                ],
            ),
            response(
                "resp2",
                &[("会社名", "Beta")],
                vec![EvaluationRecord::new("1. 総合評価", "② 品質", "2:Fair", "普通")],
            ),
        ],
    )];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pivot.xlsx");
    let patterns = Patterns::new();

    let stats = export_workbook(&groups, &patterns, &path).unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].sheet, "アンケート");
    assert_eq!(stats[0].responses, 2);
    // Label, one metadata column, two pairs, one collapsed request column.
    assert_eq!(stats[0].columns, 7);

    let sheets = read_workbook(&path, &patterns).unwrap();
    assert_eq!(sheets.len(), 1);
    let grid = &sheets[0].grid;

    // Merged headers read back at their top-left corner.
    assert_eq!(grid.value(0, 0), text("Response"));
    assert_eq!(grid.value(0, 1), text("会社名"));
    assert_eq!(grid.value(0, 2), text("1. 総合評価"));
    assert_eq!(grid.value(1, 2), text("① 対応"));
    assert_eq!(grid.value(2, 2), text("Evaluation"));
    assert_eq!(grid.value(2, 3), text("Comment"));
    assert_eq!(grid.value(0, 6), text("5. ご要望等"));

    // One data row per response, in input order.
    assert_eq!(grid.value(3, 0), text("resp1"));
    assert_eq!(grid.value(3, 1), text("Acme"));
    assert_eq!(grid.value(3, 2), text("3:Good"));
    assert_eq!(grid.value(3, 3), text("速い"));
    assert_eq!(grid.value(3, 6), text("特になし"));
    assert_eq!(grid.value(4, 0), text("resp2"));
    assert_eq!(grid.value(4, 4), text("2:Fair"));
}

#[test]
fn empty_group_still_writes_a_sheet() {
    let groups = vec![("空シート".to_string(), Vec::new())];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let stats = export_workbook(&groups, &Patterns::new(), &path).unwrap();
    assert_eq!(stats[0].responses, 0);
    assert_eq!(stats[0].columns, 1);

    let sheets = read_workbook(&path, &Patterns::new()).unwrap();
    assert_eq!(sheets[0].name, "空シート");
    assert_eq!(sheets[0].grid.value(0, 0), text("Response"));
}

#[test]
fn missing_file_reports_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xlsx");
    let err = read_workbook(&path, &Patterns::new()).unwrap_err();
    assert!(matches!(err, evalsheet_xlsx::ReadError::Open { .. }));
}
