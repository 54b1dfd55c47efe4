use evalsheet_model::{MainItemKind, Patterns};

#[test]
fn main_item_headings_match_arabic_fullwidth_and_roman() {
    let patterns = Patterns::new();

    assert!(patterns.is_main_item("1. 全体的な満足度"));
    assert!(patterns.is_main_item("１０. サポート体制"));
    assert!(patterns.is_main_item("III. 総合評価"));
    assert!(patterns.is_main_item("VIII. その他"));

    // Circled-number rows are sub-items, not headings.
    assert!(!patterns.is_main_item("1.①対応の速さ"));
    assert!(!patterns.is_main_item("① 対応の速さ"));
    assert!(!patterns.is_main_item(""));
    assert!(!patterns.is_main_item("satisfaction"));
}

#[test]
fn classification_follows_marker_keywords() {
    let patterns = Patterns::new();

    assert_eq!(
        patterns.classify_main_item("4. より満足いただくために重要な項目"),
        MainItemKind::Priority
    );
    assert_eq!(
        patterns.classify_main_item("5. ご要望等がございましたらご記入ください。"),
        MainItemKind::Request
    );
    assert_eq!(
        patterns.classify_main_item("1. 全体的な満足度"),
        MainItemKind::Standard
    );
}

#[test]
fn evaluation_codes_are_exact_matches() {
    let patterns = Patterns::new();

    assert!(patterns.is_evaluation_code("3:Good"));
    assert!(patterns.is_evaluation_code("1:Poor"));
    assert!(patterns.is_evaluation_code("0:Not Related"));

    assert!(!patterns.is_evaluation_code("3:Good "));
    assert!(!patterns.is_evaluation_code("Good"));
    assert!(!patterns.is_evaluation_code("3: Good"));
    assert!(!patterns.is_evaluation_code(""));
}

#[test]
fn note_cells_are_detected_by_glyph_or_keyword() {
    let patterns = Patterns::new();

    assert!(patterns.is_note("※該当する番号を選択してください"));
    assert!(patterns.is_note("ご記入をお願いします"));
    assert!(patterns.is_note("選択ボックスから選んでください"));
    assert!(patterns.is_note("備考"));

    assert!(!patterns.is_note("会社名"));
    assert!(!patterns.is_note(""));
}

#[test]
fn priority_headers_match_whole_cell_only() {
    let patterns = Patterns::new();

    assert!(patterns.is_priority_header("1.①"));
    assert!(patterns.is_priority_header("＜2＞"));
    assert!(patterns.is_priority_header("<3>"));
    assert!(patterns.is_priority_header("４.②"));

    assert!(!patterns.is_priority_header("1.① 対応の速さ"));
    assert!(!patterns.is_priority_header("<5>"));
    assert!(!patterns.is_priority_header("1."));
}

#[test]
fn priority_rank_is_extracted_from_heading_tokens() {
    let patterns = Patterns::new();

    assert_eq!(patterns.priority_rank("<2> 価格"), Some(2));
    assert_eq!(patterns.priority_rank("＜1＞品質"), Some(1));
    assert_eq!(patterns.priority_rank("3.① 納期"), Some(3));
    assert_eq!(patterns.priority_rank("価格について"), None);
}

#[test]
fn enumerators_and_bare_angles_are_single_cell_tokens() {
    let patterns = Patterns::new();

    assert!(patterns.is_enumerator("①"));
    assert!(patterns.is_enumerator("７"));
    assert!(patterns.is_enumerator("3"));
    assert!(!patterns.is_enumerator("① 対応"));

    assert!(patterns.is_bare_angle("＜"));
    assert!(patterns.is_bare_angle("＞"));
    assert!(!patterns.is_bare_angle("＜1＞"));
}

#[test]
fn leading_numeral_handles_fullwidth_digits() {
    let patterns = Patterns::new();

    assert_eq!(patterns.leading_numeral("2. 品質について"), Some(2));
    assert_eq!(patterns.leading_numeral("１２. その他"), Some(12));
    assert_eq!(patterns.leading_numeral("III. 総合評価"), None);
}

#[test]
fn tokens_are_overridable() {
    let patterns = Patterns::builder()
        .table_header_token("Evaluation Items")
        .priority_marker("top priorities")
        .request_marker("other requests")
        .build()
        .unwrap();

    assert_eq!(patterns.table_header_token(), "Evaluation Items");
    assert_eq!(
        patterns.classify_main_item("4. Please rank your top priorities"),
        MainItemKind::Priority
    );
    assert_eq!(
        patterns.classify_main_item("5. Any other requests?"),
        MainItemKind::Request
    );
}
