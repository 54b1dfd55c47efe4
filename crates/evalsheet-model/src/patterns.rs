//! The shared pattern table for survey sheet heuristics.
//!
//! Every textual heuristic the extractor and the pivot builder rely on lives
//! here: sentinel tokens, section marker keywords, and the regular
//! expressions for main-item headings, priority headers, evaluation codes,
//! annotation cells, and enumerator tokens. Both directions of the pipeline
//! consume this one table so that matching never diverges between them.
//!
//! Defaults reproduce the survey template conventions the system was built
//! for (Japanese office forms); every token and pattern can be overridden
//! through [`Patterns::builder`].

use regex::Regex;

use crate::classify::MainItemKind;

/// Sentinel cell marking the column-header row of the evaluation table.
pub const DEFAULT_TABLE_HEADER_TOKEN: &str = "評価項目";
/// Column header above evaluation-code cells.
pub const DEFAULT_EVALUATION_HEADER_TOKEN: &str = "評価";
/// Column header above comment cells.
pub const DEFAULT_COMMENT_HEADER_TOKEN: &str = "コメント";
/// Substring marking a main item as a priority-ranking section.
pub const DEFAULT_PRIORITY_MARKER: &str = "より満足いただくために";
/// Substring marking a main item as a free-form request section.
pub const DEFAULT_REQUEST_MARKER: &str = "ご要望等";
/// Sheets whose names start with this prefix are aggregate views, not responses.
pub const DEFAULT_SUMMARY_SHEET_PREFIX: &str = "評価結果リスト_";
/// Cover sheet name, never a response.
pub const DEFAULT_COVER_SHEET_NAME: &str = "表紙";

/// Main-item heading: Arabic or full-width numeral, or Roman numeral I-VIII,
/// followed by a period, and not itself a circled-number row.
pub const DEFAULT_MAIN_ITEM_PATTERN: &str =
    r"^(?:[0-9０-９]+\.|(?:I{1,3}|IV|V|VI|VII|VIII)\.)[^①②③④⑤⑥⑦]";
/// Priority block header: enumerator "1."-"4." combined with a circled
/// number, or an angle-bracketed digit 1-4. Matched against the whole cell.
pub const DEFAULT_PRIORITY_HEADER_PATTERN: &str =
    r"^(?:[1-4１-４]\.[①②③④⑤⑥⑦]|[<＜][1-4１-４][>＞])$";
/// Extracts the rank numeral embedded in a priority heading token.
pub const DEFAULT_PRIORITY_NUMBER_PATTERN: &str =
    r"^[＜<]?(\d+)(?:[＞>]|[.．①②③④⑤⑥⑦]|\s|$)";
/// Evaluation code: `<digits>:<word>`, e.g. "3:Good".
pub const DEFAULT_EVALUATION_CODE_PATTERN: &str = r"^\d+:(?:Not Related|[A-Za-z]+)$";
/// Annotation cell: leading note glyph, or any instructional keyword.
pub const DEFAULT_NOTE_PATTERN: &str =
    r"^(?:※.*|.*(?:お願い|注意|注|備考|説明|選択ボックス).*)$";
/// A cell that is exactly one circled-number or bare numeral enumerator.
pub const DEFAULT_ENUMERATOR_PATTERN: &str = r"^[①②③④⑤⑥⑦１-７1-7]$";
/// A cell that is exactly one full-width angle bracket (layout scaffolding).
pub const DEFAULT_BARE_ANGLE_PATTERN: &str = r"^[＜＞]$";
/// Leading numeral of a main-item heading, used for pivot ordering.
pub const DEFAULT_LEADING_NUMERAL_PATTERN: &str = r"^[<＜]?([0-9０-９]+)";

/// A pattern override failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid {name} pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub name: &'static str,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled pattern table. Build once, share by reference.
#[derive(Debug, Clone)]
pub struct Patterns {
    table_header_token: String,
    evaluation_header_token: String,
    comment_header_token: String,
    priority_marker: String,
    request_marker: String,
    summary_sheet_prefix: String,
    cover_sheet_name: String,
    main_item: Regex,
    priority_header: Regex,
    priority_number: Regex,
    evaluation_code: Regex,
    note: Regex,
    enumerator: Regex,
    bare_angle: Regex,
    leading_numeral: Regex,
}

impl Patterns {
    /// The default table. Default patterns are compile-time literals, so
    /// construction cannot fail.
    pub fn new() -> Self {
        PatternsBuilder::default()
            .build()
            .expect("default patterns compile")
    }

    pub fn builder() -> PatternsBuilder {
        PatternsBuilder::default()
    }

    pub fn table_header_token(&self) -> &str {
        &self.table_header_token
    }

    pub fn evaluation_header_token(&self) -> &str {
        &self.evaluation_header_token
    }

    pub fn comment_header_token(&self) -> &str {
        &self.comment_header_token
    }

    pub fn summary_sheet_prefix(&self) -> &str {
        &self.summary_sheet_prefix
    }

    pub fn cover_sheet_name(&self) -> &str {
        &self.cover_sheet_name
    }

    /// Classify a main-item heading by its marker keywords.
    ///
    /// Priority takes precedence over request when a heading somehow carries
    /// both markers; everything else is a standard section.
    pub fn classify_main_item(&self, text: &str) -> MainItemKind {
        if text.contains(&self.priority_marker) {
            MainItemKind::Priority
        } else if text.contains(&self.request_marker) {
            MainItemKind::Request
        } else {
            MainItemKind::Standard
        }
    }

    /// True when a cell text is a main-item heading.
    pub fn is_main_item(&self, text: &str) -> bool {
        !text.is_empty() && self.main_item.is_match(text)
    }

    /// True when a cell text is exactly an evaluation code such as "3:Good".
    pub fn is_evaluation_code(&self, text: &str) -> bool {
        self.evaluation_code.is_match(text)
    }

    /// True when a cell is an annotation (note glyph or instructional keyword).
    pub fn is_note(&self, text: &str) -> bool {
        !text.is_empty() && self.note.is_match(text)
    }

    /// True when a cell is a priority block header like "1.①" or "＜2＞".
    pub fn is_priority_header(&self, text: &str) -> bool {
        self.priority_header.is_match(text)
    }

    /// True when a cell is exactly one enumerator token (①-⑦, １-７, 1-7).
    pub fn is_enumerator(&self, text: &str) -> bool {
        self.enumerator.is_match(text)
    }

    /// True when a cell is a bare full-width angle bracket.
    pub fn is_bare_angle(&self, text: &str) -> bool {
        self.bare_angle.is_match(text)
    }

    /// Rank embedded in a priority heading token, if any.
    pub fn priority_rank(&self, text: &str) -> Option<u32> {
        self.priority_number
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    }

    /// Leading numeral of a heading (full-width digits included), if any.
    pub fn leading_numeral(&self, text: &str) -> Option<u64> {
        let digits = self
            .leading_numeral
            .captures(text)
            .and_then(|caps| caps.get(1))?;
        let ascii: String = digits.as_str().chars().map(to_ascii_digit).collect();
        ascii.parse().ok()
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

fn to_ascii_digit(ch: char) -> char {
    match ch {
        '０'..='９' => char::from(b'0' + (ch as u32 - '０' as u32) as u8),
        other => other,
    }
}

/// Builder for [`Patterns`] with per-token and per-pattern overrides.
#[derive(Debug, Clone)]
pub struct PatternsBuilder {
    table_header_token: String,
    evaluation_header_token: String,
    comment_header_token: String,
    priority_marker: String,
    request_marker: String,
    summary_sheet_prefix: String,
    cover_sheet_name: String,
    main_item: String,
    priority_header: String,
    priority_number: String,
    evaluation_code: String,
    note: String,
    enumerator: String,
    bare_angle: String,
    leading_numeral: String,
}

impl Default for PatternsBuilder {
    fn default() -> Self {
        Self {
            table_header_token: DEFAULT_TABLE_HEADER_TOKEN.to_string(),
            evaluation_header_token: DEFAULT_EVALUATION_HEADER_TOKEN.to_string(),
            comment_header_token: DEFAULT_COMMENT_HEADER_TOKEN.to_string(),
            priority_marker: DEFAULT_PRIORITY_MARKER.to_string(),
            request_marker: DEFAULT_REQUEST_MARKER.to_string(),
            summary_sheet_prefix: DEFAULT_SUMMARY_SHEET_PREFIX.to_string(),
            cover_sheet_name: DEFAULT_COVER_SHEET_NAME.to_string(),
            main_item: DEFAULT_MAIN_ITEM_PATTERN.to_string(),
            priority_header: DEFAULT_PRIORITY_HEADER_PATTERN.to_string(),
            priority_number: DEFAULT_PRIORITY_NUMBER_PATTERN.to_string(),
            evaluation_code: DEFAULT_EVALUATION_CODE_PATTERN.to_string(),
            note: DEFAULT_NOTE_PATTERN.to_string(),
            enumerator: DEFAULT_ENUMERATOR_PATTERN.to_string(),
            bare_angle: DEFAULT_BARE_ANGLE_PATTERN.to_string(),
            leading_numeral: DEFAULT_LEADING_NUMERAL_PATTERN.to_string(),
        }
    }
}

impl PatternsBuilder {
    pub fn table_header_token(mut self, token: impl Into<String>) -> Self {
        self.table_header_token = token.into();
        self
    }

    pub fn evaluation_header_token(mut self, token: impl Into<String>) -> Self {
        self.evaluation_header_token = token.into();
        self
    }

    pub fn comment_header_token(mut self, token: impl Into<String>) -> Self {
        self.comment_header_token = token.into();
        self
    }

    pub fn priority_marker(mut self, marker: impl Into<String>) -> Self {
        self.priority_marker = marker.into();
        self
    }

    pub fn request_marker(mut self, marker: impl Into<String>) -> Self {
        self.request_marker = marker.into();
        self
    }

    pub fn summary_sheet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.summary_sheet_prefix = prefix.into();
        self
    }

    pub fn cover_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.cover_sheet_name = name.into();
        self
    }

    pub fn main_item_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.main_item = pattern.into();
        self
    }

    pub fn priority_header_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.priority_header = pattern.into();
        self
    }

    pub fn priority_number_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.priority_number = pattern.into();
        self
    }

    pub fn evaluation_code_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.evaluation_code = pattern.into();
        self
    }

    pub fn note_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.note = pattern.into();
        self
    }

    pub fn enumerator_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.enumerator = pattern.into();
        self
    }

    pub fn bare_angle_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.bare_angle = pattern.into();
        self
    }

    pub fn leading_numeral_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.leading_numeral = pattern.into();
        self
    }

    /// Compile all patterns. Fails on the first invalid override.
    pub fn build(self) -> Result<Patterns, PatternError> {
        Ok(Patterns {
            table_header_token: self.table_header_token,
            evaluation_header_token: self.evaluation_header_token,
            comment_header_token: self.comment_header_token,
            priority_marker: self.priority_marker,
            request_marker: self.request_marker,
            summary_sheet_prefix: self.summary_sheet_prefix,
            cover_sheet_name: self.cover_sheet_name,
            main_item: compile("main_item", &self.main_item)?,
            priority_header: compile("priority_header", &self.priority_header)?,
            priority_number: compile("priority_number", &self.priority_number)?,
            evaluation_code: compile("evaluation_code", &self.evaluation_code)?,
            note: compile("note", &self.note)?,
            enumerator: compile("enumerator", &self.enumerator)?,
            bare_angle: compile("bare_angle", &self.bare_angle)?,
            leading_numeral: compile("leading_numeral", &self.leading_numeral)?,
        })
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError {
        name,
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns_compile() {
        let _ = Patterns::new();
    }

    #[test]
    fn invalid_override_is_reported() {
        let err = Patterns::builder()
            .evaluation_code_pattern("[unclosed")
            .build()
            .unwrap_err();
        assert_eq!(err.name, "evaluation_code");
    }
}
