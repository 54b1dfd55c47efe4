//! Deterministic pivot column layout.
//!
//! The schema is a pure function of the set of `(MainItem, SubItem)` pairs
//! present across the input responses: adding, removing, or reordering
//! responses never changes the relative order of surviving columns.

use std::collections::BTreeMap;

use tracing::debug;

use evalsheet_model::{MainItemKind, Patterns, Response};

/// What one pivot column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Evaluation code of a two-column sub-item pair.
    Evaluation,
    /// Comment of a two-column sub-item pair.
    Comment,
    /// Collapsed single column for items without a sub-breakdown.
    Single,
}

/// One data column of the pivoted sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotColumn {
    pub main_item: String,
    pub sub_item: String,
    pub kind: ColumnKind,
    /// Absolute zero-based sheet column.
    pub index: usize,
}

/// One sub-item's columns within a main group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSpan {
    pub sub_item: String,
    /// Header text shown for the sub-item. Priority sub-items get a
    /// positional "<k>" label instead of their free-text description.
    pub label: String,
    pub col_start: usize,
    /// A single collapsed column instead of an evaluation/comment pair.
    pub single: bool,
}

impl SubSpan {
    pub fn col_end(&self) -> usize {
        if self.single {
            self.col_start
        } else {
            self.col_start + 1
        }
    }
}

/// One main item's contiguous column span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainGroup {
    pub main_item: String,
    pub kind: MainItemKind,
    pub col_start: usize,
    pub col_end: usize,
    pub subs: Vec<SubSpan>,
}

impl MainGroup {
    /// True when the whole group is one collapsed column.
    pub fn is_single(&self) -> bool {
        self.subs.len() == 1 && self.subs[0].single
    }
}

/// The full column layout of one pivoted sheet.
#[derive(Debug, Clone, Default)]
pub struct PivotSchema {
    /// First data column; everything left of it is label and metadata.
    pub first_col: usize,
    pub groups: Vec<MainGroup>,
    pub columns: Vec<PivotColumn>,
    index: BTreeMap<(String, String), usize>,
}

impl PivotSchema {
    /// Column of a pair's evaluation cell (or its collapsed single cell).
    pub fn column_of(&self, main_item: &str, sub_item: &str) -> Option<usize> {
        self.index
            .get(&(main_item.to_string(), sub_item.to_string()))
            .copied()
    }

    /// Last occupied column index, or `first_col - 1` for an empty schema.
    pub fn last_col(&self) -> usize {
        self.columns
            .last()
            .map_or(self.first_col.saturating_sub(1), |column| column.index)
    }
}

/// Build the column layout for a set of responses.
///
/// Pairs where both the evaluation and the comment are empty in every
/// response do not earn a column. Main items order standard sections before
/// priority and request sections, then by leading numeral, then lexically;
/// sub-items order by embedded priority rank where one exists, lexically
/// otherwise.
pub fn build_schema(responses: &[Response], patterns: &Patterns, first_col: usize) -> PivotSchema {
    let mut mains: Vec<String> = Vec::new();
    let mut subs_of: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for response in responses {
        for item in &response.items {
            if item.is_empty() {
                continue;
            }
            let subs = subs_of.entry(item.main_item.clone()).or_default();
            if subs.is_empty() {
                mains.push(item.main_item.clone());
            }
            if !subs.contains(&item.sub_item) {
                subs.push(item.sub_item.clone());
            }
        }
    }

    mains.sort_by_cached_key(|main| main_order_key(main, patterns));

    let mut groups = Vec::new();
    let mut columns = Vec::new();
    let mut index = BTreeMap::new();
    let mut col = first_col;

    for main_item in mains {
        let kind = patterns.classify_main_item(&main_item);
        let mut subs = subs_of.remove(&main_item).unwrap_or_default();
        subs.sort_by_cached_key(|sub| sub_order_key(sub, kind, patterns));

        let collapse = kind == MainItemKind::Request || subs.iter().all(|sub| sub.is_empty());
        let col_start = col;
        let mut spans = Vec::new();

        if collapse {
            // All the group's records share one column keyed by their subs.
            for sub_item in &subs {
                index.insert((main_item.clone(), sub_item.clone()), col);
            }
            let sub_item = subs.into_iter().next().unwrap_or_default();
            columns.push(PivotColumn {
                main_item: main_item.clone(),
                sub_item: sub_item.clone(),
                kind: ColumnKind::Single,
                index: col,
            });
            spans.push(SubSpan {
                sub_item,
                label: String::new(),
                col_start: col,
                single: true,
            });
            col += 1;
        } else {
            for (position, sub_item) in subs.into_iter().enumerate() {
                let label = match kind {
                    MainItemKind::Priority => format!("<{}>", position + 1),
                    _ => sub_item.clone(),
                };
                index.insert((main_item.clone(), sub_item.clone()), col);
                columns.push(PivotColumn {
                    main_item: main_item.clone(),
                    sub_item: sub_item.clone(),
                    kind: ColumnKind::Evaluation,
                    index: col,
                });
                columns.push(PivotColumn {
                    main_item: main_item.clone(),
                    sub_item: sub_item.clone(),
                    kind: ColumnKind::Comment,
                    index: col + 1,
                });
                spans.push(SubSpan {
                    sub_item,
                    label,
                    col_start: col,
                    single: false,
                });
                col += 2;
            }
        }

        groups.push(MainGroup {
            main_item,
            kind,
            col_start,
            col_end: col - 1,
            subs: spans,
        });
    }

    debug!(
        groups = groups.len(),
        columns = columns.len(),
        "pivot schema built"
    );
    PivotSchema {
        first_col,
        groups,
        columns,
        index,
    }
}

/// Standard sections sort before priority and request sections, then by
/// leading numeral, then by full text.
fn main_order_key(main_item: &str, patterns: &Patterns) -> (u8, u64, String) {
    let bucket = match patterns.classify_main_item(main_item) {
        MainItemKind::Standard => 0,
        MainItemKind::Priority | MainItemKind::Request => 1,
    };
    let numeral = patterns.leading_numeral(main_item).unwrap_or(u64::MAX);
    (bucket, numeral, main_item.to_string())
}

fn sub_order_key(sub_item: &str, kind: MainItemKind, patterns: &Patterns) -> (u32, String) {
    let rank = match kind {
        MainItemKind::Priority => patterns.priority_rank(sub_item).unwrap_or(u32::MAX),
        _ => u32::MAX,
    };
    (rank, sub_item.to_string())
}
