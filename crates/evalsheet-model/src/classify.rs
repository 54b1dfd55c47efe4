use serde::{Deserialize, Serialize};
use std::fmt;

/// How a main item's rows are structured, derived from marker keywords in
/// the heading text (see [`crate::Patterns::classify_main_item`]).
///
/// The extractor and the pivot builder both consume this, which keeps the
/// two sides of the pipeline inverse to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainItemKind {
    /// Independent sub-questions, each with an evaluation code and comment.
    Standard,
    /// Ranked-choice blocks laid out side by side under one heading.
    Priority,
    /// Free-form commentary rows with no evaluation code.
    Request,
}

impl MainItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MainItemKind::Standard => "Standard",
            MainItemKind::Priority => "Priority",
            MainItemKind::Request => "Request",
        }
    }
}

impl fmt::Display for MainItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
