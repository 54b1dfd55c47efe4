use serde::{Deserialize, Serialize};

/// One normalized evaluation tuple extracted from a sheet.
///
/// At most one record exists per `(main_item, sub_item)` within a response;
/// pairs absent from a response are treated as empty at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub main_item: String,
    /// Empty string means "no sub-breakdown".
    pub sub_item: String,
    /// Evaluation code such as "3:Good", or empty.
    pub evaluation: String,
    pub comment: String,
}

impl EvaluationRecord {
    pub fn new(
        main_item: impl Into<String>,
        sub_item: impl Into<String>,
        evaluation: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            main_item: main_item.into(),
            sub_item: sub_item.into(),
            evaluation: evaluation.into(),
            comment: comment.into(),
        }
    }

    /// True when neither an evaluation code nor a comment is present.
    pub fn is_empty(&self) -> bool {
        self.evaluation.is_empty() && self.comment.is_empty()
    }
}

/// Ordered header key/value pairs scanned from above the evaluation table.
///
/// Order is first-seen scan order; re-inserting an existing key replaces the
/// value in place (last write wins) without moving the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMetadata {
    entries: Vec<(String, String)>,
}

impl ResponseMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ResponseMetadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Pure output of one extraction pass over one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub metadata: ResponseMetadata,
    pub items: Vec<EvaluationRecord>,
}

impl Extraction {
    /// True when the sheet had no recognizable structure at all.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.items.is_empty()
    }
}

/// One filled-in survey sheet, identified by source file and sheet name.
///
/// Immutable once produced; re-extraction replaces a response wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Caller-facing row label in the pivoted export (typically the upload
    /// file name).
    pub label: String,
    /// Sheet the response came from; export groups responses by this.
    pub sheet: String,
    pub metadata: ResponseMetadata,
    pub items: Vec<EvaluationRecord>,
}

impl Response {
    pub fn new(label: impl Into<String>, sheet: impl Into<String>, extraction: Extraction) -> Self {
        Self {
            label: label.into(),
            sheet: sheet.into(),
            metadata: extraction.metadata,
            items: extraction.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_keeps_first_seen_order_with_last_write_wins() {
        let mut metadata = ResponseMetadata::new();
        metadata.insert("会社名", "Acme");
        metadata.insert("記入日", "01/15/2024");
        metadata.insert("会社名", "Acme Corp");

        let keys: Vec<&str> = metadata.keys().collect();
        assert_eq!(keys, vec!["会社名", "記入日"]);
        assert_eq!(metadata.get("会社名"), Some("Acme Corp"));
    }

    #[test]
    fn metadata_serializes_in_order() {
        let mut metadata = ResponseMetadata::new();
        metadata.insert("b", "2");
        metadata.insert("a", "1");

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"[["b","2"],["a","1"]]"#);

        let back: ResponseMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
