//! Data model for survey evaluation sheets.
//!
//! Defines the cell grid abstraction extraction runs against, the normalized
//! record shapes it produces, and the shared pattern table both the
//! extractor and the pivot builder classify text with.

pub mod cell;
pub mod classify;
pub mod patterns;
pub mod record;

pub use cell::{CellGrid, CellValue, MemoryGrid};
pub use classify::MainItemKind;
pub use patterns::{PatternError, Patterns, PatternsBuilder};
pub use record::{EvaluationRecord, Extraction, Response, ResponseMetadata};
