//! Inverse pivot of extracted evaluation responses.
//!
//! Turns flat `(MainItem, SubItem, Evaluation, Comment)` records from many
//! responses into one wide sheet: a deterministic column schema with
//! three-row merged headers, and one data row per response. Layout and
//! rendering are separated so that any sheet backend can consume them
//! through [`SheetWriter`].

pub mod render;
pub mod schema;

pub use render::{
    COMMENT_LEAF_LABEL, EVALUATION_LEAF_LABEL, HEADER_ROWS, PivotLayout, RESPONSE_LABEL_HEADER,
    SheetWriter, build_layout, render_sheet,
};
pub use schema::{ColumnKind, MainGroup, PivotColumn, PivotSchema, SubSpan, build_schema};
