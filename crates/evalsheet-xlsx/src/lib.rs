//! Workbook I/O for the evaluation pipeline.
//!
//! The reader loads xlsx sheets into [`evalsheet_model::MemoryGrid`] values
//! for extraction; the writer renders pivot layouts into a styled xlsx
//! workbook. Nothing in between touches a file.

pub mod error;
pub mod read;
pub mod write;

pub use error::{ExportError, ReadError};
pub use read::{SheetGrid, is_response_sheet, read_workbook};
pub use write::{SheetStats, XlsxSheetWriter, export_workbook};
