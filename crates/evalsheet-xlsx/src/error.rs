//! Error types for workbook I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading a workbook.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Workbook could not be opened or parsed.
    #[error("failed to open workbook {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// A sheet's cell range could not be read.
    #[error("failed to read sheet '{sheet}'")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },
}

/// Errors that can occur when exporting the pivoted workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A sheet name was rejected by the workbook writer.
    #[error("invalid sheet name '{sheet}'")]
    SheetName {
        sheet: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Rendering the pivot layout onto a sheet failed.
    #[error("failed to render sheet '{sheet}'")]
    Render {
        sheet: String,
        #[source]
        source: anyhow::Error,
    },

    /// The finished workbook could not be saved.
    #[error("failed to write workbook {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
