//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "evalsheet",
    version,
    about = "Extract survey evaluation workbooks and pivot them into one comparison sheet",
    long_about = "Extract evaluation items from filled-in survey workbooks.\n\n\
                  The extract command pulls metadata and evaluation records out of\n\
                  every response sheet into JSON; the export command pivots any\n\
                  number of extracted responses into one wide xlsx comparison sheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract evaluation responses from a survey workbook into JSON.
    Extract(ExtractArgs),

    /// Pivot extracted responses into one wide xlsx comparison workbook.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Path to the filled-in survey workbook (.xlsx).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Output JSON file (default: <WORKBOOK>.responses.json).
    #[arg(long = "out", value_name = "JSON")]
    pub out: Option<PathBuf>,

    /// Response label used in the pivoted export (default: workbook file stem).
    #[arg(long = "label", value_name = "LABEL")]
    pub label: Option<String>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Extracted response files produced by the extract command.
    #[arg(value_name = "RESPONSES", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output workbook path.
    #[arg(long = "out", value_name = "XLSX")]
    pub out: PathBuf,

    /// Force all responses onto one sheet with this name instead of
    /// grouping them by their source sheet.
    #[arg(long = "sheet-name", value_name = "NAME")]
    pub sheet_name: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
