//! The extract and export command implementations.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use evalsheet_extract::extract_response;
use evalsheet_model::{Patterns, Response};
use evalsheet_xlsx::{SheetStats, export_workbook, read_workbook};

use crate::cli::{ExportArgs, ExtractArgs};

/// Outcome of one extract run, for summary printing.
pub struct ExtractResult {
    pub out: PathBuf,
    pub sheets: Vec<SheetSummary>,
}

/// Per-sheet extraction counts.
pub struct SheetSummary {
    pub sheet: String,
    pub metadata: usize,
    pub records: usize,
}

/// Extract every response sheet of one workbook into a JSON file.
pub fn run_extract(args: &ExtractArgs) -> Result<ExtractResult> {
    let patterns = Patterns::new();
    let sheets = read_workbook(&args.workbook, &patterns)?;

    let label = match &args.label {
        Some(label) => label.clone(),
        None => args
            .workbook
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "response".to_string()),
    };

    let mut responses = Vec::new();
    let mut summaries = Vec::new();
    for sheet in sheets {
        let extraction = extract_response(&sheet.grid, &patterns);
        info!(
            sheet = %sheet.name,
            metadata = extraction.metadata.len(),
            records = extraction.items.len(),
            "sheet extracted"
        );
        summaries.push(SheetSummary {
            sheet: sheet.name.clone(),
            metadata: extraction.metadata.len(),
            records: extraction.items.len(),
        });
        responses.push(Response::new(label.clone(), sheet.name, extraction));
    }

    let out = match &args.out {
        Some(out) => out.clone(),
        None => args.workbook.with_extension("responses.json"),
    };
    let file = File::create(&out)
        .with_context(|| format!("failed to create output file {}", out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &responses)
        .with_context(|| format!("failed to write responses to {}", out.display()))?;
    info!(path = %out.display(), responses = responses.len(), "responses written");

    Ok(ExtractResult {
        out,
        sheets: summaries,
    })
}

/// Pivot extracted responses into one comparison workbook.
pub fn run_export(args: &ExportArgs) -> Result<Vec<SheetStats>> {
    let patterns = Patterns::new();

    let mut responses = Vec::new();
    for path in &args.inputs {
        let file = File::open(path)
            .with_context(|| format!("failed to open responses file {}", path.display()))?;
        let mut batch: Vec<Response> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse responses file {}", path.display()))?;
        responses.append(&mut batch);
    }
    if responses.is_empty() {
        bail!("no responses found in the given input files");
    }

    let groups = group_by_sheet(responses, args.sheet_name.as_deref());
    let stats = export_workbook(&groups, &patterns, &args.out)?;
    Ok(stats)
}

/// Group responses by source sheet in first-seen order, or force one group.
fn group_by_sheet(responses: Vec<Response>, forced: Option<&str>) -> Vec<(String, Vec<Response>)> {
    let mut groups: Vec<(String, Vec<Response>)> = Vec::new();
    for response in responses {
        let key = forced.unwrap_or(&response.sheet);
        match groups.iter_mut().find(|(sheet, _)| sheet == key) {
            Some((_, members)) => members.push(response),
            None => groups.push((key.to_string(), vec![response])),
        }
    }
    groups
}
