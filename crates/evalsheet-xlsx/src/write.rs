//! Pivot export onto xlsx worksheets.

use std::path::Path;

use anyhow::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::info;

use evalsheet_model::{Patterns, Response};
use evalsheet_pivot::{HEADER_ROWS, SheetWriter, build_layout, render_sheet};

use crate::error::ExportError;

const FONT_NAME: &str = "Times New Roman";
const FONT_SIZE: f64 = 12.0;
const DATA_ROW_HEIGHT: f64 = 40.0;

/// Per-sheet export summary, for reporting back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetStats {
    pub sheet: String,
    pub responses: usize,
    pub columns: usize,
}

/// [`SheetWriter`] backend over one xlsx worksheet.
pub struct XlsxSheetWriter<'a> {
    worksheet: &'a mut Worksheet,
    header_format: Format,
    data_format: Format,
}

impl<'a> XlsxSheetWriter<'a> {
    pub fn new(worksheet: &'a mut Worksheet) -> Self {
        let header_format = Format::new()
            .set_bold()
            .set_font_name(FONT_NAME)
            .set_font_size(FONT_SIZE)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);
        let data_format = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(FONT_SIZE)
            .set_align(FormatAlign::Top)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);
        Self {
            worksheet,
            header_format,
            data_format,
        }
    }
}

impl SheetWriter for XlsxSheetWriter<'_> {
    fn header_cell(&mut self, row: usize, col: usize, text: &str) -> Result<()> {
        self.worksheet.write_string_with_format(
            u32::try_from(row)?,
            u16::try_from(col)?,
            text,
            &self.header_format,
        )?;
        Ok(())
    }

    fn header_merge(
        &mut self,
        rows: (usize, usize),
        cols: (usize, usize),
        text: &str,
    ) -> Result<()> {
        self.worksheet.merge_range(
            u32::try_from(rows.0)?,
            u16::try_from(cols.0)?,
            u32::try_from(rows.1)?,
            u16::try_from(cols.1)?,
            text,
            &self.header_format,
        )?;
        Ok(())
    }

    fn data_cell(&mut self, row: usize, col: usize, text: &str) -> Result<()> {
        self.worksheet.write_string_with_format(
            u32::try_from(row)?,
            u16::try_from(col)?,
            text,
            &self.data_format,
        )?;
        Ok(())
    }
}

/// Export one pivoted worksheet per response group.
///
/// Groups keep their given order; each becomes one sheet named after the
/// group key, with one data row per response.
pub fn export_workbook(
    groups: &[(String, Vec<Response>)],
    patterns: &Patterns,
    path: &Path,
) -> Result<Vec<SheetStats>, ExportError> {
    let mut workbook = Workbook::new();
    let mut stats = Vec::new();

    for (sheet, responses) in groups {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet)
            .map_err(|source| ExportError::SheetName {
                sheet: sheet.clone(),
                source,
            })?;

        let layout = build_layout(responses, patterns);
        fill_sheet(responses, &layout, worksheet).map_err(|source| ExportError::Render {
            sheet: sheet.clone(),
            source,
        })?;

        stats.push(SheetStats {
            sheet: sheet.clone(),
            responses: responses.len(),
            columns: layout.column_count(),
        });
    }

    workbook.save(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), sheets = stats.len(), "pivot workbook written");
    Ok(stats)
}

fn fill_sheet(
    responses: &[Response],
    layout: &evalsheet_pivot::PivotLayout,
    worksheet: &mut Worksheet,
) -> Result<()> {
    {
        let mut writer = XlsxSheetWriter::new(worksheet);
        render_sheet(responses, layout, &mut writer)?;
    }

    for offset in 0..responses.len() {
        worksheet.set_row_height(u32::try_from(HEADER_ROWS + offset)?, DATA_ROW_HEIGHT)?;
    }
    worksheet.autofit();
    Ok(())
}
