//! Canonical string rendering for raw cells.
//!
//! Every cell read anywhere in extraction goes through [`normalize_cell`];
//! downstream heuristics only ever compare canonical strings, never raw
//! typed values. Normalization never fails and is idempotent on its own
//! output.

use chrono::{Days, NaiveDate};

use evalsheet_model::CellValue;

/// Lower bound (exclusive) of the serial-date heuristic window: day serial
/// of 1970-01-01 in the 1900 date system.
pub const SERIAL_DATE_MIN: f64 = 25_569.0;

/// Upper bound (exclusive) of the serial-date heuristic window: day serial
/// of 2099-12-31, so the window covers dates up to the end of 2099.
pub const SERIAL_DATE_MAX: f64 = 73_050.0;

/// Output format for date-like cells.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Render a raw typed cell as its canonical trimmed string.
///
/// Numbers inside the serial-date window render as `MM/dd/yyyy`; other
/// numbers render as plain numeric text; dates use the same date format;
/// text passes through. All results then go through [`tidy_text`].
pub fn normalize_cell(cell: &CellValue) -> String {
    let rendered = match cell {
        CellValue::Blank => String::new(),
        CellValue::Text(text) => text.clone(),
        CellValue::Date(date) => date.format(DATE_FORMAT).to_string(),
        CellValue::Number(value) => render_number(*value),
    };
    tidy_text(&rendered)
}

fn render_number(value: f64) -> String {
    if value > SERIAL_DATE_MIN && value < SERIAL_DATE_MAX {
        if let Some(date) = serial_to_date(value) {
            return date.format(DATE_FORMAT).to_string();
        }
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Convert a 1900-date-system day serial to a date, dropping any time
/// fraction. Day 0 is 1899-12-30 (the usual Lotus-compatible base for
/// serials past the phantom leap day).
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let days = serial.floor();
    if days < 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(days as u64))
}

/// Whitespace and glyph cleanup applied to every rendered cell.
///
/// Full-width spaces become regular spaces, the full-width period becomes an
/// ASCII period, the multiplication-sign glyph becomes the literal "XX",
/// then whitespace runs collapse to single spaces and the ends are trimmed.
pub fn tidy_text(raw: &str) -> String {
    let mut mapped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\u{3000}' => mapped.push(' '),
            '．' => mapped.push('.'),
            '✕' => mapped.push_str("XX"),
            other => mapped.push(other),
        }
    }

    let mut out = String::with_capacity(mapped.len());
    let mut pending_space = false;
    for ch in mapped.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
