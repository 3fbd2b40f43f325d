use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, TimeDelta};
use log::{debug, warn};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::ScheduleError;

/// Plain cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Primitive {
    pub fn to_text(&self) -> String {
        match self {
            Primitive::Text(s) => s.clone(),
            Primitive::Number(f) => format_number(*f),
            Primitive::Bool(b) => format!("{}", b),
        }
    }
}

/// Cell carrying more than one representation: formula source, computed
/// value and the display text the spreadsheet application rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedCell {
    pub formula: Option<String>,
    pub value: Option<Primitive>,
    pub text: Option<String>,
}

/// Raw spreadsheet cell as handed to the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawCell {
    #[default]
    Empty,
    Value(Primitive),
    Formatted(FormattedCell),
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Value(Primitive::Text(s.to_string()))
        }
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::from(s.as_str())
    }
}

impl From<f64> for RawCell {
    fn from(f: f64) -> Self {
        RawCell::Value(Primitive::Number(f))
    }
}

/// Trimmed string content of a cell.
///
/// Precedence: formula result, then display text, then raw value.
pub fn cell_value(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => String::new(),
        RawCell::Value(p) => p.to_text().trim().to_string(),
        RawCell::Formatted(fc) => {
            if fc.formula.is_some() {
                if let Some(v) = &fc.value {
                    return v.to_text().trim().to_string();
                }
            }
            if let Some(t) = fc.text.as_deref().filter(|t| !t.trim().is_empty()) {
                return t.trim().to_string();
            }
            match &fc.value {
                Some(v) => v.to_text().trim().to_string(),
                None => String::new(),
            }
        }
    }
}

/// Integral floats print without a fractional part (room `203.0` -> `203`).
fn format_number(f: f64) -> String {
    if f.is_finite() && (f.floor() - f).abs() < f64::EPSILON {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

// Well past any date chrono can represent; larger serials are malformed.
const MAX_SERIAL_DAYS: f64 = 1.0e8;

/// Renders an Excel serial date/time the way the sheet displays it:
/// `HH:MM` for pure times, `YYYY-MM-DD` otherwise.
pub fn excel_serial_to_text(serial: f64) -> String {
    if (0.0..1.0).contains(&serial) {
        let total_minutes = (serial * 24.0 * 60.0).round() as i64;
        return format!("{:02}:{:02}", (total_minutes / 60) % 24, total_minutes % 60);
    }
    let days = if serial.is_finite() && serial.abs() < MAX_SERIAL_DAYS {
        TimeDelta::try_days(serial.trunc() as i64)
    } else {
        None
    };
    let date = days.and_then(|d| NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(d));
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => format_number(serial),
    }
}

/// Converts a calamine cell (plus its formula, if any) into a `RawCell`.
pub fn raw_cell_from_data(d: &Data, formula: Option<String>) -> RawCell {
    let (value, text) = match d {
        Data::String(s) => (Some(Primitive::Text(s.clone())), None),
        Data::Float(f) => (Some(Primitive::Number(*f)), None),
        Data::Int(i) => (Some(Primitive::Number(*i as f64)), None),
        Data::Bool(b) => (Some(Primitive::Bool(*b)), None),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            let rendered = excel_serial_to_text(serial);
            // A formula result is read before the display text, so it carries the rendering too.
            let value = if formula.is_some() {
                Primitive::Text(rendered.clone())
            } else {
                Primitive::Number(serial)
            };
            (Some(value), Some(rendered))
        }
        Data::DateTimeIso(s) => (Some(Primitive::Text(s.clone())), None),
        Data::DurationIso(s) => (Some(Primitive::Text(s.clone())), None),
        Data::Error(_) | Data::Empty => (None, None),
    };

    match (value, text, formula) {
        (None, None, None) => RawCell::Empty,
        (Some(v), None, None) => RawCell::Value(v),
        (value, text, formula) => RawCell::Formatted(FormattedCell { formula, value, text }),
    }
}

/// One worksheet as a row-major grid, 0-indexed from the used range origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<RawCell>>,
}

static EMPTY_CELL: RawCell = RawCell::Empty;

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Sheet { name: name.into(), rows }
    }

    /// Builds a sheet from plain strings (empty string = empty cell).
    pub fn from_strings(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| RawCell::from(*c)).collect())
            .collect();
        Sheet::new(name, rows)
    }

    /// Cell at (row, col); out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn text(&self, row: usize, col: usize) -> String {
        cell_value(self.cell(row, col))
    }
}

/// Ordered collection of named sheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Workbook { sheets }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

fn range_to_rows(range: &Range<Data>, formulas: Option<&Range<String>>) -> Vec<Vec<RawCell>> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    range
        .rows()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    let formula = formulas
                        .and_then(|f| f.get_value((start_row + r as u32, start_col + c as u32)))
                        .filter(|s| !s.trim().is_empty())
                        .cloned();
                    raw_cell_from_data(cell, formula)
                })
                .collect()
        })
        .collect()
}

fn collect_sheets<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Workbook {
    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = match workbook.worksheet_range(&name) {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping unreadable sheet '{}': {}", name, e);
                continue;
            }
        };
        let formulas = workbook.worksheet_formula(&name).ok();
        let rows = range_to_rows(&range, formulas.as_ref());
        debug!("sheet '{}': {} rows read", name, rows.len());
        sheets.push(Sheet::new(name, rows));
    }
    Workbook::new(sheets)
}

/// Reads every sheet of a workbook on disk (xlsx, xlsm, xlsb, xls, ods).
pub fn read_workbook_from_path<P: AsRef<Path>>(path: P) -> Result<Workbook, ScheduleError> {
    let workbook = open_workbook_auto(path)?;
    Ok(collect_sheets(workbook))
}

/// Reads every sheet of an in-memory workbook (e.g. an uploaded file).
pub fn read_workbook_from_bytes(bytes: Vec<u8>) -> Result<Workbook, ScheduleError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    Ok(collect_sheets(workbook))
}
