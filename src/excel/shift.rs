//! Shift (ауысым) detection.
//!
//! The sheet name is authoritative. The hour-of-day rule is consulted only
//! when the sheet name is not a shift name (shift I sheets may hold an 8th
//! period at 14:00).

use crate::excel::time::start_minutes;
use crate::models::Shift;

/// Exact sheet names (lower case, single spaces) naming each shift.
const SHIFT_I_NAMES: &[&str] = &[
    "і ауысым", "i ауысым", "1 ауысым", "1-ауысым", "бірінші ауысым",
    "і смена", "i смена", "1 смена", "первая смена",
];
const SHIFT_II_NAMES: &[&str] = &[
    "іі ауысым", "ii ауысым", "2 ауысым", "2-ауысым", "екінші ауысым",
    "іі смена", "ii смена", "2 смена", "вторая смена",
];

/// First hour that belongs to the afternoon shift.
pub const SECOND_SHIFT_FROM_HOUR: u32 = 14;

/// How the shift of a lesson is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftStrategy {
    /// Sheet name only; unknown names mean shift I.
    #[default]
    SheetName,
    /// Sheet name, then the start hour when the name is not a shift name.
    SheetNameThenTime,
}

impl ShiftStrategy {
    pub fn parse(s: &str) -> Option<ShiftStrategy> {
        match s.trim().to_lowercase().as_str() {
            "sheet-name" | "sheet_name" | "sheet" => Some(ShiftStrategy::SheetName),
            "sheet-name-then-time" | "sheet_name_then_time" | "time" => {
                Some(ShiftStrategy::SheetNameThenTime)
            }
            _ => None,
        }
    }
}

fn canonical_sheet_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Shift named by the sheet, if the name is one of the known phrases.
pub fn detect_shift(sheet_name: &str) -> Option<Shift> {
    let name = canonical_sheet_name(sheet_name);
    if SHIFT_II_NAMES.contains(&name.as_str()) {
        Some(Shift::II)
    } else if SHIFT_I_NAMES.contains(&name.as_str()) {
        Some(Shift::I)
    } else {
        None
    }
}

/// Shift of a sheet; shift I unless the name says otherwise.
pub fn determine_shift(sheet_name: &str) -> Shift {
    detect_shift(sheet_name).unwrap_or(Shift::I)
}

/// Hour-of-day rule: lessons starting at 14:00 or later are shift II.
/// Unparseable times count as shift I.
pub fn shift_from_time(time: &str) -> Shift {
    match start_minutes(time) {
        Some(m) if m / 60 >= SECOND_SHIFT_FROM_HOUR => Shift::II,
        _ => Shift::I,
    }
}

/// Applies `strategy` for a lesson of `sheet_name` starting at `time`.
pub fn resolve_shift(strategy: ShiftStrategy, sheet_name: &str, time: &str) -> Shift {
    match strategy {
        ShiftStrategy::SheetName => determine_shift(sheet_name),
        ShiftStrategy::SheetNameThenTime => {
            detect_shift(sheet_name).unwrap_or_else(|| shift_from_time(time))
        }
    }
}
