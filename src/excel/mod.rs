//! `excel` module: the timetable normalisation engine, split by concern.
//!
//! Submodules:
//! - `io`: cell model, cell value extraction, workbook reading (calamine)
//! - `patterns`: class-label pattern table and the room sentinel
//! - `weekday`: weekday tokens
//! - `time`: time range normalisation
//! - `shift`: shift detection
//! - `header`: class header row and class columns
//! - `bells`: bell schedules and lesson ordinals
//! - `lessons`: lesson-slot assignment
//! - `parser`: per-upload parser session

/// Cell model and workbook reading
pub mod io;

pub mod patterns;

pub mod weekday;

/// Time tokens -> `HH:MM-HH:MM`
pub mod time;

pub mod shift;

/// Header row locator and class-column extractor
pub mod header;

pub mod bells;

mod lessons;

/// `ScheduleParser`: whole-workbook parsing
pub mod parser;

pub use bells::get_lesson_number;
pub use header::{extract_classes, find_classes_row_index};
pub use io::{
    cell_value, raw_cell_from_data, read_workbook_from_bytes, read_workbook_from_path,
    FormattedCell, Primitive, RawCell, Sheet, Workbook,
};
pub use lessons::NO_ROOM;
pub use parser::{ParseReport, ParseSession, ParseWarning, ParserOptions, ScheduleParser};
pub use shift::{determine_shift, ShiftStrategy};
pub use time::{normalize_time, TimeOptions};
pub use weekday::is_week_day;
