// Core data structures of the school timetable

use serde::{Deserialize, Serialize};
use std::fmt;

/// School shift (ауысым). Serialised as `"I"` / `"II"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    I,
    II,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::I => "I",
            Shift::II => "II",
        }
    }

    /// Parses `"I"`, `"II"`, `"1"` or `"2"` (Latin or Cyrillic `І`).
    pub fn parse(s: &str) -> Option<Shift> {
        match s.trim().to_uppercase().replace('І', "I").as_str() {
            "I" | "1" => Some(Shift::I),
            "II" | "2" => Some(Shift::II),
            _ => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lesson of the normalised timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    pub id: u32,
    /// Canonical (Kazakh) weekday name.
    pub day: String,
    /// `HH:MM-HH:MM`, or the raw token when it could not be parsed.
    pub time: String,
    pub grade: String,
    pub subject: String,
    pub room: String,
    pub shift: Shift,
    /// 0 when the ordinal could not be resolved.
    pub lesson_number: u32,
}

/// Column of the header row that belongs to a class section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassColumn {
    pub column_index: usize,
    pub grade: String,
}

/// Uploaded schedule file as kept by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFile {
    pub id: String,
    pub name: String,
    pub upload_date: String,
    pub data: Vec<LessonRecord>,
}

/// Listing entry for a stored file (without the lesson payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFileSummary {
    pub id: String,
    pub name: String,
    pub upload_date: String,
    pub lesson_count: usize,
    pub active: bool,
}
