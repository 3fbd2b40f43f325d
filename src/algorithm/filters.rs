//! Lesson filters used by the schedule page (grade / shift / day selectors).
//!
//! Each filter is optional; an absent or blank value lets every lesson through.

use serde::Deserialize;

use crate::excel::weekday::canonical_day;
use crate::models::{LessonRecord, Shift};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LessonFilter {
    pub grade: Option<String>,
    pub shift: Option<String>,
    pub day: Option<String>,
}

impl LessonFilter {
    pub fn is_empty(&self) -> bool {
        [&self.grade, &self.shift, &self.day]
            .iter()
            .all(|v| v.as_deref().map(str::trim).unwrap_or("").is_empty())
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Keeps the lessons that pass every given filter.
pub fn apply_filters(lessons: Vec<LessonRecord>, filter: &LessonFilter) -> Vec<LessonRecord> {
    if filter.is_empty() {
        return lessons;
    }
    let mut result = lessons;

    if let Some(grade) = present(&filter.grade) {
        let wanted = grade.split_whitespace().collect::<String>().to_uppercase();
        result.retain(|l| l.grade == wanted);
    }

    if let Some(shift) = present(&filter.shift) {
        match Shift::parse(shift) {
            Some(s) => result.retain(|l| l.shift == s),
            None => result.clear(),
        }
    }

    // Day filters accept any recognised weekday token ("пн", "Monday", ...).
    if let Some(day) = present(&filter.day) {
        let wanted = canonical_day(day).map(str::to_string).unwrap_or_else(|| day.to_string());
        result.retain(|l| l.day == wanted);
    }

    result
}
