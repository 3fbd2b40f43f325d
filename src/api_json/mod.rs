use serde::{Deserialize, Serialize};

use crate::excel::ParseWarning;
use crate::models::ScheduleFileSummary;

pub mod handlers;

/// Spreadsheet formats accepted by the upload endpoint.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Response of `POST /schedule/upload`.
///
/// ```json
/// {
///   "file": { "id": "…", "name": "kesté.xlsx", "uploadDate": "…", "lessonCount": 240, "active": true },
///   "lessonCount": 240,
///   "skipped": ["no class header row found in sheet 'Ескерту'"],
///   "warnings": [{ "kind": "unparseableTime", "sheet": "І ауысым", "row": 14, "raw": "кешкі" }]
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file: ScheduleFileSummary,
    pub lesson_count: usize,
    pub skipped: Vec<String>,
    pub warnings: Vec<ParseWarning>,
}

/// Query of `GET /schedule/grouped`.
#[derive(Debug, Default, Deserialize)]
pub struct GroupedQuery {
    /// `day` (default), `grade` or `category`.
    pub view: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupedView {
    Day,
    Grade,
    Category,
}

impl GroupedQuery {
    pub fn view(&self) -> Option<GroupedView> {
        match self.view.as_deref().map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("day") => Some(GroupedView::Day),
            Some("grade") => Some(GroupedView::Grade),
            Some("category") => Some(GroupedView::Category),
            _ => None,
        }
    }
}

/// True when the file name ends in one of `ALLOWED_EXTENSIONS`.
pub fn has_allowed_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_extensions_only() {
        assert!(has_allowed_extension("kesté.xlsx"));
        assert!(has_allowed_extension("OLD.XLS"));
        assert!(has_allowed_extension("a.b.ods"));
        assert!(!has_allowed_extension("kesté.csv"));
        assert!(!has_allowed_extension("xlsx"));
        assert!(!has_allowed_extension(""));
    }

    #[test]
    fn grouped_views() {
        let q = |v: Option<&str>| GroupedQuery { view: v.map(str::to_string) }.view();
        assert_eq!(q(None), Some(GroupedView::Day));
        assert_eq!(q(Some("Grade")), Some(GroupedView::Grade));
        assert_eq!(q(Some("category")), Some(GroupedView::Category));
        assert_eq!(q(Some("room")), None);
    }
}
