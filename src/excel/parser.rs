//! Per-upload parser session driving the multi-sheet scan.

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{ScheduleError, SheetError};
use crate::excel::header::{extract_classes, find_classes_row_index};
use crate::excel::io::{Sheet, Workbook};
use crate::excel::lessons::assign_lessons;
use crate::excel::shift::ShiftStrategy;
use crate::excel::time::TimeOptions;
use crate::models::LessonRecord;

/// Behaviour switches of the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParserOptions {
    pub time: TimeOptions,
    pub shift_strategy: ShiftStrategy,
    /// Also read lessons from the row that names the weekday.
    pub lessons_on_weekday_row: bool,
    /// Parse only this sheet; every sheet when `None` or when the name is missing.
    pub only_sheet: Option<String>,
}

/// Degraded field in an emitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseWarning {
    /// The time token was kept verbatim.
    UnparseableTime { sheet: String, row: usize, raw: String },
    /// `lessonNumber` was set to 0.
    UnresolvedLessonOrdinal { sheet: String, row: usize, raw: String },
}

/// State owned by one `parse_workbook` call.
#[derive(Debug, Default)]
pub struct ParseSession {
    last_id: u32,
    warnings: Vec<ParseWarning>,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u32 {
        self.last_id += 1;
        self.last_id
    }

    pub fn warn(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }
}

/// Result of parsing a workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    pub records: Vec<LessonRecord>,
    /// Sheets without a timetable, as `"<reason>"` strings.
    #[serde(serialize_with = "serialize_sheet_errors")]
    pub skipped: Vec<SheetError>,
    pub warnings: Vec<ParseWarning>,
}

fn serialize_sheet_errors<S: serde::Serializer>(
    errors: &[SheetError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleParser {
    options: ParserOptions,
}

impl ScheduleParser {
    pub fn new(options: ParserOptions) -> Self {
        ScheduleParser { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses one sheet with a throwaway session (ids start at 1).
    pub fn parse_sheet(&self, sheet: &Sheet) -> Result<Vec<LessonRecord>, SheetError> {
        let mut session = ParseSession::new();
        self.parse_sheet_in(sheet, &mut session)
    }

    fn parse_sheet_in(
        &self,
        sheet: &Sheet,
        session: &mut ParseSession,
    ) -> Result<Vec<LessonRecord>, SheetError> {
        let header_row = find_classes_row_index(&sheet.rows).ok_or_else(|| {
            SheetError::NoHeaderRowFound { sheet: sheet.name.clone() }
        })?;
        debug!("sheet '{}': header row {}", sheet.name, header_row);

        let classes = extract_classes(&sheet.rows[header_row]);
        if classes.is_empty() {
            return Err(SheetError::NoClassColumnsFound {
                sheet: sheet.name.clone(),
                row: header_row,
            });
        }

        Ok(assign_lessons(sheet, header_row, &classes, &self.options, session))
    }

    fn selected_sheets<'a>(&self, workbook: &'a Workbook) -> Vec<&'a Sheet> {
        if let Some(name) = &self.options.only_sheet {
            match workbook.sheet(name) {
                Some(sheet) => return vec![sheet],
                None => warn!("sheet '{}' not found, parsing every sheet", name),
            }
        }
        workbook.sheets.iter().collect()
    }

    /// Parses every selected sheet. Sheets without a timetable are skipped;
    /// only an empty overall result is an error.
    pub fn parse_workbook(&self, workbook: &Workbook) -> Result<ParseReport, ScheduleError> {
        let mut session = ParseSession::new();
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for sheet in self.selected_sheets(workbook) {
            match self.parse_sheet_in(sheet, &mut session) {
                Ok(mut sheet_records) => {
                    debug!("sheet '{}': {} lessons", sheet.name, sheet_records.len());
                    records.append(&mut sheet_records);
                }
                Err(e) => {
                    warn!("skipping sheet: {}", e);
                    skipped.push(e);
                }
            }
        }

        if records.is_empty() {
            return Err(ScheduleError::NoLessonsProduced { skipped });
        }

        let warnings = session.into_warnings();
        info!(
            "parsed {} lessons ({} sheets skipped, {} warnings)",
            records.len(),
            skipped.len(),
            warnings.len()
        );
        Ok(ParseReport { records, skipped, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timetable(name: &str, subject: &str) -> Sheet {
        Sheet::from_strings(
            name,
            &[
                &["Күн", "Уақыт", "5А", "", "5Б", ""],
                &["Дүйсенбі", "", "", "", "", ""],
                &["", "8:00", subject, "203", "Тарих", "104"],
            ],
        )
    }

    #[test]
    fn ids_continue_across_sheets() {
        let workbook = Workbook::new(vec![
            timetable("І ауысым", "Математика"),
            Sheet::from_strings("Notes", &[&["nothing here"]]),
            timetable("ІІ ауысым", "Физика"),
        ]);
        let report = ScheduleParser::default().parse_workbook(&workbook).unwrap();
        let ids: Vec<u32> = report.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(report.skipped, vec![SheetError::NoHeaderRowFound { sheet: "Notes".into() }]);
    }

    #[test]
    fn each_parse_starts_a_fresh_session() {
        let workbook = Workbook::new(vec![timetable("s", "Математика")]);
        let parser = ScheduleParser::default();
        let first = parser.parse_workbook(&workbook).unwrap();
        let second = parser.parse_workbook(&workbook).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn day_does_not_leak_between_sheets() {
        let orphan = Sheet::from_strings(
            "second",
            &[&["", "", "6А", "", "6Б", ""], &["", "8:00", "Ән", "1", "Сурет", "2"]],
        );
        let workbook = Workbook::new(vec![timetable("first", "Математика"), orphan]);
        let report = ScheduleParser::default().parse_workbook(&workbook).unwrap();
        assert!(report.records.iter().all(|r| r.grade.starts_with('5')));
    }

    #[test]
    fn only_sheet_selection() {
        let workbook = Workbook::new(vec![timetable("a", "Математика"), timetable("b", "Физика")]);
        let options = ParserOptions { only_sheet: Some("b".into()), ..ParserOptions::default() };
        let report = ScheduleParser::new(options).parse_workbook(&workbook).unwrap();
        assert_eq!(report.records[0].subject, "Физика");
        assert_eq!(report.records.len(), 2);

        let options = ParserOptions { only_sheet: Some("zzz".into()), ..ParserOptions::default() };
        let report = ScheduleParser::new(options).parse_workbook(&workbook).unwrap();
        assert_eq!(report.records.len(), 4);
    }

    #[test]
    fn header_without_data_is_empty_not_an_error() {
        let sheet = Sheet::from_strings(
            "s",
            &[&["Күн", "Уақыт", "5А", "", "5Б", ""], &["Дүйсенбі", "", "", "", "", ""]],
        );
        let parser = ScheduleParser::default();
        assert_eq!(parser.parse_sheet(&sheet), Ok(vec![]));

        let err = parser.parse_workbook(&Workbook::new(vec![sheet])).unwrap_err();
        assert_eq!(err.to_string(), "file contains no usable schedule data");
        assert!(matches!(err, ScheduleError::NoLessonsProduced { ref skipped } if skipped.is_empty()));
    }
}
