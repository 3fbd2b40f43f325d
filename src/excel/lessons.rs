//! Lesson-slot assignment: turns the data rows under the header into
//! `LessonRecord`s, carrying the current weekday down the sheet.

use log::{debug, warn};

use crate::excel::bells::{resolve_lesson_number, Resolution};
use crate::excel::io::Sheet;
use crate::excel::parser::{ParseSession, ParseWarning, ParserOptions};
use crate::excel::patterns::is_room_sentinel;
use crate::excel::shift::resolve_shift;
use crate::excel::time::{is_normalized, normalize_time};
use crate::excel::weekday::canonical_day;
use crate::models::{ClassColumn, LessonRecord};

/// Room written when the room cell is empty.
pub const NO_ROOM: &str = "-";

const DAY_COLUMN: usize = 0;
const TIME_COLUMN: usize = 1;

/// Walks the rows after `header_row` and emits one record per filled
/// subject cell of every class column.
pub fn assign_lessons(
    sheet: &Sheet,
    header_row: usize,
    classes: &[ClassColumn],
    options: &ParserOptions,
    session: &mut ParseSession,
) -> Vec<LessonRecord> {
    let mut records = Vec::new();
    let mut current_day: Option<&'static str> = None;

    for row in (header_row + 1)..sheet.rows.len() {
        if let Some(day) = canonical_day(&sheet.text(row, DAY_COLUMN)) {
            debug!("sheet '{}' row {}: day {}", sheet.name, row, day);
            current_day = Some(day);
            if !options.lessons_on_weekday_row {
                continue;
            }
        }

        let day = match current_day {
            Some(d) => d,
            None => continue,
        };

        let raw_time = sheet.text(row, TIME_COLUMN);
        if raw_time.is_empty() {
            continue;
        }
        let time = normalize_time(&raw_time, &options.time);
        let time_ok = is_normalized(&time);
        let shift = resolve_shift(options.shift_strategy, &sheet.name, &time);
        let resolution = resolve_lesson_number(&time, shift);

        let before = records.len();
        for class in classes {
            let subject = sheet.text(row, class.column_index);
            if subject.is_empty() || is_room_sentinel(&subject) {
                continue;
            }
            let room = sheet.text(row, class.column_index + 1);
            let room = if room.is_empty() { NO_ROOM.to_string() } else { room };

            records.push(LessonRecord {
                id: session.next_id(),
                day: day.to_string(),
                time: time.clone(),
                grade: class.grade.clone(),
                subject,
                room,
                shift,
                lesson_number: resolution.number(),
            });
        }

        if records.len() > before {
            if !time_ok {
                warn!("sheet '{}' row {}: unparseable time '{}'", sheet.name, row, raw_time);
                session.warn(ParseWarning::UnparseableTime {
                    sheet: sheet.name.clone(),
                    row,
                    raw: raw_time.clone(),
                });
            }
            if resolution == Resolution::Unresolved {
                warn!("sheet '{}' row {}: no lesson number for '{}'", sheet.name, row, time);
                session.warn(ParseWarning::UnresolvedLessonOrdinal {
                    sheet: sheet.name.clone(),
                    row,
                    raw: time.clone(),
                });
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::header::extract_classes;
    use crate::models::Shift;

    fn run(sheet: &Sheet, options: &ParserOptions) -> (Vec<LessonRecord>, ParseSession) {
        let classes = extract_classes(&sheet.rows[0]);
        let mut session = ParseSession::new();
        let records = assign_lessons(sheet, 0, &classes, options, &mut session);
        (records, session)
    }

    #[test]
    fn weekday_rows_carry_forward() {
        let sheet = Sheet::from_strings(
            "І ауысым",
            &[
                &["Күн", "Уақыт", "5А", ""],
                &["Дүйсенбі", "", "", ""],
                &["", "8:00", "X", "201"],
                &["", "9:00", "Y", "202"],
                &["Сейсенбі", "", "", ""],
                &["", "8:00", "Z", "203"],
            ],
        );
        let (records, _) = run(&sheet, &ParserOptions::default());
        let days: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.subject.as_str(), r.day.as_str()))
            .collect();
        assert_eq!(days, vec![("X", "Дүйсенбі"), ("Y", "Дүйсенбі"), ("Z", "Сейсенбі")]);
    }

    #[test]
    fn rows_before_the_first_day_are_skipped() {
        let sheet = Sheet::from_strings(
            "s",
            &[
                &["Күн", "Уақыт", "5А", "", "5Б", ""],
                &["", "8:00", "Ән", "1", "Сурет", "2"],
                &["пн", "", "", "", "", ""],
                &["", "8:00", "Математика", "", "каб", ""],
            ],
        );
        let (records, _) = run(&sheet, &ParserOptions::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Математика");
        assert_eq!(records[0].room, NO_ROOM);
        assert_eq!(records[0].day, "Дүйсенбі");
    }

    #[test]
    fn ids_are_sequential_and_rows_without_time_are_ignored() {
        let sheet = Sheet::from_strings(
            "s",
            &[
                &["", "", "5А", "", "5Б", ""],
                &["Жұма", "", "", "", "", ""],
                &["", "", "Ignored", "1", "", ""],
                &["", "8:50", "A", "1", "B", "2"],
                &["", "9:45", "C", "1", "D", "2"],
            ],
        );
        let (records, session) = run(&sheet, &ParserOptions::default());
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(records[1].lesson_number, 2);
        assert_eq!(records[2].lesson_number, 3);
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn degraded_fields_are_flagged_not_dropped() {
        let sheet = Sheet::from_strings(
            "ІІ ауысым",
            &[
                &["", "", "9А", "", "9Б", ""],
                &["Сенбі", "", "", "", "", ""],
                &["", "кешкі", "Дене шынықтыру", "", "", ""],
            ],
        );
        let (records, session) = run(&sheet, &ParserOptions::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time, "кешкі");
        assert_eq!(records[0].lesson_number, 0);
        assert_eq!(records[0].shift, Shift::II);
        assert!(matches!(session.warnings()[0], ParseWarning::UnparseableTime { row: 2, .. }));
        assert!(matches!(session.warnings()[1], ParseWarning::UnresolvedLessonOrdinal { .. }));
    }

    #[test]
    fn lessons_on_weekday_row_when_enabled() {
        let sheet = Sheet::from_strings(
            "s",
            &[
                &["", "", "6А", "", "6Б", ""],
                &["Бейсенбі", "8:00", "Физика", "12", "Химия", "14"],
                &["", "8:50", "Биология", "12", "", ""],
            ],
        );
        let (default_records, _) = run(&sheet, &ParserOptions::default());
        assert_eq!(default_records.len(), 1);

        let options = ParserOptions { lessons_on_weekday_row: true, ..ParserOptions::default() };
        let (records, _) = run(&sheet, &options);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.day == "Бейсенбі"));
    }
}
