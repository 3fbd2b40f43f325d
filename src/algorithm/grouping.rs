//! Grouped views of a flat lesson list. Pure re-derivations, no I/O.

use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::excel::weekday::day_order;
use crate::models::LessonRecord;

pub const LYCEUM_CLASSES: &str = "Лицей сыныптары";
pub const RUSSIAN_CLASSES: &str = "Орыс сыныптары";
pub const OTHER_CLASSES: &str = "Басқа сыныптар";

static LYCEUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[5-8]Ғ$").expect("lyceum pattern must compile"));
static RUSSIAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[5-9]В$").expect("russian pattern must compile"));
static GRADE_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(.*)$").expect("grade pattern must compile"));

/// Lessons of one grade (in input order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeLessons {
    pub grade: String,
    pub lessons: Vec<LessonRecord>,
}

/// Lessons of one day, split by grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub day: String,
    pub grades: Vec<GradeLessons>,
}

/// Lessons of one day (in input order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLessons {
    pub day: String,
    pub lessons: Vec<LessonRecord>,
}

/// Lessons of one grade, split by day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeGroup {
    pub grade: String,
    pub days: Vec<DayLessons>,
}

/// Grades belonging to one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub grades: Vec<String>,
}

fn grade_key(grade: &str) -> (Option<u32>, String) {
    match GRADE_PARTS.captures(grade) {
        Some(caps) => (caps[1].parse().ok(), caps[2].to_string()),
        None => (None, grade.to_string()),
    }
}

/// Numeric grade first, then suffix; grades without a number go last.
pub fn compare_grades(a: &str, b: &str) -> Ordering {
    let (na, sa) = grade_key(a);
    let (nb, sb) = grade_key(b);
    match (na, nb) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| sa.cmp(&sb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => sa.cmp(&sb),
    }
    .then_with(|| a.cmp(b))
}

/// Canonical weekday order, unknown names last (alphabetically).
pub fn compare_days(a: &str, b: &str) -> Ordering {
    day_order(a).cmp(&day_order(b)).then_with(|| a.cmp(b))
}

fn unique_sorted<F>(values: impl Iterator<Item = String>, cmp: F) -> Vec<String>
where
    F: Fn(&str, &str) -> Ordering,
{
    let mut out: Vec<String> = values.collect();
    out.sort_by(|a, b| cmp(a, b));
    out.dedup();
    out
}

pub fn sorted_days(records: &[LessonRecord]) -> Vec<String> {
    unique_sorted(records.iter().map(|r| r.day.clone()), compare_days)
}

pub fn sorted_grades(records: &[LessonRecord]) -> Vec<String> {
    unique_sorted(records.iter().map(|r| r.grade.clone()), compare_grades)
}

fn lessons_where(records: &[LessonRecord], pred: impl Fn(&LessonRecord) -> bool) -> Vec<LessonRecord> {
    records.iter().filter(|r| pred(r)).cloned().collect()
}

/// day -> grade -> lessons.
pub fn group_by_day(records: &[LessonRecord]) -> Vec<DayGroup> {
    sorted_days(records)
        .into_iter()
        .map(|day| {
            let of_day = lessons_where(records, |r| r.day == day);
            let grades = sorted_grades(&of_day)
                .into_iter()
                .map(|grade| GradeLessons {
                    lessons: lessons_where(&of_day, |r| r.grade == grade),
                    grade,
                })
                .collect();
            DayGroup { day, grades }
        })
        .collect()
}

/// grade -> day -> lessons.
pub fn group_by_grade(records: &[LessonRecord]) -> Vec<GradeGroup> {
    sorted_grades(records)
        .into_iter()
        .map(|grade| {
            let of_grade = lessons_where(records, |r| r.grade == grade);
            let days = sorted_days(&of_grade)
                .into_iter()
                .map(|day| DayLessons {
                    lessons: lessons_where(&of_grade, |r| r.day == day),
                    day,
                })
                .collect();
            GradeGroup { grade, days }
        })
        .collect()
}

/// Category of a grade label.
pub fn get_class_group(grade: &str) -> String {
    if LYCEUM.is_match(grade) {
        return LYCEUM_CLASSES.to_string();
    }
    if RUSSIAN.is_match(grade) {
        return RUSSIAN_CLASSES.to_string();
    }
    match grade_key(grade) {
        (Some(n), _) => format!("{}-сыныптар", n),
        (None, _) => OTHER_CLASSES.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CategoryRank {
    Grade(u32),
    Lyceum,
    Russian,
    Other,
}

fn category_rank(category: &str) -> CategoryRank {
    match category {
        LYCEUM_CLASSES => CategoryRank::Lyceum,
        RUSSIAN_CLASSES => CategoryRank::Russian,
        other => match grade_key(other) {
            (Some(n), _) => CategoryRank::Grade(n),
            (None, _) => CategoryRank::Other,
        },
    }
}

/// category -> sorted grades. Numbered categories ascending, then lyceum,
/// russian and other classes.
pub fn group_by_category(records: &[LessonRecord]) -> Vec<CategoryGroup> {
    let mut by_category: BTreeMap<(CategoryRank, String), Vec<String>> = BTreeMap::new();
    for grade in sorted_grades(records) {
        let category = get_class_group(&grade);
        by_category
            .entry((category_rank(&category), category))
            .or_default()
            .push(grade);
    }
    by_category
        .into_iter()
        .map(|((_, category), grades)| CategoryGroup { category, grades })
        .collect()
}
