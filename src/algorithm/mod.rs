// Views over a parsed timetable: grouping and filtering.
pub mod filters;
pub mod grouping;

pub use filters::{apply_filters, LessonFilter};
pub use grouping::{
    get_class_group, group_by_category, group_by_day, group_by_grade, sorted_days, sorted_grades,
    CategoryGroup, DayGroup, GradeGroup,
};
