//! Locating the class header row and extracting its class columns.

use log::debug;

use crate::excel::io::{cell_value, RawCell};
use crate::excel::patterns::{is_class_label, normalize_grade};
use crate::models::ClassColumn;

/// Class-like cells a row needs to count as the header row.
pub const MIN_CLASS_CELLS: usize = 2;

/// Index of the first row with at least `MIN_CLASS_CELLS` class labels.
pub fn find_classes_row_index(rows: &[Vec<RawCell>]) -> Option<usize> {
    rows.iter().position(|row| {
        let count = row
            .iter()
            .map(cell_value)
            .filter(|text| !text.is_empty() && is_class_label(text))
            .count();
        count >= MIN_CLASS_CELLS
    })
}

/// Class columns of the header row, in column order. Duplicate grades are
/// kept (merged header cells may repeat a label).
pub fn extract_classes(header: &[RawCell]) -> Vec<ClassColumn> {
    let classes: Vec<ClassColumn> = header
        .iter()
        .enumerate()
        .filter_map(|(column_index, cell)| {
            normalize_grade(&cell_value(cell)).map(|grade| ClassColumn { column_index, grade })
        })
        .collect();
    debug!(
        "class columns: {}",
        classes
            .iter()
            .map(|c| format!("{}@{}", c.grade, c.column_index))
            .collect::<Vec<_>>()
            .join(", ")
    );
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::io::Sheet;

    #[test]
    fn single_class_cell_is_not_a_header() {
        let sheet = Sheet::from_strings(
            "s",
            &[
                &["Сабақ кестесі", "5А", ""],
                &["Күн", "Уақыт", "6А", "", "6Б", ""],
            ],
        );
        assert_eq!(find_classes_row_index(&sheet.rows), Some(1));
    }

    #[test]
    fn first_qualifying_row_wins() {
        let sheet = Sheet::from_strings(
            "s",
            &[
                &["", "", "5А", "", "5Б"],
                &["", "", "7А", "", "7Б"],
            ],
        );
        assert_eq!(find_classes_row_index(&sheet.rows), Some(0));
    }

    #[test]
    fn room_labels_do_not_count() {
        let sheet = Sheet::from_strings("s", &[&["Күн", "Уақыт", "5А", "каб", "каб"]]);
        assert_eq!(find_classes_row_index(&sheet.rows), None);
    }

    #[test]
    fn missing_header() {
        let sheet = Sheet::from_strings("s", &[&["Математика", "203"], &["8:00", ""]]);
        assert_eq!(find_classes_row_index(&sheet.rows), None);
        assert_eq!(find_classes_row_index(&[]), None);
    }

    #[test]
    fn extracts_normalised_classes_in_order() {
        let sheet = Sheet::from_strings(
            "s",
            &[&["Күн", "Уақыт", "5 «А»", "каб", "5 класс Б", "каб", "7\"в\"", "", "7В"]],
        );
        let classes = extract_classes(&sheet.rows[0]);
        assert_eq!(
            classes,
            vec![
                ClassColumn { column_index: 2, grade: "5А".into() },
                ClassColumn { column_index: 4, grade: "5Б".into() },
                ClassColumn { column_index: 6, grade: "7В".into() },
                ClassColumn { column_index: 8, grade: "7В".into() },
            ]
        );
    }
}
