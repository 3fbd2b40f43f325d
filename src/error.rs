//! Error types for parsing and storing schedules.

use thiserror::Error;

/// Per-sheet condition: the sheet holds no recognisable timetable.
/// Recoverable; the workbook scan moves on to the next sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("no class header row found in sheet '{sheet}'")]
    NoHeaderRowFound { sheet: String },

    /// Header detection and column extraction share `is_class_label`, so
    /// this only fires if the two checks drift apart.
    #[error("no class columns found in header row {row} of sheet '{sheet}'")]
    NoClassColumnsFound { sheet: String, row: usize },
}

impl SheetError {
    pub fn sheet(&self) -> &str {
        match self {
            SheetError::NoHeaderRowFound { sheet } => sheet,
            SheetError::NoClassColumnsFound { sheet, .. } => sheet,
        }
    }
}

/// Failure of a whole upload.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("file contains no usable schedule data")]
    NoLessonsProduced { skipped: Vec<SheetError> },

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage collaborator errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid stored lesson data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
