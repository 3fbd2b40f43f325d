// Root of the `schoolhub` crate: timetable workbook normalisation plus the
// HTTP service that stores uploads and serves the active schedule.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod server;
pub mod storage;

/// Runs the HTTP server (re-exported for `main`)
pub use server::run_server;

pub use error::{ScheduleError, SheetError, StoreError};
pub use excel::{ParseReport, ParserOptions, ScheduleParser};
pub use models::{LessonRecord, Shift};
