// Persistence of uploaded schedule files (SQLite).
pub mod db;

pub use db::{ScheduleStore, IN_MEMORY};
