use chrono::Utc;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{LessonRecord, ScheduleFile, ScheduleFileSummary};

/// Path accepted by `ScheduleStore::open` for a throwaway in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// Uploaded schedule files plus the single active schedule, kept in SQLite.
pub struct ScheduleStore {
    conn: Connection,
}

impl fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleStore(..)")
    }
}

impl ScheduleStore {
    /// Opens (creating if needed) the store at `path`; `:memory:` keeps it in RAM.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = if path.as_os_str() == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    fs::create_dir_all(dir)?;
                }
            }
            Connection::open(path)?
        };
        let store = ScheduleStore { conn };
        store.init()?;
        debug!("schedule store ready at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(IN_MEMORY)
    }

    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schedule_files (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                upload_date TEXT NOT NULL,
                lesson_count INTEGER NOT NULL,
                data_json TEXT NOT NULL
            )",
            [],
        )?;
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS active_schedule (
                slot INTEGER PRIMARY KEY CHECK (slot = 1),
                file_id TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Stores a parsed upload under a fresh opaque id.
    pub fn save_file(&self, name: &str, data: Vec<LessonRecord>) -> Result<ScheduleFile, StoreError> {
        let file = ScheduleFile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            upload_date: Utc::now().to_rfc3339(),
            data,
        };
        let data_json = serde_json::to_string(&file.data)?;
        self.conn.execute(
            "INSERT INTO schedule_files (id, name, upload_date, lesson_count, data_json)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![file.id, file.name, file.upload_date, file.data.len() as i64, data_json],
        )?;
        info!("stored schedule file '{}' as {} ({} lessons)", file.name, file.id, file.data.len());
        Ok(file)
    }

    fn active_id(&self) -> Result<Option<String>, StoreError> {
        let id = self
            .conn
            .query_row("SELECT file_id FROM active_schedule WHERE slot = 1", [], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    /// Stored files, oldest first.
    pub fn list_files(&self) -> Result<Vec<ScheduleFileSummary>, StoreError> {
        let active = self.active_id()?;
        let mut stmt = self.conn.prepare(
            "SELECT id, name, upload_date, lesson_count FROM schedule_files ORDER BY seq ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let lesson_count: i64 = row.get(3)?;
            Ok(ScheduleFileSummary {
                active: active.as_deref() == Some(id.as_str()),
                id,
                name: row.get(1)?,
                upload_date: row.get(2)?,
                lesson_count: lesson_count.max(0) as usize,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn get_file(&self, id: &str) -> Result<Option<ScheduleFile>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, upload_date, data_json FROM schedule_files WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        match row {
            Some((id, name, upload_date, data_json)) => Ok(Some(ScheduleFile {
                id,
                name,
                upload_date,
                data: serde_json::from_str(&data_json)?,
            })),
            None => Ok(None),
        }
    }

    /// Makes `id` the active schedule and returns its lessons; `None` for an
    /// unknown id (the active schedule is left untouched).
    pub fn activate_file(&self, id: &str) -> Result<Option<Vec<LessonRecord>>, StoreError> {
        let file = match self.get_file(id)? {
            Some(f) => f,
            None => return Ok(None),
        };
        self.conn.execute(
            "INSERT INTO active_schedule (slot, file_id) VALUES (1, ?1)
             ON CONFLICT(slot) DO UPDATE SET file_id = excluded.file_id",
            params![file.id],
        )?;
        info!("active schedule is now {} ('{}')", file.id, file.name);
        Ok(Some(file.data))
    }

    /// Lessons of the active schedule; empty when nothing is active.
    pub fn active_schedule(&self) -> Result<Vec<LessonRecord>, StoreError> {
        match self.active_id()? {
            Some(id) => Ok(self.get_file(&id)?.map(|f| f.data).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Metadata of the active file, if any.
    pub fn active_file(&self) -> Result<Option<ScheduleFileSummary>, StoreError> {
        let active = match self.active_id()? {
            Some(id) => id,
            None => return Ok(None),
        };
        Ok(self.list_files()?.into_iter().find(|f| f.id == active))
    }

    /// Removes a file; removing the active file clears the active schedule.
    pub fn delete_file(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM schedule_files WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Ok(false);
        }
        let cleared = self
            .conn
            .execute("DELETE FROM active_schedule WHERE file_id = ?1", params![id])?;
        if cleared > 0 {
            info!("active schedule {} deleted, no schedule is active now", id);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shift;

    fn lesson(id: u32) -> LessonRecord {
        LessonRecord {
            id,
            day: "Дүйсенбі".into(),
            time: "08:00-08:45".into(),
            grade: "5А".into(),
            subject: "Математика".into(),
            room: "203".into(),
            shift: Shift::I,
            lesson_number: 1,
        }
    }

    #[test]
    fn save_and_fetch() {
        let store = ScheduleStore::open_in_memory().unwrap();
        let saved = store.save_file("kesté.xlsx", vec![lesson(1), lesson(2)]).unwrap();
        assert_eq!(saved.id.len(), 36);
        let fetched = store.get_file(&saved.id).unwrap().unwrap();
        assert_eq!(fetched, saved);
        assert!(store.get_file("missing").unwrap().is_none());
    }

    #[test]
    fn nothing_active_by_default() {
        let store = ScheduleStore::open_in_memory().unwrap();
        store.save_file("a.xlsx", vec![lesson(1)]).unwrap();
        assert!(store.active_schedule().unwrap().is_empty());
        assert!(store.active_file().unwrap().is_none());
        assert_eq!(store.activate_file("missing").unwrap(), None);
    }
}
