// src/infrastructure/sqlite.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, Note};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const SCHEMA_VERSION: i64 = 1;

const CREATE_NOTES_TABLE: &str = "CREATE TABLE IF NOT EXISTS notes (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT,
    created_at INTEGER NOT NULL
)";

const SELECT_COLUMNS: &str = "SELECT _id, title, content, created_at FROM notes";

pub struct SqliteNoteRepository {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteNoteRepository {
    /// Open (creating if needed) the notes database at `database_path`.
    pub fn new<P: AsRef<Path>>(database_path: P) -> Result<Self> {
        let path = PathBuf::from(database_path.as_ref());
        debug!(?path, "Opening notes database");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        let repository = Self {
            conn,
            path: Some(path.clone()),
        };
        repository.migrate()?;

        info!(?path, "Opened notes database");
        Ok(repository)
    }

    /// A throwaway database living only as long as the repository.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let repository = Self { conn, path: None };
        repository.migrate()?;
        Ok(repository)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .context("Failed to read schema version")?;

        if version > SCHEMA_VERSION {
            return Err(DomainError::Storage(format!(
                "database schema version {version} is newer than supported version {SCHEMA_VERSION}"
            ))
            .into());
        }

        if version < SCHEMA_VERSION {
            debug!(from = version, to = SCHEMA_VERSION, "Migrating schema");
            self.conn
                .execute_batch(CREATE_NOTES_TABLE)
                .context("Failed to create notes table")?;
            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .context("Failed to record schema version")?;
        }
        Ok(())
    }

    fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            created_at: row.get(3)?,
        })
    }
}

impl NoteRepository for SqliteNoteRepository {
    #[instrument(level = "debug", skip(self, note), fields(title = %note.title))]
    fn insert(&mut self, note: &Note) -> Result<i64, DomainError> {
        self.conn.execute(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3)",
            params![note.title, note.content, note.created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(note_id = id, "Inserted note row");
        Ok(id)
    }

    #[instrument(level = "debug", skip(self, note), fields(note_id = note.id))]
    fn update(&mut self, note: &Note) -> Result<usize, DomainError> {
        let updated = self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2 WHERE _id = ?3",
            params![note.title, note.content, note.id],
        )?;
        debug!(updated, "Updated note row");
        Ok(updated)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&mut self, id: i64) -> Result<usize, DomainError> {
        let deleted = self
            .conn
            .execute("DELETE FROM notes WHERE _id = ?1", params![id])?;
        debug!(deleted, "Deleted note row");
        Ok(deleted)
    }

    #[instrument(level = "debug", skip(self))]
    fn get_by_id(&mut self, id: i64) -> Result<Option<Note>, DomainError> {
        let note = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE _id = ?1"),
                params![id],
                Self::row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    #[instrument(level = "debug", skip(self))]
    fn get_all(&mut self) -> Result<Vec<Note>, DomainError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, _id DESC"))?;
        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = notes.len(), "Loaded notes");
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn note(title: &str, created_at: i64) -> Note {
        Note {
            id: 0,
            title: title.to_string(),
            content: format!("TXT:{title}"),
            created_at,
        }
    }

    #[test]
    fn given_new_database_when_opening_then_records_schema_version() {
        let repo = SqliteNoteRepository::in_memory().unwrap();

        let version: i64 = repo
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn given_nested_path_when_opening_then_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("a/b/notes.db");

        let repo = SqliteNoteRepository::new(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(repo.path(), Some(db_path.as_path()));
    }

    #[test]
    fn given_newer_schema_when_opening_then_fails() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("notes.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
                .unwrap();
        }

        assert!(SqliteNoteRepository::new(&db_path).is_err());
    }

    #[test]
    fn given_null_content_when_reading_then_returns_empty_string() {
        let mut repo = SqliteNoteRepository::in_memory().unwrap();
        repo.conn
            .execute(
                "INSERT INTO notes (title, content, created_at) VALUES ('t', NULL, 1)",
                [],
            )
            .unwrap();

        let notes = repo.get_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "");
    }

    #[test]
    fn given_equal_timestamps_when_listing_then_newest_id_first() {
        let mut repo = SqliteNoteRepository::in_memory().unwrap();
        let first = repo.insert(&note("a", 5)).unwrap();
        let second = repo.insert(&note("b", 5)).unwrap();

        let ids: Vec<i64> = repo.get_all().unwrap().iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![second, first]);
    }
}
