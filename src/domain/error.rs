// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Note must not be empty")]
    EmptyNote,
    #[error("Failed to persist note: {0}")]
    PersistenceFailed(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Media error: {0}")]
    Media(String),
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}
