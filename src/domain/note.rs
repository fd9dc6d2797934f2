// src/domain/note.rs
use serde::Serialize;

/// A persisted note row.
///
/// `id == 0` marks a note that has not been saved yet. `content` holds the
/// serialized block sequence (see [`crate::domain::content`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            created_at: now_millis(),
        }
    }
}

/// Current wall clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
