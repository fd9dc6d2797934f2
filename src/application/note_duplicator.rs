// src/application/note_duplicator.rs
use tracing::info;

use crate::application::NoteRepository;
use crate::domain::note::now_millis;
use crate::domain::{DomainError, Note};

pub struct NoteDuplicator<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteDuplicator<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Store a copy of a note under a new id and a fresh creation time.
    pub fn duplicate(&mut self, note_id: i64) -> Result<Note, DomainError> {
        let original = self
            .repository
            .get_by_id(note_id)?
            .ok_or(DomainError::NoteNotFound(note_id))?;

        let mut copy = Note {
            id: 0,
            created_at: now_millis(),
            ..original
        };
        let id = self.repository.insert(&copy)?;
        if id <= 0 {
            return Err(DomainError::PersistenceFailed(format!(
                "could not duplicate note {note_id}"
            )));
        }
        copy.id = id;

        info!(source_id = note_id, note_id = id, "Duplicated note");
        Ok(copy)
    }
}
