// src/application/note_deleter.rs
use tracing::{info, warn};

use crate::application::NoteRepository;
use crate::domain::DomainError;

pub struct NoteDeleter<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteDeleter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Delete a note by id. Zero affected rows is reported as `NoteNotFound`.
    pub fn delete_note(&mut self, note_id: i64) -> Result<usize, DomainError> {
        let deleted = self.repository.delete(note_id)?;
        if deleted == 0 {
            warn!(note_id, "Delete affected no rows");
            return Err(DomainError::NoteNotFound(note_id));
        }
        info!(note_id, "Deleted note");
        Ok(deleted)
    }
}
