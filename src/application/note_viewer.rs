// src/application/note_viewer.rs
use crate::domain::{DomainError, Note};

/// Row store for notes.
///
/// Mirrors a plain table: whole-row insert and replace, delete by id, and
/// lookups. Counts are affected rows.
pub trait NoteRepository {
    /// Insert a new row and return its id. `created_at` is taken from the note.
    fn insert(&mut self, note: &Note) -> Result<i64, DomainError>;

    /// Replace title and content of the row with `note.id`; `created_at` is kept.
    fn update(&mut self, note: &Note) -> Result<usize, DomainError>;

    fn delete(&mut self, id: i64) -> Result<usize, DomainError>;

    fn get_by_id(&mut self, id: i64) -> Result<Option<Note>, DomainError>;

    /// All notes, newest first.
    fn get_all(&mut self) -> Result<Vec<Note>, DomainError>;
}

impl<R: NoteRepository + ?Sized> NoteRepository for &mut R {
    fn insert(&mut self, note: &Note) -> Result<i64, DomainError> {
        (**self).insert(note)
    }

    fn update(&mut self, note: &Note) -> Result<usize, DomainError> {
        (**self).update(note)
    }

    fn delete(&mut self, id: i64) -> Result<usize, DomainError> {
        (**self).delete(id)
    }

    fn get_by_id(&mut self, id: i64) -> Result<Option<Note>, DomainError> {
        (**self).get_by_id(id)
    }

    fn get_all(&mut self) -> Result<Vec<Note>, DomainError> {
        (**self).get_all()
    }
}

pub struct NoteViewer<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteViewer<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn view_note(&mut self, note_id: i64) -> Result<Note, DomainError> {
        self.repository
            .get_by_id(note_id)?
            .ok_or(DomainError::NoteNotFound(note_id))
    }
}
