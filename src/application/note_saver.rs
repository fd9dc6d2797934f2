// src/application/note_saver.rs
use tracing::{debug, info, instrument, warn};

use crate::application::editor::{EditorMode, NoteEditor};
use crate::application::NoteRepository;
use crate::domain::note::now_millis;
use crate::domain::{content, DomainError, Note};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub note: Note,
    /// True when a new row was inserted, false for an update.
    pub created: bool,
}

pub struct NoteSaver<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteSaver<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validate and persist the editor's note.
    ///
    /// A blank title or a note without savable content is rejected before
    /// anything is written. New notes are inserted, existing ones replaced
    /// whole; a write that affects no row is reported, not retried.
    #[instrument(level = "debug", skip_all, fields(mode = ?editor.mode()))]
    pub fn save(&mut self, editor: &NoteEditor) -> Result<SaveOutcome, DomainError> {
        let title = editor.title().trim();
        if title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if !editor.has_savable_content() {
            return Err(DomainError::EmptyNote);
        }

        let content = content::serialize(&editor.to_blocks());
        debug!(content_len = content.len(), "Serialized editor content");

        match editor.mode() {
            EditorMode::New => {
                let mut note = Note {
                    id: 0,
                    title: title.to_string(),
                    content,
                    created_at: now_millis(),
                };
                let id = self.repository.insert(&note)?;
                if id <= 0 {
                    warn!(id, "Insert did not return a row id");
                    return Err(DomainError::PersistenceFailed(
                        "insert returned no row id".to_string(),
                    ));
                }
                note.id = id;
                info!(note_id = id, "Created note");
                Ok(SaveOutcome {
                    note,
                    created: true,
                })
            }
            EditorMode::Existing { id, created_at } => {
                let note = Note {
                    id,
                    title: title.to_string(),
                    content,
                    created_at,
                };
                let updated = self.repository.update(&note)?;
                if updated == 0 {
                    warn!(note_id = id, "Update affected no rows");
                    return Err(DomainError::PersistenceFailed(format!(
                        "note {id} was not updated"
                    )));
                }
                info!(note_id = id, "Updated note");
                Ok(SaveOutcome {
                    note,
                    created: false,
                })
            }
        }
    }
}
