// src/application/mod.rs
pub mod editor;
pub mod media_request;
pub mod note_deleter;
pub mod note_duplicator;
pub mod note_lister;
pub mod note_saver;
pub mod note_viewer;

pub use editor::{BackspaceOutcome, EditorBlock, EditorMode, FieldId, NoteEditor};
pub use media_request::{request_media, MediaKind, MediaPicker, PermissionGate, PickOutcome};
pub use note_deleter::NoteDeleter;
pub use note_duplicator::NoteDuplicator;
pub use note_lister::NoteLister;
pub use note_saver::{NoteSaver, SaveOutcome};
pub use note_viewer::{NoteRepository, NoteViewer};
