// src/infrastructure/mod.rs
pub mod config;
pub mod media;
pub mod picker;
pub mod renderer;
pub mod sqlite;

pub use config::Config;
pub use media::{MediaError, MediaImporter};
pub use picker::{FileAccessGate, PathPicker};
pub use renderer::ContentRenderer;
pub use sqlite::SqliteNoteRepository;
