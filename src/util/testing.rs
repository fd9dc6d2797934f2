// src/util/testing.rs

use anyhow::Result;
use std::collections::BTreeMap;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{DomainError, Note};

/// In-memory row store for testing use cases that depend on NoteRepository
///
/// Behaves like the SQLite store: ids are assigned on insert, updates and
/// deletes report affected rows, and `get_all` returns newest first.
///
/// # Examples
///
/// ```
/// use blocknotes::application::NoteRepository;
/// use blocknotes::util::testing::MockNoteRepository;
/// use blocknotes::domain::Note;
///
/// let mut mock = MockNoteRepository::builder()
///     .with_note(Note {
///         id: 123,
///         title: "Groceries".to_string(),
///         content: "TXT:milk".to_string(),
///         created_at: 1,
///     })
///     .build();
/// assert!(mock.get_by_id(123).unwrap().is_some());
/// ```
pub struct MockNoteRepository {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
    failing_writes: bool,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.failing_writes {
            return Err(DomainError::Storage("disk I/O error".to_string()));
        }
        Ok(())
    }
}

impl NoteRepository for MockNoteRepository {
    fn insert(&mut self, note: &Note) -> Result<i64, DomainError> {
        self.check_writable()?;
        let id = self.next_id;
        self.next_id += 1;
        self.notes.insert(id, Note { id, ..note.clone() });
        Ok(id)
    }

    fn update(&mut self, note: &Note) -> Result<usize, DomainError> {
        self.check_writable()?;
        match self.notes.get_mut(&note.id) {
            Some(stored) => {
                stored.title = note.title.clone();
                stored.content = note.content.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&mut self, id: i64) -> Result<usize, DomainError> {
        self.check_writable()?;
        Ok(usize::from(self.notes.remove(&id).is_some()))
    }

    fn get_by_id(&mut self, id: i64) -> Result<Option<Note>, DomainError> {
        Ok(self.notes.get(&id).cloned())
    }

    fn get_all(&mut self) -> Result<Vec<Note>, DomainError> {
        let mut notes: Vec<Note> = self.notes.values().cloned().collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: BTreeMap<i64, Note>,
    failing_writes: bool,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            failing_writes: false,
        }
    }

    /// Add a stored note, keyed by its id
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id, note);
        self
    }

    /// Make every insert, update and delete fail with a storage error
    pub fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    pub fn build(self) -> MockNoteRepository {
        let next_id = self.notes.keys().max().copied().unwrap_or(0) + 1;
        MockNoteRepository {
            notes: self.notes,
            next_id,
            failing_writes: self.failing_writes,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["rusqlite", "image", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
