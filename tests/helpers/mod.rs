use anyhow::{Context, Result};
use blocknotes::application::NoteRepository;
use blocknotes::domain::Note;
use blocknotes::infrastructure::{MediaImporter, SqliteNoteRepository};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for a note database in a temporary directory
#[allow(dead_code)]
pub struct TestDatabase {
    temp_dir: TempDir,
    pub database_path: PathBuf,
    pub media_dir: PathBuf,
}

#[allow(dead_code)]
impl TestDatabase {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let database_path = temp_dir.path().join("data").join("notes.db");
        let media_dir = temp_dir.path().join("data").join("media");

        Ok(Self {
            temp_dir,
            database_path,
            media_dir,
        })
    }

    /// Database with the golden notes already stored
    pub fn seeded() -> Result<Self> {
        let database = Self::new()?;
        let mut repo = database.open_repository()?;
        for (title, content, created_at) in test_notes::ALL {
            let note = Note {
                id: 0,
                title: title.to_string(),
                content: content.to_string(),
                created_at: *created_at,
            };
            repo.insert(&note)?;
        }
        Ok(database)
    }

    pub fn open_repository(&self) -> Result<SqliteNoteRepository> {
        SqliteNoteRepository::new(&self.database_path)
    }

    pub fn importer(&self) -> MediaImporter {
        MediaImporter::new(&self.media_dir)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a solid-colour PNG next to the database
    pub fn write_png(&self, name: &str, width: u32, height: u32) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        RgbImage::from_pixel(width, height, Rgb([20, 120, 220]))
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_file(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Golden notes, inserted in order by `TestDatabase::seeded`
#[allow(dead_code)]
pub mod test_notes {
    pub const GROCERIES: i64 = 1;
    pub const MEETING: i64 = 2;
    pub const VOICE_MEMO: i64 = 3;
    pub const RECIPE: i64 = 4;

    pub const NONEXISTENT: i64 = 999_999;

    pub const ALL: &[(&str, &str, i64)] = &[
        ("Groceries", "TXT:milk\neggs\nbread", 1_700_000_000_000),
        (
            "Meeting <notes>",
            "TXT:Agenda & goals\n---PART_SEPARATOR---\nAUDIO:/data/audio_notes/standup.m4a::TITLE::standup.m4a\n---PART_SEPARATOR---\nTXT:Follow up",
            1_700_000_100_000,
        ),
        (
            "Voice memo",
            "AUDIO:BASE64:SUQzBAAAAAAA::TITLE::memo.mp3",
            1_700_000_200_000,
        ),
        (
            "Recipe",
            "TXT:Pancakes\n---PART_SEPARATOR---\nIMG:not-really-base64",
            1_700_000_300_000,
        ),
    ];
}
