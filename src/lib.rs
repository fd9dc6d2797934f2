// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use std::io::{self, StdoutLock};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::args::{Args, Command};
use crate::cli::commands::{init_config, Session};
use crate::infrastructure::{Config, MediaImporter, SqliteNoteRepository};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting blocknotes with arguments");

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let database = args.database;
    let open = || open_session(&config_path, database.clone());

    match args.command {
        Command::InitConfig { force } => {
            init_config(&config_path, force, &mut io::stdout().lock())?;
        }
        Command::New { title, blocks } => {
            open()?.create_note(&title, &blocks)?;
        }
        Command::Edit {
            note_id,
            title,
            ops,
        } => {
            open()?.edit_note(note_id, title.as_deref(), &ops)?;
        }
        Command::View {
            note_id,
            html: true,
            ..
        } => open()?.open_note_html(note_id)?,
        Command::View { note_id, json, .. } => open()?.view_note(note_id, json)?,
        Command::List { json } => {
            open()?.list_notes(json)?;
        }
        Command::Delete { note_id } => open()?.delete_note(note_id)?,
        Command::Play { note_id, nth } => open()?.play_audio(note_id, nth)?,
        Command::Duplicate { note_id } => {
            open()?.duplicate_note(note_id)?;
        }
    }

    Ok(())
}

/// Load the config, open the note store and wire up a session writing to stdout.
fn open_session(
    config_path: &Path,
    database: Option<PathBuf>,
) -> Result<Session<SqliteNoteRepository, StdoutLock<'static>>> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let database = match database {
        Some(path) => {
            debug!(?path, "Using provided database path");
            path
        }
        None => config.database_path()?,
    };
    let media_dir = config.media_dir(&database);
    info!(?database, ?media_dir, "Opening note store");

    let repository = SqliteNoteRepository::new(&database)?;
    let importer = MediaImporter::new(&media_dir)
        .with_limits(config.media.max_image_dimension, config.media.jpeg_quality)
        .with_default_audio_title(config.media.default_audio_title.clone());

    Ok(Session::new(repository, importer, io::stdout().lock())
        .with_embedded_audio(config.media.embed_audio))
}
