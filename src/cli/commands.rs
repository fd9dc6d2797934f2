// src/cli/commands.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::application::media_request::DenialAdvice;
use crate::application::{
    request_media, BackspaceOutcome, MediaKind, NoteDeleter, NoteDuplicator, NoteEditor,
    NoteLister, NoteRepository, NoteSaver, NoteViewer, PickOutcome,
};
use crate::cli::notation::{BlockSpec, EditOp};
use crate::domain::{content, Block, DomainError, Note};
use crate::infrastructure::media::materialize_audio;
use crate::infrastructure::{Config, ContentRenderer, FileAccessGate, MediaImporter, PathPicker};
use crate::ports::{HtmlPresenter, TerminalPresenter};

/// Everything a command needs: the store, the media importer, and where to
/// write user-facing output.
pub struct Session<R: NoteRepository, W: Write> {
    pub repository: R,
    pub importer: MediaImporter,
    pub embed_audio: bool,
    pub out: W,
}

#[derive(Serialize)]
struct NoteDocument<'a> {
    #[serde(flatten)]
    note: &'a Note,
    blocks: Vec<Block>,
}

impl<R: NoteRepository, W: Write> Session<R, W> {
    pub fn new(repository: R, importer: MediaImporter, out: W) -> Self {
        Self {
            repository,
            importer,
            embed_audio: false,
            out,
        }
    }

    pub fn with_embedded_audio(mut self, embed: bool) -> Self {
        self.embed_audio = embed;
        self
    }

    #[instrument(level = "debug", skip(self, blocks))]
    pub fn create_note(&mut self, title: &str, blocks: &[BlockSpec]) -> Result<Note> {
        let mut editor = NoteEditor::new();
        editor.set_title(title);
        for spec in blocks {
            self.append_spec(&mut editor, spec)?;
        }

        let outcome = NoteSaver::new(&mut self.repository).save(&editor)?;
        writeln!(self.out, "Created note {}", outcome.note.id)?;
        Ok(outcome.note)
    }

    #[instrument(level = "debug", skip(self, ops))]
    pub fn edit_note(&mut self, note_id: i64, title: Option<&str>, ops: &[EditOp]) -> Result<Note> {
        let note = NoteViewer::new(&mut self.repository).view_note(note_id)?;
        let mut editor = NoteEditor::open(&note);
        if let Some(title) = title {
            editor.set_title(title);
        }

        for op in ops {
            debug!(?op, "Applying edit");
            match op {
                EditOp::SetText { index, text } => editor.set_text(*index, text.as_str())?,
                EditOp::InsertMedia { index, spec } => {
                    if let Some(block) = self.import(spec)? {
                        editor.insert_media(*index, block)?;
                    }
                }
                EditOp::Append(spec) => self.append_spec(&mut editor, spec)?,
                EditOp::Backspace { index } => match editor.backspace_on_empty_text(*index) {
                    BackspaceOutcome::Removed { media, focus } => {
                        let kind = if matches!(media, Block::Audio { .. }) { "audio" } else { "image" };
                        match focus.and_then(|field| editor.field_index(field)) {
                            Some(at) => writeln!(self.out, "Removed {kind} block; cursor at field {at}")?,
                            None => writeln!(self.out, "Removed {kind} block")?,
                        }
                    }
                    BackspaceOutcome::Ignored => {
                        writeln!(self.out, "Nothing to remove at field {index}")?;
                    }
                },
            }
        }

        let outcome = NoteSaver::new(&mut self.repository).save(&editor)?;
        writeln!(self.out, "Updated note {}", outcome.note.id)?;
        Ok(outcome.note)
    }

    pub fn view_note(&mut self, note_id: i64, json: bool) -> Result<()> {
        let note = NoteViewer::new(&mut self.repository).view_note(note_id)?;
        if json {
            let document = NoteDocument {
                note: &note,
                blocks: content::deserialize(&note.content),
            };
            writeln!(self.out, "{}", serde_json::to_string_pretty(&document)?)?;
        } else {
            write!(self.out, "{}", TerminalPresenter::new().render(&note))?;
        }
        Ok(())
    }

    pub fn open_note_html(&mut self, note_id: i64) -> Result<()> {
        let note = NoteViewer::new(&mut self.repository).view_note(note_id)?;
        let html = HtmlPresenter::new().render(&note);

        let renderer = ContentRenderer::new()?;
        let path = renderer.create_temp_file(&html)?;
        info!(note_id, ?path, "Opening note in browser");
        renderer.open_in_browser(&path)
    }

    /// Make the `nth` recording of a note (counting from 1) available as a
    /// file. Embedded recordings are written to the importer's playback
    /// directory and left there for the player; recordings stored as file
    /// paths are returned unchanged.
    pub fn extract_audio(&mut self, note_id: i64, nth: usize) -> Result<PathBuf> {
        let note = NoteViewer::new(&mut self.repository).view_note(note_id)?;
        let source = content::deserialize(&note.content)
            .into_iter()
            .filter_map(|block| match block {
                Block::Audio { source, .. } => Some(source),
                _ => None,
            })
            .nth(nth.saturating_sub(1))
            .with_context(|| format!("Note {note_id} has no recording #{nth}"))?;

        let path = materialize_audio(&source, &self.importer.playback_dir())
            .map_err(DomainError::from)?;
        debug!(?path, "Recording ready for playback");
        Ok(path)
    }

    pub fn play_audio(&mut self, note_id: i64, nth: usize) -> Result<()> {
        let path = self.extract_audio(note_id, nth)?;
        writeln!(self.out, "Playing {}", path.display())?;
        ContentRenderer::new()?.open_in_browser(&path)
    }

    pub fn list_notes(&mut self, json: bool) -> Result<Vec<Note>> {
        let notes = NoteLister::new(&mut self.repository).list_notes()?;
        if json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&notes)?)?;
        } else {
            write!(self.out, "{}", TerminalPresenter::new().render_list(&notes))?;
        }
        Ok(notes)
    }

    pub fn delete_note(&mut self, note_id: i64) -> Result<()> {
        match NoteDeleter::new(&mut self.repository).delete_note(note_id) {
            Ok(_) => {
                writeln!(self.out, "Deleted note {note_id}")?;
                Ok(())
            }
            Err(e @ DomainError::NoteNotFound(_)) => {
                Err(e).with_context(|| format!("Failed to delete note {note_id}"))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn duplicate_note(&mut self, note_id: i64) -> Result<Note> {
        let copy = NoteDuplicator::new(&mut self.repository).duplicate(note_id)?;
        writeln!(self.out, "Duplicated note {note_id} as {}", copy.id)?;
        Ok(copy)
    }

    fn append_spec(&mut self, editor: &mut NoteEditor, spec: &BlockSpec) -> Result<()> {
        match spec {
            BlockSpec::Text(text) => append_text(editor, text),
            media => {
                if let Some(block) = self.import(media)? {
                    editor.append_media(block)?;
                }
                Ok(())
            }
        }
    }

    /// Turn a media spec into a block. Media that cannot be read is reported
    /// and skipped so the rest of the note still saves.
    fn import(&mut self, spec: &BlockSpec) -> Result<Option<Block>> {
        let (kind, path) = match spec {
            BlockSpec::Image(path) => (MediaKind::Image, path),
            BlockSpec::Audio(path) => (MediaKind::Audio, path),
            BlockSpec::Text(_) => return Ok(None),
        };

        let picked = match request_media(
            kind,
            &mut FileAccessGate::new(path),
            &mut PathPicker::new(path),
        ) {
            PickOutcome::Picked(path) => path,
            PickOutcome::Cancelled => {
                writeln!(self.out, "Skipped {}: file not found", path.display())?;
                return Ok(None);
            }
            PickOutcome::Denied(advice) => {
                writeln!(self.out, "Skipped {}: {}", path.display(), denial_message(advice))?;
                return Ok(None);
            }
        };

        match self.load_media(kind, &picked) {
            Ok(block) => Ok(Some(block)),
            Err(e) => {
                warn!(error = %e, path = ?picked, "Media conversion failed");
                writeln!(self.out, "Skipped {}: {e}", picked.display())?;
                Ok(None)
            }
        }
    }

    fn load_media(&self, kind: MediaKind, path: &Path) -> std::result::Result<Block, DomainError> {
        let block = match kind {
            MediaKind::Image => self.importer.import_image(path)?,
            MediaKind::Audio if self.embed_audio => self.importer.embed_audio(path)?,
            MediaKind::Audio => self.importer.import_audio(path)?,
        };
        Ok(block)
    }
}

/// Write the default configuration to `path`. An existing file is kept
/// unless `force` is set.
pub fn init_config(path: &Path, force: bool, out: &mut impl Write) -> Result<Config> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists; use --force to replace it",
            path.display()
        );
    }
    let config = Config::create_default(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    info!(?path, "Wrote default config");
    writeln!(out, "Wrote {}", path.display())?;
    Ok(config)
}

/// Add text at the end of the note: fills the trailing empty field, or
/// continues the last text block on a new line.
fn append_text(editor: &mut NoteEditor, text: &str) -> Result<()> {
    let last = editor.blocks().len() - 1;
    let current = editor.blocks()[last].block.as_text().map(str::to_string);
    match current {
        Some(existing) if existing.is_empty() => editor.set_text(last, text)?,
        Some(existing) => editor.set_text(last, format!("{existing}\n{text}"))?,
        None => {
            return Err(DomainError::InvalidEdit("note does not end in a text field".to_string()).into())
        }
    }
    Ok(())
}

fn denial_message(advice: DenialAdvice) -> &'static str {
    match advice {
        DenialAdvice::RetryWithRationale => {
            "read access is needed to attach media to a note; allow it and try again"
        }
        DenialAdvice::OpenSettings => {
            "permission denied; change the file's permissions to attach it"
        }
    }
}
