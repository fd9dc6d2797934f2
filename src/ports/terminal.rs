// src/ports/terminal.rs
use crate::domain::Note;
use crate::ports::view::{note_blocks, BlockView};
use crate::util::text::{format_timestamp, preview};

/// Plain-text rendering of notes for the terminal.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_block(&self, block: &BlockView) -> String {
        match block {
            BlockView::Text { content } => content.clone(),
            BlockView::Image { width, height, .. } => format!("[image {width}x{height}]"),
            BlockView::ImageUnavailable { .. } => "[image unavailable]".to_string(),
            BlockView::Audio { title, source } if source.is_embedded() => {
                format!("[audio: {title} (embedded)]")
            }
            BlockView::Audio { title, source } => format!("[audio: {title}] {source}"),
            BlockView::AudioUnavailable { title } => format!("[audio unavailable: {title}]"),
        }
    }

    pub fn render(&self, note: &Note) -> String {
        let blocks = note_blocks(note);
        let body = if blocks.is_empty() {
            "(empty)".to_string()
        } else {
            blocks
                .iter()
                .map(|block| self.render_block(block))
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        format!(
            "{} (#{})\nCreated: {}\n\n{body}\n",
            note.title,
            note.id,
            format_timestamp(note.created_at)
        )
    }

    /// One line per note: id, creation date, title and a content preview.
    pub fn render_list(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes.\n".to_string();
        }
        notes
            .iter()
            .map(|note| {
                format!(
                    "{:>6}  {}  {}  {}\n",
                    note.id,
                    format_timestamp(note.created_at),
                    note.title,
                    preview(&note.content)
                )
            })
            .collect()
    }
}
