// src/application/editor.rs
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{content, Block, DomainError, Note};

/// Display handle of one editable field, stable for the editor's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldId(u64);

/// A block as the editor holds it: domain data plus the field showing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBlock {
    pub field: FieldId,
    pub block: Block,
}

impl EditorBlock {
    pub fn to_block(&self) -> Block {
        self.block.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Existing { id: i64, created_at: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackspaceOutcome {
    /// Not a cascade; the key press is left to normal character deletion.
    Ignored,
    /// The media block and the empty text field after it were removed.
    Removed {
        media: Block,
        focus: Option<FieldId>,
    },
}

/// Working state of one note while it is being edited.
///
/// Invariant: every media block is immediately followed by a text block,
/// and the list is never empty.
#[derive(Debug)]
pub struct NoteEditor {
    mode: EditorMode,
    title: String,
    blocks: Vec<EditorBlock>,
    focus: Option<FieldId>,
    next_field: u64,
}

impl NoteEditor {
    /// Editor for a note that does not exist yet: one empty text field.
    pub fn new() -> Self {
        let mut editor = Self {
            mode: EditorMode::New,
            title: String::new(),
            blocks: Vec::new(),
            focus: None,
            next_field: 0,
        };
        editor.load_from_parts(Vec::new());
        editor
    }

    /// Editor for a stored note, rehydrated from its serialized content.
    pub fn open(note: &Note) -> Self {
        let mut editor = Self {
            mode: EditorMode::Existing {
                id: note.id,
                created_at: note.created_at,
            },
            title: note.title.clone(),
            blocks: Vec::new(),
            focus: None,
            next_field: 0,
        };
        editor.load_from_parts(content::deserialize(&note.content));
        editor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn blocks(&self) -> &[EditorBlock] {
        &self.blocks
    }

    pub fn focus(&self) -> Option<FieldId> {
        self.focus
    }

    pub fn field_index(&self, field: FieldId) -> Option<usize> {
        self.blocks.iter().position(|b| b.field == field)
    }

    /// Domain view of the current blocks, in order.
    pub fn to_blocks(&self) -> Vec<Block> {
        self.blocks.iter().map(EditorBlock::to_block).collect()
    }

    /// Replace the content of the text field at `index`.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), DomainError> {
        let len = self.blocks.len();
        let entry = self
            .blocks
            .get_mut(index)
            .ok_or_else(|| DomainError::InvalidEdit(format!("no block at index {index} (len {len})")))?;
        match &mut entry.block {
            Block::Text { content } => {
                *content = text.into();
                self.focus = Some(entry.field);
                Ok(())
            }
            _ => Err(DomainError::InvalidEdit(format!(
                "block at index {index} is not text"
            ))),
        }
    }

    /// Insert a media block at `position` followed by a fresh empty text field.
    ///
    /// A position directly after another media block is moved past that
    /// block's text field so two media blocks never touch. Returns the index
    /// the media block landed on; focus moves to the new text field.
    #[instrument(level = "debug", skip(self, block))]
    pub fn insert_media(&mut self, position: usize, block: Block) -> Result<usize, DomainError> {
        if !block.is_media() {
            return Err(DomainError::InvalidEdit(
                "only image or audio blocks can be inserted as media".to_string(),
            ));
        }

        let mut at = position.min(self.blocks.len());
        if at > 0 && self.blocks[at - 1].block.is_media() {
            at += 1;
        }

        let media = self.entry(block);
        let text = self.entry(Block::empty_text());
        self.focus = Some(text.field);
        self.blocks.insert(at, media);
        self.blocks.insert(at + 1, text);

        debug!(index = at, len = self.blocks.len(), "Inserted media block");
        Ok(at)
    }

    /// Insert a media block after the last block.
    pub fn append_media(&mut self, block: Block) -> Result<usize, DomainError> {
        self.insert_media(self.blocks.len(), block)
    }

    /// Backspace pressed in the text field at `index`.
    ///
    /// Only when that field is empty and sits right after a media block are
    /// both removed together; anything else is [`BackspaceOutcome::Ignored`].
    #[instrument(level = "debug", skip(self))]
    pub fn backspace_on_empty_text(&mut self, index: usize) -> BackspaceOutcome {
        let is_empty_text = matches!(
            self.blocks.get(index).map(|b| &b.block),
            Some(Block::Text { content }) if content.is_empty()
        );
        if !is_empty_text || index == 0 || !self.blocks[index - 1].block.is_media() {
            return BackspaceOutcome::Ignored;
        }

        let media_index = index - 1;
        self.blocks.remove(index);
        let media = self.blocks.remove(media_index).block;

        let before = media_index
            .checked_sub(1)
            .and_then(|i| self.blocks.get(i))
            .filter(|b| b.block.is_text());
        let after = self.blocks.get(media_index).filter(|b| b.block.is_text());
        let focus = before.or(after).map(|b| b.field);

        if self.blocks.is_empty() {
            let text = self.entry(Block::empty_text());
            self.blocks.push(text);
        }
        self.focus = focus.or_else(|| self.blocks.first().map(|b| b.field));

        debug!(media_index, len = self.blocks.len(), "Removed media block with its text field");
        BackspaceOutcome::Removed {
            media,
            focus: self.focus,
        }
    }

    /// Rebuild the working list from deserialized parts.
    ///
    /// Every media part that is last, or not followed by text, gets an empty
    /// text field after it.
    pub fn load_from_parts(&mut self, parts: Vec<Block>) {
        self.blocks.clear();

        let mut parts = parts.into_iter().peekable();
        while let Some(part) = parts.next() {
            let needs_text = part.is_media() && !parts.peek().is_some_and(Block::is_text);
            let entry = self.entry(part);
            self.blocks.push(entry);
            if needs_text {
                let text = self.entry(Block::empty_text());
                self.blocks.push(text);
            }
        }

        if self.blocks.is_empty() {
            let text = self.entry(Block::empty_text());
            self.blocks.push(text);
        }
        self.focus = self.blocks.first().map(|b| b.field);
    }

    /// True when there is any non-blank text or any media block.
    pub fn has_savable_content(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| b.block.is_media() || !b.block.is_blank_text())
    }

    fn entry(&mut self, block: Block) -> EditorBlock {
        let field = FieldId(self.next_field);
        self.next_field += 1;
        EditorBlock { field, block }
    }
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AudioSource;
    use rstest::rstest;

    fn kinds(editor: &NoteEditor) -> Vec<&'static str> {
        editor
            .blocks()
            .iter()
            .map(|b| match b.block {
                Block::Text { .. } => "txt",
                Block::Image { .. } => "img",
                Block::Audio { .. } => "audio",
            })
            .collect()
    }

    #[test]
    fn given_new_editor_when_created_then_has_single_empty_text() {
        let editor = NoteEditor::new();

        assert_eq!(editor.to_blocks(), vec![Block::empty_text()]);
        assert_eq!(editor.mode(), EditorMode::New);
        assert_eq!(editor.focus(), Some(editor.blocks()[0].field));
    }

    #[test]
    fn given_media_inserted_at_position_then_text_follows_it() {
        let mut editor = NoteEditor::new();
        editor.set_text(0, "milk").unwrap();

        let at = editor.insert_media(1, Block::image("AAAA")).unwrap();

        assert_eq!(at, 1);
        assert_eq!(kinds(&editor), vec!["txt", "img", "txt"]);
        assert_eq!(editor.focus(), Some(editor.blocks()[2].field));
    }

    #[test]
    fn given_media_inserted_at_front_then_text_follows_it() {
        let mut editor = NoteEditor::new();

        let at = editor.insert_media(0, Block::audio("/a.mp3", "A")).unwrap();

        assert_eq!(at, 0);
        assert_eq!(kinds(&editor), vec!["audio", "txt", "txt"]);
    }

    #[test]
    fn given_position_right_after_media_when_inserting_then_skips_past_its_text() {
        let mut editor = NoteEditor::new();
        editor.append_media(Block::image("A")).unwrap();

        let at = editor.insert_media(2, Block::image("B")).unwrap();

        assert_eq!(at, 3);
        assert_eq!(kinds(&editor), vec!["txt", "img", "txt", "img", "txt"]);
    }

    #[test]
    fn given_out_of_range_position_when_inserting_then_appends() {
        let mut editor = NoteEditor::new();

        let at = editor.insert_media(99, Block::image("A")).unwrap();

        assert_eq!(at, 1);
        assert_eq!(kinds(&editor), vec!["txt", "img", "txt"]);
    }

    #[test]
    fn given_text_block_when_inserting_as_media_then_rejects() {
        let mut editor = NoteEditor::new();

        let result = editor.insert_media(0, Block::text("nope"));

        assert!(matches!(result, Err(DomainError::InvalidEdit(_))));
        assert_eq!(editor.blocks().len(), 1);
    }

    #[test]
    fn given_empty_text_after_media_when_backspacing_then_removes_both() {
        let mut editor = NoteEditor::new();
        editor.set_text(0, "milk").unwrap();
        editor.append_media(Block::image("AAAA")).unwrap();
        let first_field = editor.blocks()[0].field;

        let outcome = editor.backspace_on_empty_text(2);

        assert_eq!(
            outcome,
            BackspaceOutcome::Removed {
                media: Block::image("AAAA"),
                focus: Some(first_field),
            }
        );
        assert_eq!(editor.to_blocks(), vec![Block::text("milk")]);
    }

    #[test]
    fn given_media_first_when_backspacing_its_text_then_focuses_following_text() {
        let mut editor = NoteEditor::new();
        editor.insert_media(0, Block::image("A")).unwrap();
        editor.set_text(2, "tail").unwrap();
        let tail_field = editor.blocks()[2].field;

        let outcome = editor.backspace_on_empty_text(1);

        assert!(matches!(outcome, BackspaceOutcome::Removed { focus: Some(f), .. } if f == tail_field));
        assert_eq!(editor.to_blocks(), vec![Block::text("tail")]);
    }

    #[test]
    fn given_non_empty_text_after_media_when_backspacing_then_ignored() {
        let mut editor = NoteEditor::new();
        editor.append_media(Block::image("A")).unwrap();
        editor.set_text(2, "x").unwrap();

        assert_eq!(editor.backspace_on_empty_text(2), BackspaceOutcome::Ignored);
        assert_eq!(editor.blocks().len(), 3);
    }

    #[test]
    fn given_empty_text_after_text_when_backspacing_then_ignored() {
        let mut editor = NoteEditor::new();
        editor.load_from_parts(vec![Block::text("a"), Block::empty_text()]);

        assert_eq!(editor.backspace_on_empty_text(1), BackspaceOutcome::Ignored);
        assert_eq!(editor.backspace_on_empty_text(0), BackspaceOutcome::Ignored);
        assert_eq!(editor.blocks().len(), 2);
    }

    #[test]
    fn given_only_media_when_cascade_empties_list_then_keeps_one_text_field() {
        let mut editor = NoteEditor::new();
        editor.load_from_parts(vec![Block::image("A")]);

        let outcome = editor.backspace_on_empty_text(1);

        assert!(matches!(outcome, BackspaceOutcome::Removed { .. }));
        assert_eq!(editor.to_blocks(), vec![Block::empty_text()]);
    }

    #[test]
    fn given_parts_ending_in_media_when_loading_then_restores_trailing_text() {
        let mut editor = NoteEditor::new();

        editor.load_from_parts(vec![
            Block::text("milk"),
            Block::image("A"),
            Block::audio("/a.mp3", "A"),
            Block::text("x"),
        ]);

        assert_eq!(kinds(&editor), vec!["txt", "img", "txt", "audio", "txt"]);
    }

    #[test]
    fn given_whitespace_only_text_when_checking_then_not_savable() {
        let mut editor = NoteEditor::new();
        editor.set_text(0, "   ").unwrap();
        assert!(!editor.has_savable_content());

        editor.append_media(Block::image("A")).unwrap();
        assert!(editor.has_savable_content());
    }

    #[test]
    fn given_media_index_when_setting_text_then_rejects() {
        let mut editor = NoteEditor::new();
        editor.append_media(Block::image("A")).unwrap();

        assert!(editor.set_text(1, "x").is_err());
        assert!(editor.set_text(9, "x").is_err());
    }

    #[test]
    fn given_stored_note_when_opening_then_mode_is_existing() {
        let note = Note {
            id: 7,
            title: "Groceries".to_string(),
            content: "TXT:milk".to_string(),
            created_at: 1_700_000_000_000,
        };

        let editor = NoteEditor::open(&note);

        assert_eq!(
            editor.mode(),
            EditorMode::Existing {
                id: 7,
                created_at: 1_700_000_000_000
            }
        );
        assert_eq!(editor.title(), "Groceries");
        assert_eq!(editor.to_blocks(), vec![Block::text("milk")]);
    }

    fn note_with(content: String) -> Note {
        Note {
            id: 1,
            title: "Round trip".to_string(),
            content,
            created_at: 1,
        }
    }

    fn embedded(data: &str, title: &str) -> Block {
        Block::Audio {
            source: AudioSource::embedded(data),
            title: title.to_string(),
        }
    }

    #[rstest]
    #[case::leading_embedded_audio(vec![embedded("AAEC", "Clip"), Block::text("after")])]
    #[case::trailing_embedded_audio(vec![Block::text("before"), embedded("SUQzBA==", "memo.mp3")])]
    #[case::text_with_title_marker(vec![Block::text("a ::TITLE:: b"), Block::audio("/a.mp3", "Memo")])]
    #[case::multiline_text_around_media(vec![
        Block::text("line one\nline two\n"),
        Block::image("AAAA"),
        Block::text("\nline three"),
    ])]
    fn given_blocks_when_saving_and_reopening_then_content_survives(#[case] blocks: Vec<Block>) {
        let stored = content::serialize(&blocks);
        assert_eq!(content::deserialize(&stored), blocks);

        let editor = NoteEditor::open(&note_with(stored.clone()));

        assert_eq!(content::serialize(&editor.to_blocks()), stored);
        let restored: Vec<Block> = editor
            .to_blocks()
            .into_iter()
            .filter(|b| !b.is_blank_text())
            .collect();
        assert_eq!(restored, blocks);
        for (index, entry) in editor.blocks().iter().enumerate() {
            if entry.block.is_media() {
                assert!(editor.blocks()[index + 1].block.is_text());
            }
        }
    }

    #[test]
    fn given_trailing_empty_text_segment_when_reopening_then_keeps_single_text_field() {
        let stored = "TXT:hi\n---PART_SEPARATOR---\nIMG:AAAA\n---PART_SEPARATOR---\nTXT:";

        let editor = NoteEditor::open(&note_with(stored.to_string()));

        assert_eq!(
            editor.to_blocks(),
            vec![Block::text("hi"), Block::image("AAAA"), Block::empty_text()]
        );
        let resaved = content::serialize(&editor.to_blocks());
        assert_eq!(resaved, "TXT:hi\n---PART_SEPARATOR---\nIMG:AAAA");
        assert_eq!(NoteEditor::open(&note_with(resaved)).to_blocks(), editor.to_blocks());
    }

    #[test]
    fn given_image_without_payload_when_reopening_and_saving_then_content_is_unchanged() {
        let stored = "TXT:ok\n---PART_SEPARATOR---\nIMG:".to_string();

        let mut content = stored.clone();
        for _ in 0..3 {
            let editor = NoteEditor::open(&note_with(content));
            content = content::serialize(&editor.to_blocks());
        }

        assert_eq!(content, stored);
    }

    #[rstest]
    #[case::single_text(vec![Block::text("a")])]
    #[case::text_media_text(vec![Block::text("a"), Block::image("X"), Block::text("b")])]
    #[case::media_first(vec![Block::audio("/a.mp3", "A"), Block::text("b")])]
    #[case::two_media(vec![Block::image("X"), Block::image("Y")])]
    fn given_any_position_when_inserting_media_then_text_follows_returned_index(
        #[case] parts: Vec<Block>,
    ) {
        let len = {
            let mut editor = NoteEditor::new();
            editor.load_from_parts(parts.clone());
            editor.blocks().len()
        };

        for position in 0..=len + 1 {
            let mut editor = NoteEditor::new();
            editor.load_from_parts(parts.clone());

            let at = editor.insert_media(position, Block::image("NEW")).unwrap();

            assert_eq!(editor.blocks()[at].block, Block::image("NEW"));
            assert!(editor.blocks()[at + 1].block.is_blank_text());
            assert_eq!(editor.focus(), Some(editor.blocks()[at + 1].field));
            assert!(at == position.min(len) || at == position.min(len) + 1);
            if at > 0 {
                assert!(!editor.blocks()[at - 1].block.is_media());
            }
        }
    }
}
