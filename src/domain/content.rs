// src/domain/content.rs
//
// Flat string encoding of a block sequence, as stored in the `content` column.
use tracing::{debug, instrument, warn};

use crate::constants::DEFAULT_AUDIO_TITLE;
use crate::domain::block::{AudioSource, Block};

pub const PART_SEPARATOR: &str = "\n---PART_SEPARATOR---\n";
pub const TEXT_PREFIX: &str = "TXT:";
pub const IMAGE_PREFIX: &str = "IMG:";
pub const AUDIO_PREFIX: &str = "AUDIO:";
pub const AUDIO_TITLE_SEPARATOR: &str = "::TITLE::";

/// Flatten blocks into the persisted content string.
///
/// Blank text blocks are dropped, so a list made only of blank text
/// serializes to the empty string.
#[instrument(level = "debug", skip(blocks), fields(blocks = blocks.len()))]
pub fn serialize(blocks: &[Block]) -> String {
    let segments: Vec<String> = blocks
        .iter()
        .filter(|block| !block.is_blank_text())
        .map(render_segment)
        .collect();

    if segments.is_empty() {
        debug!("No content left to serialize");
        return String::new();
    }

    debug!(segments = segments.len(), "Serialized note content");
    segments.join(PART_SEPARATOR)
}

/// Parse a persisted content string back into blocks.
///
/// Never fails: an empty string gives an empty list and unknown segments are
/// read as text. A media segment without a payload still becomes a media
/// block, so re-saving the note writes back the same string and the block
/// renders as unavailable.
#[instrument(level = "debug", skip(serialized), fields(len = serialized.len()))]
pub fn deserialize(serialized: &str) -> Vec<Block> {
    if serialized.is_empty() {
        debug!("Empty content to deserialize");
        return Vec::new();
    }

    serialized.split(PART_SEPARATOR).map(parse_segment).collect()
}

fn render_segment(block: &Block) -> String {
    match block {
        Block::Text { content } => format!("{TEXT_PREFIX}{content}"),
        Block::Image { payload } => {
            if payload.starts_with(IMAGE_PREFIX) {
                payload.clone()
            } else {
                format!("{IMAGE_PREFIX}{payload}")
            }
        }
        Block::Audio { source, .. } if source.as_str().starts_with(AUDIO_PREFIX) => {
            source.as_str().to_string()
        }
        Block::Audio { source, title } => {
            format!("{AUDIO_PREFIX}{source}{AUDIO_TITLE_SEPARATOR}{title}")
        }
    }
}

fn parse_segment(segment: &str) -> Block {
    if let Some(payload) = segment.strip_prefix(IMAGE_PREFIX) {
        if payload.is_empty() {
            warn!("Image segment without payload");
        }
        return Block::image(payload);
    }

    if let Some(text) = segment.strip_prefix(TEXT_PREFIX) {
        return Block::text(text);
    }

    if let Some(audio) = segment.strip_prefix(AUDIO_PREFIX) {
        let (source, title) = match audio.split_once(AUDIO_TITLE_SEPARATOR) {
            Some((source, title)) => (source, title),
            None => (audio, DEFAULT_AUDIO_TITLE),
        };
        if source.is_empty() {
            warn!(title, "Audio segment without source");
        }
        return Block::Audio {
            source: AudioSource::new(source),
            title: title.to_string(),
        };
    }

    debug!("Untagged segment read as text");
    Block::text(segment)
}
