// src/ports/view.rs
use serde::Serialize;
use tracing::warn;

use crate::domain::{content, AudioSource, Block, Note};
use crate::infrastructure::media::decode_image;

/// A block prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockView {
    Text {
        content: String,
    },
    Image {
        width: u32,
        height: u32,
        mime: String,
        /// Base64 image bytes, ready for a data URI.
        data: String,
    },
    /// An image whose payload could not be decoded; shown disabled.
    ImageUnavailable {
        reason: String,
    },
    Audio {
        title: String,
        source: AudioSource,
    },
    /// A recording with no source left to play.
    AudioUnavailable {
        title: String,
    },
}

/// Display blocks of a note. Blank text blocks are skipped.
pub fn note_blocks(note: &Note) -> Vec<BlockView> {
    content::deserialize(&note.content)
        .into_iter()
        .filter(|b| !b.is_blank_text())
        .map(block_view)
        .collect()
}

pub fn block_view(block: Block) -> BlockView {
    match block {
        Block::Text { content } => BlockView::Text { content },
        Block::Image { payload } => match decode_image(&payload) {
            Ok(info) => BlockView::Image {
                width: info.width,
                height: info.height,
                mime: image::guess_format(&info.bytes)
                    .map(|f| f.to_mime_type().to_string())
                    .unwrap_or_else(|_| "image/jpeg".to_string()),
                data: base64_data(&payload),
            },
            Err(e) => {
                warn!(error = %e, "Image block could not be decoded");
                BlockView::ImageUnavailable {
                    reason: e.to_string(),
                }
            }
        },
        Block::Audio { source, title } if source.as_str().is_empty() => {
            warn!(title, "Audio block has no source");
            BlockView::AudioUnavailable { title }
        }
        Block::Audio { source, title } => BlockView::Audio { title, source },
    }
}

fn base64_data(payload: &str) -> String {
    payload
        .strip_prefix(content::IMAGE_PREFIX)
        .unwrap_or(payload)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
