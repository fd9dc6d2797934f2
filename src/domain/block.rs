// src/domain/block.rs
use serde::Serialize;

use crate::constants::DEFAULT_AUDIO_TITLE;

/// Marker that tags an audio source carrying its bytes inline as base64.
pub const EMBEDDED_AUDIO_MARKER: &str = "BASE64:";

/// One unit of note content, in render order.
///
/// Blocks are pure data: media payloads are opaque strings that are never
/// decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text { content: String },
    /// Base64 JPEG bytes, or any other opaque image reference.
    Image { payload: String },
    Audio { source: AudioSource, title: String },
}

impl Block {
    pub fn text(content: impl Into<String>) -> Self {
        Block::Text {
            content: content.into(),
        }
    }

    pub fn empty_text() -> Self {
        Block::text("")
    }

    pub fn image(payload: impl Into<String>) -> Self {
        Block::Image {
            payload: payload.into(),
        }
    }

    pub fn audio(source: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Block::Audio {
            source: AudioSource::new(source),
            title: if title.trim().is_empty() {
                DEFAULT_AUDIO_TITLE.to_string()
            } else {
                title
            },
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text { .. })
    }

    pub fn is_media(&self) -> bool {
        !self.is_text()
    }

    /// True for a text block whose content is empty or whitespace only.
    pub fn is_blank_text(&self) -> bool {
        match self {
            Block::Text { content } => content.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Text { content } => Some(content),
            _ => None,
        }
    }
}

/// Where an audio block's sound lives: a file path / URI, or inline bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AudioSource(String);

impl AudioSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn embedded(base64_data: &str) -> Self {
        Self(format!("{EMBEDDED_AUDIO_MARKER}{base64_data}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_embedded(&self) -> bool {
        self.0.starts_with(EMBEDDED_AUDIO_MARKER)
    }

    /// The base64 data of an embedded source.
    pub fn embedded_data(&self) -> Option<&str> {
        self.0.strip_prefix(EMBEDDED_AUDIO_MARKER)
    }
}

impl std::fmt::Display for AudioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
