// src/infrastructure/media.rs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::constants::{
    AUDIO_DIR_NAME, DEFAULT_AUDIO_TITLE, JPEG_QUALITY, MAX_IMAGE_DIMENSION, PLAYBACK_DIR_NAME,
};
use crate::domain::content::IMAGE_PREFIX;
use crate::domain::{AudioSource, Block, DomainError};

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("No media data in {0}")]
    Empty(String),
}

impl From<MediaError> for DomainError {
    fn from(e: MediaError) -> Self {
        DomainError::Media(e.to_string())
    }
}

/// Decoded view of an image block, for presenters.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Turns files on disk into media blocks.
#[derive(Debug, Clone)]
pub struct MediaImporter {
    media_dir: PathBuf,
    max_dimension: u32,
    jpeg_quality: u8,
    default_audio_title: String,
}

impl MediaImporter {
    pub fn new<P: AsRef<Path>>(media_dir: P) -> Self {
        Self {
            media_dir: media_dir.as_ref().to_path_buf(),
            max_dimension: MAX_IMAGE_DIMENSION,
            jpeg_quality: JPEG_QUALITY,
            default_audio_title: DEFAULT_AUDIO_TITLE.to_string(),
        }
    }

    pub fn with_limits(mut self, max_dimension: u32, jpeg_quality: u8) -> Self {
        self.max_dimension = max_dimension.max(1);
        self.jpeg_quality = jpeg_quality.clamp(1, 100);
        self
    }

    pub fn with_default_audio_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.trim().is_empty() {
            self.default_audio_title = title;
        }
        self
    }

    /// Where embedded recordings are unpacked for an external player.
    pub fn playback_dir(&self) -> PathBuf {
        self.media_dir.join(PLAYBACK_DIR_NAME)
    }

    /// Load an image, scale it to fit the size limit and store it inline as JPEG.
    #[instrument(level = "debug", skip(self))]
    pub fn import_image(&self, path: &Path) -> Result<Block, MediaError> {
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        let image = self.fit(image);

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality).encode_image(&image.to_rgb8())?;
        if jpeg.is_empty() {
            return Err(MediaError::Empty(path.display().to_string()));
        }

        let encoded = STANDARD.encode(&jpeg);
        info!(
            width = image.width(),
            height = image.height(),
            encoded_len = encoded.len(),
            "Imported image"
        );
        Ok(Block::image(encoded))
    }

    /// Copy an audio file into the media directory and reference it by path.
    ///
    /// The copy is named by a hash of its bytes, so importing the same file
    /// twice reuses one copy. The title is the source file name.
    #[instrument(level = "debug", skip(self))]
    pub fn import_audio(&self, path: &Path) -> Result<Block, MediaError> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(MediaError::Empty(path.display().to_string()));
        }

        let audio_dir = self.media_dir.join(AUDIO_DIR_NAME);
        fs::create_dir_all(&audio_dir)?;

        let stem = content_hash(&bytes);
        let target = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => audio_dir.join(format!("{stem}.{ext}")),
            None => audio_dir.join(stem),
        };
        if !target.exists() {
            fs::write(&target, &bytes)?;
        }

        info!(?target, "Imported audio");
        Ok(Block::audio(target.to_string_lossy(), self.audio_title(path)))
    }

    /// Store an audio file's bytes inline instead of copying the file.
    pub fn embed_audio(&self, path: &Path) -> Result<Block, MediaError> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(MediaError::Empty(path.display().to_string()));
        }
        Ok(Block::Audio {
            source: AudioSource::embedded(&STANDARD.encode(&bytes)),
            title: self.audio_title(path),
        })
    }

    fn audio_title(&self, path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.default_audio_title.as_str())
            .to_string()
    }

    fn fit(&self, image: DynamicImage) -> DynamicImage {
        let (width, height) = (image.width(), image.height());
        if width <= self.max_dimension && height <= self.max_dimension {
            return image;
        }
        debug!(width, height, max = self.max_dimension, "Scaling image down");
        image.resize(self.max_dimension, self.max_dimension, FilterType::Triangle)
    }
}

/// Decode an image block payload to check it and read its size.
pub fn decode_image(payload: &str) -> Result<ImageInfo, MediaError> {
    let data = payload.strip_prefix(IMAGE_PREFIX).unwrap_or(payload);
    // Older content wraps base64 at 76 columns.
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD.decode(compact)?;
    if bytes.is_empty() {
        return Err(MediaError::Empty("image payload".to_string()));
    }

    let image = image::load_from_memory(&bytes)?;
    Ok(ImageInfo {
        width: image.width(),
        height: image.height(),
        bytes,
    })
}

/// A playable file for an audio source.
///
/// Plain sources are returned as paths; embedded ones are written to `dir`,
/// named by a hash of their bytes so replaying reuses the same file.
pub fn materialize_audio(source: &AudioSource, dir: &Path) -> Result<PathBuf, MediaError> {
    let Some(data) = source.embedded_data() else {
        return Ok(PathBuf::from(source.as_str()));
    };

    let bytes = STANDARD.decode(data.trim())?;
    if bytes.is_empty() {
        warn!("Embedded audio has no data");
        return Err(MediaError::Empty("embedded audio".to_string()));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.mp3", content_hash(&bytes)));
    if !path.exists() {
        fs::write(&path, bytes)?;
    }
    debug!(?path, "Wrote embedded audio to file");
    Ok(path)
}

/// First 8 bytes of the SHA-256 digest, hex encoded.
fn content_hash(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .take(8)
        .map(|b| format!("{b:02x}"))
        .collect()
}
