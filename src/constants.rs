// src/constants.rs
//
// Application-wide constants shared by the media, editor and presentation code.

/// Title given to audio blocks whose source has no usable name.
pub const DEFAULT_AUDIO_TITLE: &str = "Audio Recording";

/// Longest side, in pixels, an imported image is scaled down to.
///
/// Used in: `infrastructure/media.rs`, `infrastructure/config.rs`
pub const MAX_IMAGE_DIMENSION: u32 = 1024;

/// JPEG quality used when re-encoding imported images.
///
/// Used in: `infrastructure/media.rs`, `infrastructure/config.rs`
pub const JPEG_QUALITY: u8 = 80;

/// Subdirectory of the media directory that holds copied audio files.
pub const AUDIO_DIR_NAME: &str = "audio_notes";

/// Subdirectory of the media directory where embedded recordings are written
/// for playback. Files there outlive the command that wrote them.
pub const PLAYBACK_DIR_NAME: &str = "playback";

/// Characters of text shown per note in `list` output.
pub const PREVIEW_LENGTH: usize = 60;

/// Delay in milliseconds after writing the HTML file before the browser opens it.
///
/// Without this delay the browser may open an empty or incomplete file.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
