// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_AUDIO_TITLE, JPEG_QUALITY, MAX_IMAGE_DIMENSION};

const APP_DIR: &str = "blocknotes";

/// TOML configuration for blocknotes
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Database file; empty means the platform data directory.
    #[serde(default)]
    pub database: String,
    /// Directory for copied audio files; empty means next to the database.
    #[serde(default)]
    pub media_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MediaConfig {
    #[serde(default = "default_max_image_dimension")]
    pub max_image_dimension: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_audio_title")]
    pub default_audio_title: String,
    /// Store audio bytes inside the note instead of copying the file.
    #[serde(default)]
    pub embed_audio: bool,
}

// Default value functions
fn default_max_image_dimension() -> u32 { MAX_IMAGE_DIMENSION }
fn default_jpeg_quality() -> u8 { JPEG_QUALITY }
fn default_audio_title() -> String { DEFAULT_AUDIO_TITLE.to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: String::new(),
            media_dir: String::new(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_image_dimension: default_max_image_dimension(),
            jpeg_quality: default_jpeg_quality(),
            default_audio_title: default_audio_title(),
            embed_audio: false,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            debug!(?path, "Loading config");
            Self::load(path)
        } else {
            debug!(?path, "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Platform location of the config file
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(dir.join(APP_DIR).join("config.toml"))
    }

    /// Database file to use, resolving the empty setting to the data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if !self.storage.database.is_empty() {
            return Ok(PathBuf::from(&self.storage.database));
        }
        let dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(dir.join(APP_DIR).join("notes.db"))
    }

    /// Media directory, defaulting to a `media` directory beside `database`
    pub fn media_dir(&self, database: &Path) -> PathBuf {
        if !self.storage.media_dir.is_empty() {
            return PathBuf::from(&self.storage.media_dir);
        }
        database
            .parent()
            .map(|p| p.join("media"))
            .unwrap_or_else(|| PathBuf::from("media"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_no_file_when_creating_default_then_creates_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("blocknotes.toml");

        let config = Config::create_default(&config_path).unwrap();

        assert_eq!(config.media.max_image_dimension, 1024);
        assert_eq!(config.media.jpeg_quality, 80);
        assert_eq!(config.media.default_audio_title, "Audio Recording");
        assert!(config_path.exists());
    }

    #[test]
    fn given_config_when_saving_then_writes_toml_sections() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/test.toml");

        Config::default().save(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[storage]"));
        assert!(content.contains("[media]"));
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(
            &config_path,
            r#"
[storage]
database = "/tmp/notes.db"

[media]
jpeg_quality = 60
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.storage.database, "/tmp/notes.db");
        assert_eq!(config.media.jpeg_quality, 60);
        assert_eq!(config.media.max_image_dimension, 1024);
        assert!(!config.media.embed_audio);
    }

    #[test]
    fn given_missing_file_when_loading_or_default_then_returns_defaults() {
        let config = Config::load_or_default("/nonexistent/blocknotes.toml").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn given_nonexistent_file_when_loading_then_returns_error() {
        assert!(Config::load("/nonexistent/path/config.toml").is_err());
    }

    #[test]
    fn given_explicit_paths_when_resolving_then_uses_them() {
        let config = Config {
            storage: StorageConfig {
                database: "/data/n.db".to_string(),
                media_dir: "/data/m".to_string(),
            },
            ..Default::default()
        };

        let database = config.database_path().unwrap();

        assert_eq!(database, PathBuf::from("/data/n.db"));
        assert_eq!(config.media_dir(&database), PathBuf::from("/data/m"));
    }

    #[test]
    fn given_default_media_dir_when_resolving_then_sits_beside_database() {
        let config = Config::default();

        assert_eq!(
            config.media_dir(Path::new("/data/notes.db")),
            PathBuf::from("/data/media")
        );
    }
}
