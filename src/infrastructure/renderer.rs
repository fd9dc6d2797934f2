// src/infrastructure/renderer.rs
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::{debug, instrument};

use crate::constants::BROWSER_LAUNCH_DELAY_MS;

/// Writes rendered notes to a temporary directory and opens them.
#[derive(Debug)]
pub struct ContentRenderer {
    temp_dir: TempDir,
}

impl ContentRenderer {
    pub fn new() -> Result<Self> {
        let temp_dir = Builder::new()
            .prefix("blocknotes-")
            .rand_bytes(5)
            .tempdir()
            .context("Failed to create temporary directory")?;
        Ok(Self { temp_dir })
    }

    /// Directory holding rendered files; removed when the renderer is dropped.
    pub fn scratch_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn create_temp_file(&self, content: &str) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join("note.html");

        File::create(&file_path)
            .with_context(|| format!("Failed to create temp file at {}", file_path.display()))?
            .write_all(content.as_bytes())
            .context("Failed to write content to temporary file")?;

        debug!(?file_path, "Wrote rendered note");
        Ok(file_path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn open_in_browser(&self, path: &Path) -> Result<()> {
        let path_str = path.to_str().context("Failed to convert path to string")?;

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", path_str])
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }

        // The browser reads the file after we return; keep the directory alive briefly.
        std::thread::sleep(std::time::Duration::from_millis(BROWSER_LAUNCH_DELAY_MS));

        Ok(())
    }
}
