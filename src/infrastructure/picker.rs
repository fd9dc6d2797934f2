// src/infrastructure/picker.rs
//
// Command-line stand-ins for the system media chooser and its access check:
// the "picked" item is a path given on the command line.
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::application::media_request::{MediaKind, MediaPicker, PermissionGate, PermissionStatus};

/// Grants access when the file can be opened for reading.
///
/// A file the OS refuses to open will not become readable by asking again,
/// so denials always point the user at fixing permissions.
#[derive(Debug, Clone)]
pub struct FileAccessGate {
    path: PathBuf,
}

impl FileAccessGate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PermissionGate for FileAccessGate {
    fn check(&self, kind: MediaKind) -> PermissionStatus {
        match File::open(&self.path) {
            Ok(_) => PermissionStatus::Granted,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                debug!(?kind, path = ?self.path, "Read access denied");
                PermissionStatus::Denied {
                    can_ask_again: false,
                }
            }
            // Missing files are the picker's concern.
            Err(_) => PermissionStatus::Granted,
        }
    }

    fn request(&mut self, kind: MediaKind) -> PermissionStatus {
        self.check(kind)
    }
}

/// Picks the path it was given, if that path names an existing file.
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: Option<PathBuf>,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl MediaPicker for PathPicker {
    fn pick(&mut self, kind: MediaKind) -> Option<PathBuf> {
        let path = self.path.take()?;
        if path.is_file() {
            Some(path)
        } else {
            debug!(?kind, ?path, "No file to pick");
            None
        }
    }
}
