// src/application/media_request.rs
use std::path::PathBuf;

use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied { can_ask_again: bool },
}

/// Read access to media of one kind.
pub trait PermissionGate {
    fn check(&self, kind: MediaKind) -> PermissionStatus;

    /// Ask for access; returns the status after the user answered.
    fn request(&mut self, kind: MediaKind) -> PermissionStatus;
}

/// Chooser for a single media item. `None` means the user backed out.
pub trait MediaPicker {
    fn pick(&mut self, kind: MediaKind) -> Option<PathBuf>;
}

/// What to tell the user after access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialAdvice {
    /// Explain why access is needed and offer to ask again.
    RetryWithRationale,
    /// Asking again is pointless; access must be granted in system settings.
    OpenSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PathBuf),
    Cancelled,
    Denied(DenialAdvice),
}

/// Run the permission check, then the picker, for one media request.
///
/// The kind being requested travels with the call; nothing about a pending
/// request is stored between calls.
pub fn request_media(
    kind: MediaKind,
    gate: &mut impl PermissionGate,
    picker: &mut impl MediaPicker,
) -> PickOutcome {
    let status = match gate.check(kind) {
        PermissionStatus::Granted => PermissionStatus::Granted,
        PermissionStatus::Denied { .. } => {
            debug!(?kind, "Media access not granted yet, requesting");
            gate.request(kind)
        }
    };

    match status {
        PermissionStatus::Granted => match picker.pick(kind) {
            Some(path) => {
                info!(?kind, ?path, "Media picked");
                PickOutcome::Picked(path)
            }
            None => {
                debug!(?kind, "Media pick cancelled");
                PickOutcome::Cancelled
            }
        },
        PermissionStatus::Denied { can_ask_again: true } => {
            PickOutcome::Denied(DenialAdvice::RetryWithRationale)
        }
        PermissionStatus::Denied {
            can_ask_again: false,
        } => PickOutcome::Denied(DenialAdvice::OpenSettings),
    }
}
