//! Platform notification/audio capability.
//!
//! [`Notifier`] abstracts the ambient platform surface (system
//! notifications, audio output) behind an injectable trait so the
//! dispatcher and gate never touch globals directly, and tests can
//! substitute a recording fake.

use crate::tone::{self, ToneSpec};

/// Observed notification permission, mirroring the tri-state the
/// platform exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The platform has no notification surface at all.
    Unsupported,
}

/// Errors from a notifier channel. Callers log these; they never
/// cross a channel boundary.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification error: {0}")]
    Notification(String),

    #[error("audio error: {0}")]
    Audio(String),
}

/// Capability interface over the platform alert surface.
pub trait Notifier: Send + Sync {
    /// Current permission state, without prompting.
    fn permission(&self) -> PermissionStatus;

    /// Ask the platform for notification permission. Idempotent:
    /// a no-op returning the existing state once decided.
    fn request_permission(&self) -> Result<PermissionStatus, NotifyError>;

    /// Show a system notification.
    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError>;

    /// Synthesize and play a tone, blocking until done.
    fn play_tone(&self, spec: &ToneSpec) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// DesktopNotifier
// ---------------------------------------------------------------------------

/// Real platform notifier: notify-rust for system notifications,
/// cpal for tone playback. Desktop notification daemons do not gate
/// delivery behind a runtime permission prompt, so permission is
/// always observed as granted.
#[derive(Debug, Default, Clone)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
        Ok(PermissionStatus::Granted)
    }

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .appname("wardcall")
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Notification(e.to_string()))
    }

    fn play_tone(&self, spec: &ToneSpec) -> Result<(), NotifyError> {
        tone::play(spec).map_err(|e| NotifyError::Audio(e.to_string()))
    }
}
