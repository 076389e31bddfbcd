//! One-shot alert unlock gate.
//!
//! Mobile platforms refuse audio playback and notification prompts
//! that were not preceded by a user gesture. [`AlertGate::enable`] is
//! that gesture's handler: it requests notification permission and
//! plays a near-silent tone to activate the audio subsystem.
//! `Unlocked` is terminal for the session; the flag resets only with
//! a restart because it tracks the gesture, not persisted state.

use crate::notify::Notifier;
use crate::tone::UNLOCK_TONE;

/// Gate state surfaced to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

/// Unlock failure, surfaced so the gate stays actionable for retry.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("no se pudo activar el audio: {0}")]
    Audio(String),
}

/// Session-scoped audio/notification unlock state machine.
#[derive(Debug)]
pub struct AlertGate {
    state: GateState,
}

impl AlertGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Locked,
        }
    }

    /// Whether the audio channel has been activated this session.
    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Handle the explicit enable gesture.
    ///
    /// Idempotent: once unlocked, further invocations return
    /// immediately without another permission prompt. A permission
    /// failure is logged but non-fatal (the toast channel covers a
    /// denied notification surface); an audio failure leaves the
    /// gate locked and is surfaced for retry.
    pub fn enable(&mut self, notifier: &dyn Notifier) -> Result<(), GateError> {
        if self.is_unlocked() {
            return Ok(());
        }

        match notifier.request_permission() {
            Ok(status) => tracing::info!(?status, "Notification permission resolved"),
            Err(e) => tracing::warn!(error = %e, "Notification permission request failed"),
        }

        notifier
            .play_tone(&UNLOCK_TONE)
            .map_err(|e| GateError::Audio(e.to_string()))?;

        self.state = GateState::Unlocked;
        tracing::info!("Alert audio unlocked for this session");
        Ok(())
    }
}

impl Default for AlertGate {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use assert_matches::assert_matches;

    use crate::notify::{NotifyError, PermissionStatus};
    use crate::tone::ToneSpec;

    use super::*;

    #[derive(Default)]
    struct FakeNotifier {
        permission_requests: AtomicUsize,
        fail_permission: AtomicBool,
        fail_audio: AtomicBool,
        tones_played: AtomicUsize,
    }

    impl Notifier for FakeNotifier {
        fn permission(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }

        fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
            self.permission_requests.fetch_add(1, Ordering::SeqCst);
            if self.fail_permission.load(Ordering::SeqCst) {
                return Err(NotifyError::Notification("prompt failed".into()));
            }
            Ok(PermissionStatus::Granted)
        }

        fn show(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
            Ok(())
        }

        fn play_tone(&self, _spec: &ToneSpec) -> Result<(), NotifyError> {
            if self.fail_audio.load(Ordering::SeqCst) {
                return Err(NotifyError::Audio("context locked".into()));
            }
            self.tones_played.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn enable_unlocks_on_success() {
        let notifier = FakeNotifier::default();
        let mut gate = AlertGate::new();

        gate.enable(&notifier).expect("enable should succeed");
        assert!(gate.is_unlocked());
        assert_eq!(notifier.tones_played.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn enable_twice_is_idempotent() {
        let notifier = FakeNotifier::default();
        let mut gate = AlertGate::new();

        gate.enable(&notifier).unwrap();
        gate.enable(&notifier).unwrap();

        // Second invocation must not prompt or play again.
        assert_eq!(notifier.permission_requests.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.tones_played.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn audio_failure_keeps_gate_locked_and_retryable() {
        let notifier = FakeNotifier::default();
        notifier.fail_audio.store(true, Ordering::SeqCst);
        let mut gate = AlertGate::new();

        let err = gate.enable(&notifier).unwrap_err();
        assert_matches!(err, GateError::Audio(_));
        assert!(!gate.is_unlocked());

        // Retry after the audio subsystem recovers.
        notifier.fail_audio.store(false, Ordering::SeqCst);
        gate.enable(&notifier).unwrap();
        assert!(gate.is_unlocked());
    }

    #[test]
    fn permission_failure_is_not_fatal() {
        let notifier = FakeNotifier::default();
        notifier.fail_permission.store(true, Ordering::SeqCst);
        let mut gate = AlertGate::new();

        gate.enable(&notifier).expect("audio unlock should still pass");
        assert!(gate.is_unlocked());
    }
}
