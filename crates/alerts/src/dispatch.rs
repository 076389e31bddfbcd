//! Alert fan-out for newly-observed calls.
//!
//! [`AlertDispatcher::dispatch`] renders one call across every
//! channel. Channels are strictly independent: a throwing
//! notification daemon, a full toast channel or a locked audio
//! subsystem each lose only their own channel. Nothing here returns
//! an error to the caller; the observer treats dispatch as
//! fire-and-forget.

use std::sync::Arc;

use wardcall_core::call::ALERT_TITLE;
use wardcall_core::Call;

use crate::notify::{Notifier, PermissionStatus};
use crate::toast::{Toast, ToastSender};
use crate::tone::ALERT_TONE;

/// Fan-out point for emergency call alerts.
pub struct AlertDispatcher {
    notifier: Arc<dyn Notifier>,
    toasts: ToastSender,
}

impl AlertDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, toasts: ToastSender) -> Self {
        Self { notifier, toasts }
    }

    /// Render one call across all channels, best effort.
    pub fn dispatch(&self, call: &Call) {
        let body = call.alert_body();
        tracing::info!(call_id = call.id, body = %body, "Dispatching emergency call alert");

        // Native notification channel, only while permission holds.
        if self.notifier.permission() == PermissionStatus::Granted {
            if let Err(e) = self.notifier.show(ALERT_TITLE, &body) {
                tracing::warn!(call_id = call.id, error = %e, "Native notification failed");
            }
        } else {
            tracing::debug!(call_id = call.id, "Notification permission not granted, skipping native channel");
        }

        // In-app toast channel, shown regardless of permission state.
        if let Err(e) = self.toasts.send(Toast::alert(ALERT_TITLE, &body)) {
            tracing::warn!(call_id = call.id, error = %e, "Toast delivery failed");
        }

        // Audio channel. Playback blocks for the tone duration, so it
        // runs on a detached thread; overlapping tones from rapid
        // successive calls are acceptable.
        let notifier = Arc::clone(&self.notifier);
        let call_id = call.id;
        std::thread::spawn(move || {
            if let Err(e) = notifier.play_tone(&ALERT_TONE) {
                tracing::debug!(call_id, error = %e, "Audio channel unavailable");
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::notify::NotifyError;
    use crate::tone::ToneSpec;
    use crate::toast;

    use super::*;

    /// Fake notifier recording channel activity.
    struct FakeNotifier {
        permission: PermissionStatus,
        fail_show: bool,
        shown: Mutex<Vec<(String, String)>>,
        tones: std::sync::mpsc::Sender<f32>,
    }

    impl FakeNotifier {
        fn new(permission: PermissionStatus, fail_show: bool) -> (Arc<Self>, std::sync::mpsc::Receiver<f32>) {
            let (tx, rx) = std::sync::mpsc::channel();
            let fake = Arc::new(Self {
                permission,
                fail_show,
                shown: Mutex::new(Vec::new()),
                tones: tx,
            });
            (fake, rx)
        }
    }

    impl Notifier for FakeNotifier {
        fn permission(&self) -> PermissionStatus {
            self.permission
        }

        fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
            Ok(self.permission)
        }

        fn show(&self, title: &str, body: &str) -> Result<(), NotifyError> {
            if self.fail_show {
                return Err(NotifyError::Notification("daemon unavailable".into()));
            }
            self.shown.lock().unwrap().push((title.into(), body.into()));
            Ok(())
        }

        fn play_tone(&self, spec: &ToneSpec) -> Result<(), NotifyError> {
            let _ = self.tones.send(spec.frequency_hz);
            Ok(())
        }
    }

    fn call_without_snapshots(id: i64) -> Call {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    #[tokio::test]
    async fn dispatch_hits_all_three_channels() {
        let (fake, tone_rx) = FakeNotifier::new(PermissionStatus::Granted, false);
        let (toast_tx, mut toast_rx) = toast::channel();
        let dispatcher = AlertDispatcher::new(fake.clone(), toast_tx);

        dispatcher.dispatch(&call_without_snapshots(1));

        let shown = fake.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, ALERT_TITLE);

        let toast = toast_rx.recv().await.expect("toast should arrive");
        assert_eq!(toast.body, "Paciente en cama N/A está llamando.");

        let freq = tone_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("tone should play");
        assert_eq!(freq, ALERT_TONE.frequency_hz);
    }

    #[tokio::test]
    async fn denied_permission_skips_native_channel_only() {
        let (fake, tone_rx) = FakeNotifier::new(PermissionStatus::Denied, false);
        let (toast_tx, mut toast_rx) = toast::channel();
        let dispatcher = AlertDispatcher::new(fake.clone(), toast_tx);

        dispatcher.dispatch(&call_without_snapshots(2));

        assert!(fake.shown.lock().unwrap().is_empty());
        assert!(toast_rx.recv().await.is_some());
        assert!(tone_rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn failing_notification_does_not_block_other_channels() {
        let (fake, tone_rx) = FakeNotifier::new(PermissionStatus::Granted, true);
        let (toast_tx, mut toast_rx) = toast::channel();
        let dispatcher = AlertDispatcher::new(fake, toast_tx);

        dispatcher.dispatch(&call_without_snapshots(3));

        assert!(toast_rx.recv().await.is_some());
        assert!(tone_rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn dropped_toast_receiver_does_not_panic_dispatch() {
        let (fake, _tone_rx) = FakeNotifier::new(PermissionStatus::Granted, false);
        let (toast_tx, toast_rx) = toast::channel();
        drop(toast_rx);
        let dispatcher = AlertDispatcher::new(fake, toast_tx);

        dispatcher.dispatch(&call_without_snapshots(4));
    }
}
