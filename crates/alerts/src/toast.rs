//! In-app toast channel.
//!
//! [`ToastSender`] hands toasts to whatever rendering layer drains
//! the receiving end (the station binary logs them; a UI would paint
//! them). The channel is bounded and non-blocking: a full or closed
//! channel is an error the caller logs, never a stall in the alert
//! path.

use std::time::Duration;

use tokio::sync::mpsc;

/// Auto-dismiss delay for emergency alerts: long enough to be seen
/// even with the audio channel locked.
pub const ALERT_DISMISS: Duration = Duration::from_secs(10);

/// Auto-dismiss delay for ordinary notices.
pub const NOTICE_DISMISS: Duration = Duration::from_secs(5);

/// Default channel capacity.
const DEFAULT_CAPACITY: usize = 64;

/// One toast to render.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: Option<String>,
    pub body: String,
    /// How long the rendering layer should keep it visible.
    pub dismiss_after: Duration,
}

impl Toast {
    /// Emergency alert toast with the extended dismiss delay.
    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
            dismiss_after: ALERT_DISMISS,
        }
    }

    /// Ordinary notice (confirmations, countdowns, failures).
    pub fn notice(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            dismiss_after: NOTICE_DISMISS,
        }
    }
}

/// Error type for toast delivery.
#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    #[error("toast channel closed or full")]
    ChannelClosed,
}

/// Sending half of the toast channel.
#[derive(Clone)]
pub struct ToastSender {
    tx: mpsc::Sender<Toast>,
}

impl ToastSender {
    /// Queue a toast for rendering. Logging is the renderer's job;
    /// the sending side stays quiet so a toast shows up in the logs
    /// exactly once.
    pub fn send(&self, toast: Toast) -> Result<(), ToastError> {
        self.tx.try_send(toast).map_err(|_| ToastError::ChannelClosed)
    }
}

/// Create a toast channel pair with the default capacity.
pub fn channel() -> (ToastSender, mpsc::Receiver<Toast>) {
    let (tx, rx) = mpsc::channel(DEFAULT_CAPACITY);
    (ToastSender { tx }, rx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_toast_uses_extended_dismiss() {
        let toast = Toast::alert("Llamado de emergencia", "cuerpo");
        assert_eq!(toast.dismiss_after, ALERT_DISMISS);
    }

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (sender, mut rx) = channel();
        sender.send(Toast::notice("hola")).unwrap();

        let received = rx.recv().await.expect("toast should arrive");
        assert_eq!(received.body, "hola");
        assert_eq!(received.dismiss_after, NOTICE_DISMISS);
    }

    #[tokio::test]
    async fn send_fails_once_receiver_is_dropped() {
        let (sender, rx) = channel();
        drop(rx);
        assert!(sender.send(Toast::notice("perdido")).is_err());
    }
}
