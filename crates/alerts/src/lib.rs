//! Multi-channel alerting for emergency calls.
//!
//! Building blocks for turning a newly-observed [`Call`] into
//! something a nurse actually notices:
//!
//! - [`Notifier`] — capability trait over the platform's
//!   notification/audio surface, with [`DesktopNotifier`] as the
//!   real implementation (notify-rust + cpal).
//! - [`AlertDispatcher`] — fire-and-forget fan-out to the native
//!   notification, in-app toast and audio channels; channels are
//!   independent and their failures are logged, never propagated.
//! - [`AlertGate`] — one-shot unlock state machine for the audio
//!   channel (mobile platforms refuse unsolicited playback).
//! - [`toast`] — bounded in-app toast channel.
//! - [`push`] — optional out-of-band push channel: payload parsing
//!   with fallbacks plus the subscription round-trip.
//!
//! [`Call`]: wardcall_core::Call

pub mod dispatch;
pub mod gate;
pub mod notify;
pub mod push;
pub mod toast;
pub mod tone;

pub use dispatch::AlertDispatcher;
pub use gate::{AlertGate, GateError};
pub use notify::{DesktopNotifier, Notifier, NotifyError, PermissionStatus};
pub use toast::{Toast, ToastSender};
pub use tone::{ToneSpec, ALERT_TONE, UNLOCK_TONE};
