//! Optional out-of-band push channel.
//!
//! Two halves, both independent of the polling pipeline:
//!
//! - incoming: [`PushPayload::parse`] + [`handle_push`] implement the
//!   platform push-event contract (show a notification for the
//!   payload, with defaults when the payload is absent or mangled).
//! - outgoing: [`negotiate`] runs the subscription round-trip with
//!   the backend (VAPID key fetch, then registration under the
//!   nurse's identity).
//!
//! Deployments without push support simply never call into this
//! module; that is a normal condition, not an error.

use serde::Deserialize;
use wardcall_client::{ApiClient, ApiError};
use wardcall_core::types::DbId;
use wardcall_core::PushSubscription;

use crate::notify::Notifier;

/// Title used when the payload parsed but carried no title.
pub const DEFAULT_PUSH_TITLE: &str = "Hospital";

/// Title used when the payload could not be parsed at all.
pub const FALLBACK_PUSH_TITLE: &str = "Notificación";

/// A decoded push payload, always renderable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
}

impl PushPayload {
    /// Decode raw push bytes, falling back instead of failing:
    /// JSON without a title gets [`DEFAULT_PUSH_TITLE`]; non-JSON
    /// payloads become a [`FALLBACK_PUSH_TITLE`] notification with
    /// the raw text as body.
    pub fn parse(raw: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            title: Option<String>,
            #[serde(default)]
            body: Option<String>,
        }

        match serde_json::from_slice::<Wire>(raw) {
            Ok(wire) => Self {
                title: wire.title.unwrap_or_else(|| DEFAULT_PUSH_TITLE.to_string()),
                body: wire.body.unwrap_or_default(),
            },
            Err(_) => Self {
                title: FALLBACK_PUSH_TITLE.to_string(),
                body: String::from_utf8_lossy(raw).into_owned(),
            },
        }
    }
}

/// Handle one incoming push event: decode and show, logging (never
/// propagating) a notification failure.
pub fn handle_push(notifier: &dyn Notifier, raw: &[u8]) {
    let payload = PushPayload::parse(raw);
    if let Err(e) = notifier.show(&payload.title, &payload.body) {
        tracing::warn!(error = %e, title = %payload.title, "Push notification display failed");
    }
}

/// Negotiate a push subscription with the backend.
///
/// Fetches the server's VAPID public key (the subscription's
/// encryption anchor) and registers the device subscription under
/// the nurse's identity. Returns the backend-side subscription id.
pub async fn negotiate(
    client: &ApiClient,
    nurse_id: DbId,
    subscription: &PushSubscription,
) -> Result<DbId, ApiError> {
    let public_key = client.vapid_public_key().await?;
    tracing::debug!(nurse_id, key_len = public_key.len(), "Fetched VAPID public key");
    client.subscribe_push(nurse_id, subscription).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_payload() {
        let payload = PushPayload::parse(br#"{"title":"Llamado de emergencia","body":"Cama 4"}"#);
        assert_eq!(payload.title, "Llamado de emergencia");
        assert_eq!(payload.body, "Cama 4");
    }

    #[test]
    fn missing_title_gets_default() {
        let payload = PushPayload::parse(br#"{"body":"Cama 4"}"#);
        assert_eq!(payload.title, DEFAULT_PUSH_TITLE);
        assert_eq!(payload.body, "Cama 4");
    }

    #[test]
    fn unparseable_payload_falls_back_to_text() {
        let payload = PushPayload::parse(b"not json at all");
        assert_eq!(payload.title, FALLBACK_PUSH_TITLE);
        assert_eq!(payload.body, "not json at all");
    }

    #[test]
    fn empty_payload_is_still_renderable() {
        let payload = PushPayload::parse(b"");
        assert_eq!(payload.title, FALLBACK_PUSH_TITLE);
        assert_eq!(payload.body, "");
    }
}
