//! Web-push subscription wire model.
//!
//! The backend stores one subscription per nurse device and uses it
//! for out-of-band delivery while the station is backgrounded. The
//! shape matches `POST /push/subscribe/{nurseId}`.

use serde::{Deserialize, Serialize};

/// A push delivery endpoint plus its encryption keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// Client key material the push service encrypts payloads against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}
