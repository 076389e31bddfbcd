//! REST client for the hospital backend.
//!
//! One method per consumed resource. Authenticated endpoints attach
//! the session bearer token when one was provided; the public
//! endpoints (call creation, QR data) work without it.

use std::time::Duration;

use serde::Deserialize;
use wardcall_core::types::DbId;
use wardcall_core::{Call, CallReceipt, PushSubscription, QrCodeData};

use crate::error::{ApiError, GENERIC_BACKEND_ERROR};

/// Default timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tighter timeout for the public QR data fetch. The bedside page is
/// used by visitors on flaky ward Wi-Fi; waiting on transport
/// defaults there means a blank page with no diagnostic.
const QR_DATA_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Gateway to the hospital backend REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client against a base URL, e.g. `http://host:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the nurse session's bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL this client targets. Surfaced in public-page error
    /// states as a field diagnostic.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    // -- call queue ---------------------------------------------------------

    /// Outstanding calls addressed to a nurse: a full snapshot, not a
    /// delta. `GET /calls/nurse/{nurseId}`.
    pub async fn active_calls_for_nurse(&self, nurse_id: DbId) -> Result<Vec<Call>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/calls/nurse/{nurse_id}"))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create an emergency call for a bed. `POST /calls`.
    ///
    /// Public endpoint; the backend resolves the nurse in charge and
    /// enforces its own abuse throttling independently of the
    /// client-side cooldown.
    pub async fn create_call(&self, bed_id: DbId) -> Result<CallReceipt, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/calls")
            .json(&serde_json::json!({ "bedId": bed_id }))
            .send()
            .await?;
        let receipt: CallReceipt = check(response).await?.json().await?;
        tracing::debug!(call_id = receipt.id, bed_id, "Call created");
        Ok(receipt)
    }

    /// Mark a call as acknowledged. `POST /calls/{id}/ack`.
    pub async fn acknowledge_call(&self, call_id: DbId) -> Result<Call, ApiError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/calls/{call_id}/ack"))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    // -- QR resources -------------------------------------------------------

    /// Resolve the bed/patient/nurse snapshot behind a QR token.
    /// `GET /qr/data/{token}`, with an explicit 10 s timeout.
    pub async fn qr_data(&self, qr_token: &str) -> Result<QrCodeData, ApiError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/qr/data/{qr_token}"))
            .timeout(QR_DATA_TIMEOUT)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Resolve (or lazily mint) the durable QR token for a bed.
    /// `GET /qr/token/bed/{bedId}`.
    pub async fn bed_token(&self, bed_id: DbId) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct TokenBody {
            token: String,
        }

        let response = self
            .request(reqwest::Method::GET, &format!("/qr/token/bed/{bed_id}"))
            .send()
            .await?;
        let body: TokenBody = check(response).await?.json().await?;
        Ok(body.token)
    }

    // -- push negotiation ---------------------------------------------------

    /// Server VAPID public key for push subscriptions.
    /// `GET /push/vapidPublicKey`.
    pub async fn vapid_public_key(&self) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct KeyBody {
            public_key: String,
        }

        let response = self
            .request(reqwest::Method::GET, "/push/vapidPublicKey")
            .send()
            .await?;
        let body: KeyBody = check(response).await?.json().await?;
        Ok(body.public_key)
    }

    /// Register a push subscription under a nurse's identity.
    /// `POST /push/subscribe/{nurseId}`.
    pub async fn subscribe_push(
        &self,
        nurse_id: DbId,
        subscription: &PushSubscription,
    ) -> Result<DbId, ApiError> {
        #[derive(Deserialize)]
        struct IdBody {
            id: DbId,
        }

        let response = self
            .request(reqwest::Method::POST, &format!("/push/subscribe/{nurse_id}"))
            .json(&serde_json::json!({ "subscription": subscription }))
            .send()
            .await?;
        let body: IdBody = check(response).await?.json().await?;
        tracing::info!(nurse_id, subscription_id = body.id, "Push subscription registered");
        Ok(body.id)
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Pass through successful responses, turn everything else into an
/// [`ApiError::Status`] carrying the backend's message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &body))
}

/// Decode a backend error body, which is either a plain string or a
/// `{message}` JSON object depending on the controller.
fn status_error(status: u16, body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => GENERIC_BACKEND_ERROR.to_string(),
    };

    ApiError::Status { status, message }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
