//! Public bedside (QR) page data loading.
//!
//! The page is opened by scanning a bed's QR code, often by visitors
//! on ward Wi-Fi, so failures keep the attempted backend URL around:
//! it is the one diagnostic field staff can read off the screen when
//! reporting a connectivity problem.

use wardcall_client::{ApiClient, ApiError};
use wardcall_core::QrCodeData;

/// Everything the public page renders, plus the resolved backend URL
/// shown in the page footer.
#[derive(Debug)]
pub struct BedsideView {
    pub api_url: String,
    pub data: QrCodeData,
}

/// Page-level load failure with the backend URL as diagnostic.
#[derive(Debug, thiserror::Error)]
#[error("No se pudo cargar la información del QR (API: {api_url}): {source}")]
pub struct BedsideError {
    pub api_url: String,
    #[source]
    pub source: ApiError,
}

/// Fetch the bed/patient/nurse snapshot behind a QR token. The
/// underlying request enforces the 10 s public-page timeout; expiry
/// surfaces here as a load failure like any other.
pub async fn load(client: &ApiClient, qr_token: &str) -> Result<BedsideView, BedsideError> {
    match client.qr_data(qr_token).await {
        Ok(data) => {
            tracing::debug!(bed_id = data.bed_id, "QR data loaded");
            Ok(BedsideView {
                api_url: client.base_url().to_string(),
                data,
            })
        }
        Err(e) => {
            tracing::error!(
                api_url = client.base_url(),
                qr_token,
                timeout = e.is_timeout(),
                error = %e,
                "QR data load failed"
            );
            Err(BedsideError {
                api_url: client.base_url().to_string(),
                source: e,
            })
        }
    }
}
