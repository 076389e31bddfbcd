//! Emergency call wire models.
//!
//! A [`Call`] is created by the public bedside page (`POST /calls`)
//! and read back by the nurse-side observer
//! (`GET /calls/nurse/{nurseId}`). The backend assigns the id and
//! owns the lifecycle; on this side a call is an immutable snapshot.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Title used for every emergency-call alert, across all channels.
pub const ALERT_TITLE: &str = "Llamado de emergencia";

/// Placeholder when the originating bed has no patient snapshot.
pub const FALLBACK_PATIENT: &str = "Paciente";

/// Placeholder when the bed number cannot be resolved.
pub const FALLBACK_BED: &str = "N/A";

/// Call that has not been acknowledged or expired yet.
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// Call a nurse has acknowledged.
pub const STATUS_ACKNOWLEDGED: &str = "ACKNOWLEDGED";

/// Call that aged out server-side without acknowledgement.
pub const STATUS_EXPIRED: &str = "EXPIRED";

// ---------------------------------------------------------------------------
// Call
// ---------------------------------------------------------------------------

/// One emergency request, as returned by the backend.
///
/// Every field except `id` is optional on the wire: the bed or
/// patient snapshot may be missing when the originating bed is
/// unoccupied or has been deleted since the call was raised. Alert
/// rendering falls back to placeholders instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// Backend-assigned identifier; the de-duplication key.
    pub id: DbId,

    /// `ACTIVE`, `ACKNOWLEDGED` or `EXPIRED`.
    #[serde(default)]
    pub status: Option<String>,

    /// Snapshot of the originating bed.
    #[serde(default)]
    pub bed: Option<BedSnapshot>,

    /// Snapshot of the patient occupying the bed, if any.
    #[serde(default)]
    pub patient: Option<PatientSnapshot>,

    /// When the backend created the call (backend-local time).
    #[serde(default)]
    pub created_at: Option<chrono::NaiveDateTime>,

    /// When the call expires server-side.
    #[serde(default)]
    pub expires_at: Option<chrono::NaiveDateTime>,
}

/// Bed reference embedded in a [`Call`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BedSnapshot {
    pub id: Option<DbId>,
    pub bed_number: Option<String>,
}

/// Patient reference embedded in a [`Call`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientSnapshot {
    pub full_name: Option<String>,
}

impl Call {
    /// Display name of the calling patient, or [`FALLBACK_PATIENT`].
    pub fn patient_name(&self) -> &str {
        self.patient
            .as_ref()
            .and_then(|p| p.full_name.as_deref())
            .unwrap_or(FALLBACK_PATIENT)
    }

    /// Human-readable bed label: the bed number when present, the
    /// bed id as a fallback, [`FALLBACK_BED`] when neither exists.
    pub fn bed_label(&self) -> String {
        match &self.bed {
            Some(bed) => match (&bed.bed_number, bed.id) {
                (Some(number), _) => number.clone(),
                (None, Some(id)) => id.to_string(),
                (None, None) => FALLBACK_BED.to_string(),
            },
            None => FALLBACK_BED.to_string(),
        }
    }

    /// Body text shared by the notification, toast and push channels.
    pub fn alert_body(&self) -> String {
        format!(
            "{} en cama {} está llamando.",
            self.patient_name(),
            self.bed_label()
        )
    }
}

// ---------------------------------------------------------------------------
// CallReceipt
// ---------------------------------------------------------------------------

/// Response body of `POST /calls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallReceipt {
    pub id: DbId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
