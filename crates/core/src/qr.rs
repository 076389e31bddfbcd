//! QR-resolved bedside data.
//!
//! `GET /qr/data/{token}` returns everything the public bedside page
//! shows: bed location, the occupying patient's record snapshot and
//! the nurse in charge. The token itself is a durable opaque string
//! minted by the backend per bed.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Bed/patient/nurse snapshot behind one QR token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeData {
    /// Bed id used by the emergency-call button.
    pub bed_id: DbId,
    #[serde(default)]
    pub bed_number: Option<String>,
    #[serde(default)]
    pub island_name: Option<String>,
    #[serde(default)]
    pub patient_info: Option<PatientInfo>,
    #[serde(default)]
    pub nurse_info: Option<NurseInfo>,
}

/// Patient record fields shown on the public page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfo {
    pub full_name: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medical_record_number: Option<String>,
}

/// Nurse-in-charge fields shown on the public page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NurseInfo {
    pub full_name: Option<String>,
    pub license_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_occupied_bed() {
        let json = serde_json::json!({
            "bedId": 4,
            "bedNumber": "A-12",
            "islandName": "Isla Norte",
            "patientInfo": {
                "fullName": "María Gómez",
                "diagnosis": "Neumonía",
                "medicalRecordNumber": "HC-1092"
            },
            "nurseInfo": { "fullName": "Carlos Ruiz", "licenseNumber": "ENF-77" }
        });

        let data: QrCodeData = serde_json::from_value(json).unwrap();
        assert_eq!(data.bed_id, 4);
        assert_eq!(data.island_name.as_deref(), Some("Isla Norte"));
        let patient = data.patient_info.unwrap();
        assert_eq!(patient.full_name.as_deref(), Some("María Gómez"));
        assert!(patient.treatment.is_none());
    }

    #[test]
    fn deserializes_empty_bed() {
        let data: QrCodeData = serde_json::from_value(serde_json::json!({ "bedId": 9 })).unwrap();
        assert!(data.patient_info.is_none());
        assert!(data.nurse_info.is_none());
    }
}
