//! Emergency alerts raised by patients or staff.

use crate::records::MedicalRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of an emergency alert. Only `Active` alerts can move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    Active,
    /// Closed without admission.
    Resolved,
    /// Closed by admitting the patient to the roster.
    Admitted,
}

impl AlertStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Resolved => "RESOLVED",
            Self::Admitted => "ADMITTED",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Details captured when an emergency is reported, before the store assigns identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyReport {
    pub patient_name: String,
    /// Roster identifier, or `GUEST` for someone not yet known.
    pub patient_id: String,
    pub age: String,
    pub sex: String,
    pub incident_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub id: String,
    pub patient_name: String,
    pub patient_id: String,
    pub age: String,
    pub sex: String,
    pub incident_type: String,
    pub status: AlertStatus,
    pub timestamp: DateTime<Utc>,
    pub medical_summary: MedicalRecord,
}
