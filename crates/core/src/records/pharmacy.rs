//! Pharmacy stock and prescriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub available: bool,
    pub last_restocked: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrescriptionStatus {
    Ordered,
    Approved,
    ReadyForPickup,
}

impl PrescriptionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ordered => "ORDERED",
            Self::Approved => "APPROVED",
            Self::ReadyForPickup => "READY FOR PICKUP",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub medication: String,
    pub dosage: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub prescribed_by: String,
    pub status: PrescriptionStatus,
}
