//! Inpatient census records and the medical summary attached to them.

use crate::constants::{NONE_RECORDED, UNKNOWN_BLOOD_TYPE};
use crate::records::Prescription;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admission state of an inpatient.
///
/// Ordered by the normal flow of a stay: en route, admitted, discharged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionStatus {
    /// Patient is on the way to the hospital.
    EnRoute,
    /// Patient occupies a ward bed.
    Admitted,
    /// Patient has left the ward.
    Discharged,
}

impl AdmissionStatus {
    pub const ALL: [AdmissionStatus; 3] = [Self::EnRoute, Self::Admitted, Self::Discharged];

    /// Display label, also used for free-text search.
    pub fn label(self) -> &'static str {
        match self {
            Self::EnRoute => "EN ROUTE",
            Self::Admitted => "ADMITTED",
            Self::Discharged => "DISCHARGED",
        }
    }

    /// Whether the patient still counts towards the active census.
    pub fn is_in_census(self) -> bool {
        !matches!(self, Self::Discharged)
    }
}

/// A single inpatient on the hospital roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inpatient {
    pub id: String,
    pub patient_name: String,
    pub status: AdmissionStatus,
    pub ward: String,
    /// Raw admission timestamp as supplied; see [`Inpatient::admitted_at`].
    pub admission_date: String,
    #[serde(default)]
    pub medical_summary: MedicalRecord,
}

impl Inpatient {
    /// Parses the admission timestamp.
    ///
    /// Accepts RFC 3339 instants, naive `YYYY-MM-DDTHH:MM[:SS]` values and bare dates; naive
    /// forms are read as UTC. Returns `None` for anything else.
    pub fn admitted_at(&self) -> Option<DateTime<Utc>> {
        parse_admission_date(&self.admission_date)
    }
}

fn parse_admission_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Kind of visit recorded in a patient's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitType {
    Consultation,
    Procedure,
    Vaccination,
    Surgery,
    Emergency,
    #[serde(rename = "Lab Test")]
    LabTest,
    Other,
}

impl VisitType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Consultation => "Consultation",
            Self::Procedure => "Procedure",
            Self::Vaccination => "Vaccination",
            Self::Surgery => "Surgery",
            Self::Emergency => "Emergency",
            Self::LabTest => "Lab Test",
            Self::Other => "Other",
        }
    }
}

/// One entry in a patient's medical history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub event: String,
    /// Calendar date of the event.
    pub date: NaiveDate,
    pub visit_type: VisitType,
    #[serde(default)]
    pub details: String,
}

/// A history entry as entered by the patient, before it is assigned an identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub event: String,
    pub date: NaiveDate,
    pub visit_type: VisitType,
    #[serde(default)]
    pub details: String,
}

/// Medical summary carried by patients and emergency alerts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub blood_type: String,
    pub allergies: String,
    pub conditions: String,
    pub medications: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub medical_history: Vec<HistoryItem>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

impl Default for MedicalRecord {
    fn default() -> Self {
        Self {
            blood_type: UNKNOWN_BLOOD_TYPE.into(),
            allergies: NONE_RECORDED.into(),
            conditions: NONE_RECORDED.into(),
            medications: NONE_RECORDED.into(),
            last_updated: Utc::now(),
            medical_history: Vec::new(),
            prescriptions: Vec::new(),
        }
    }
}

impl MedicalRecord {
    /// Adds a history entry ahead of the existing ones (newest first).
    pub fn add_history(&mut self, item: HistoryItem) {
        self.medical_history.insert(0, item);
        self.last_updated = Utc::now();
    }

    /// Removes the history entry with `id`. Returns whether anything was removed.
    pub fn remove_history(&mut self, id: &str) -> bool {
        let before = self.medical_history.len();
        self.medical_history.retain(|item| item.id != id);
        let removed = self.medical_history.len() != before;
        if removed {
            self.last_updated = Utc::now();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn inpatient(admission_date: &str) -> Inpatient {
        Inpatient {
            id: "P-1".into(),
            patient_name: "Ann".into(),
            status: AdmissionStatus::Admitted,
            ward: "ICU".into(),
            admission_date: admission_date.into(),
            medical_summary: MedicalRecord::default(),
        }
    }

    #[test]
    fn parses_bare_date_as_utc_midnight() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single();
        assert_eq!(inpatient("2024-01-02").admitted_at(), expected);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).single();
        assert_eq!(
            inpatient("2024-03-01T10:30:00+02:00").admitted_at(),
            expected
        );
    }

    #[test]
    fn parses_naive_datetime() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).single();
        assert_eq!(inpatient("2024-03-01T10:30").admitted_at(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(inpatient("yesterday").admitted_at(), None);
        assert_eq!(inpatient("").admitted_at(), None);
    }

    #[test]
    fn status_wire_codes_are_screaming_snake_case() {
        let json = serde_json::to_string(&AdmissionStatus::EnRoute).expect("serialize");
        assert_eq!(json, "\"EN_ROUTE\"");
    }

    #[test]
    fn lab_test_label_matches_wire_name() {
        let json = serde_json::to_string(&VisitType::LabTest).expect("serialize");
        assert_eq!(json, format!("\"{}\"", VisitType::LabTest.label()));
        assert_eq!(VisitType::Vaccination.label(), "Vaccination");
    }

    #[test]
    fn history_is_newest_first_and_removable() {
        let mut record = MedicalRecord::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        for id in ["h1", "h2"] {
            record.add_history(HistoryItem {
                id: id.into(),
                event: "Checkup".into(),
                date,
                visit_type: VisitType::Consultation,
                details: String::new(),
            });
        }
        assert_eq!(record.medical_history[0].id, "h2");
        assert!(record.remove_history("h1"));
        assert!(!record.remove_history("h1"));
        assert_eq!(record.medical_history.len(), 1);
    }
}
