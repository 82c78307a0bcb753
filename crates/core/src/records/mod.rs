//! Domain records owned by the portal store.
//!
//! Every enumeration exposes an explicit label table; wire codes are SCREAMING_SNAKE_CASE.

pub mod alert;
pub mod meeting;
pub mod patient;
pub mod pharmacy;
pub mod schedule;
pub mod user;

pub use alert::{AlertStatus, EmergencyAlert, EmergencyReport};
pub use meeting::{MedicalBoardMeeting, MeetingRequest};
pub use patient::{
    AdmissionStatus, HistoryItem, HistoryRequest, Inpatient, MedicalRecord, VisitType,
};
pub use pharmacy::{PharmacyItem, Prescription, PrescriptionStatus};
pub use schedule::{BookingRequest, ScheduleCategory, ScheduleItem};
pub use user::{Registration, User, UserRole, UserUpdate};
