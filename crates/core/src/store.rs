//! In-memory record store.
//!
//! `PortalStore` owns the canonical lists behind every portal view and applies the mutations
//! raised by patients, clinicians and administrators. List views borrow slices from the store and
//! run them through the [`crate::query`] engine; the store never hands out mutable access to its
//! lists, so a query result can never observe a half-applied mutation.

use crate::constants::GUEST_PATIENT_ID;
use crate::error::{PortalError, PortalResult};
use crate::records::{
    AdmissionStatus, AlertStatus, BookingRequest, EmergencyAlert, EmergencyReport, HistoryItem,
    HistoryRequest, Inpatient, MedicalBoardMeeting, MedicalRecord, MeetingRequest, PharmacyItem,
    Prescription, PrescriptionStatus, Registration, ScheduleCategory, ScheduleItem, User,
    UserRole, UserUpdate,
};
use crate::workflow::{apply_admission_status, close_alert};
use crate::CoreConfig;
use chrono::Utc;
use portal_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Details for admitting a patient directly, without an emergency alert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRequest {
    pub name: String,
    pub status: AdmissionStatus,
    /// Defaults to the configured ward when absent or blank.
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    /// Caller-chosen identifier; generated when absent or blank.
    #[serde(default)]
    pub id: Option<String>,
}

impl AdmissionRequest {
    pub fn new(name: impl Into<String>, status: AdmissionStatus) -> Self {
        Self {
            name: name.into(),
            status,
            ward: None,
            blood_type: None,
            allergies: None,
            id: None,
        }
    }
}

fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Owner of the portal's in-memory lists.
#[derive(Clone, Debug)]
pub struct PortalStore {
    cfg: Arc<CoreConfig>,
    users: Vec<User>,
    inpatients: Vec<Inpatient>,
    alerts: Vec<EmergencyAlert>,
    schedules: Vec<ScheduleItem>,
    meetings: Vec<MedicalBoardMeeting>,
    stock: Vec<PharmacyItem>,
    prescriptions: Vec<Prescription>,
}

impl PortalStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            users: Vec::new(),
            inpatients: Vec::new(),
            alerts: Vec::new(),
            schedules: Vec::new(),
            meetings: Vec::new(),
            stock: Vec::new(),
            prescriptions: Vec::new(),
        }
    }

    /// Seeds the roster. Identifiers must be unique.
    pub fn with_inpatients(mut self, inpatients: Vec<Inpatient>) -> PortalResult<Self> {
        let mut seen = HashSet::new();
        for patient in &inpatients {
            if !seen.insert(patient.id.as_str()) {
                return Err(PortalError::DuplicateId(patient.id.clone()));
            }
        }
        self.inpatients = inpatients;
        Ok(self)
    }

    pub fn with_schedules(mut self, schedules: Vec<ScheduleItem>) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn with_stock(mut self, stock: Vec<PharmacyItem>) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_prescriptions(mut self, prescriptions: Vec<Prescription>) -> Self {
        self.prescriptions = prescriptions;
        self
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn inpatients(&self) -> &[Inpatient] {
        &self.inpatients
    }

    pub fn inpatient(&self, id: &str) -> Option<&Inpatient> {
        self.inpatients.iter().find(|p| p.id == id)
    }

    /// All alerts, newest first.
    pub fn alerts(&self) -> &[EmergencyAlert] {
        &self.alerts
    }

    pub fn active_alerts(&self) -> impl Iterator<Item = &EmergencyAlert> {
        self.alerts.iter().filter(|a| a.status.is_active())
    }

    pub fn schedules(&self) -> &[ScheduleItem] {
        &self.schedules
    }

    /// Agenda entries booked for `patient_name`.
    pub fn appointments_for<'a>(
        &'a self,
        patient_name: &'a str,
    ) -> impl Iterator<Item = &'a ScheduleItem> + 'a {
        self.schedules
            .iter()
            .filter(move |s| s.patient_name.as_deref() == Some(patient_name))
    }

    pub fn meetings(&self) -> &[MedicalBoardMeeting] {
        &self.meetings
    }

    pub fn stock(&self) -> &[PharmacyItem] {
        &self.stock
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    /// Number of patients not yet discharged.
    pub fn active_census(&self) -> usize {
        self.inpatients
            .iter()
            .filter(|p| p.status.is_in_census())
            .count()
    }

    // ------------------------------------------------------------------
    // Emergency alerts
    // ------------------------------------------------------------------

    /// Raises a new active alert.
    ///
    /// The medical summary is copied from the roster when `patient_id` names a known inpatient,
    /// otherwise from the account with that id.
    pub fn create_emergency(&mut self, report: EmergencyReport) -> PortalResult<EmergencyAlert> {
        let patient_name = NonEmptyText::new(&report.patient_name)?.into_string();
        let patient_id = non_blank(Some(report.patient_id.as_str()))
            .unwrap_or(GUEST_PATIENT_ID)
            .to_owned();
        let medical_summary = self
            .inpatient(&patient_id)
            .map(|p| p.medical_summary.clone())
            .or_else(|| {
                self.user(&patient_id)
                    .and_then(|u| u.medical_record.clone())
            })
            .unwrap_or_default();

        let alert = EmergencyAlert {
            id: new_record_id(),
            patient_name,
            patient_id,
            age: report.age,
            sex: report.sex,
            incident_type: report.incident_type,
            status: AlertStatus::Active,
            timestamp: Utc::now(),
            medical_summary,
        };

        tracing::info!(
            alert_id = %alert.id,
            patient_id = %alert.patient_id,
            incident = %alert.incident_type,
            "emergency alert raised"
        );
        self.alerts.insert(0, alert.clone());
        Ok(alert)
    }

    pub fn resolve_alert(&mut self, id: &str) -> PortalResult<()> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| PortalError::not_found("alert", id))?;
        alert.status = close_alert(id, alert.status, AlertStatus::Resolved)?;
        tracing::info!(alert_id = %id, "emergency alert resolved");
        Ok(())
    }

    /// Closes an active alert and sends the patient to the emergency ward as en route.
    ///
    /// A patient already on the roster is moved there, subject to the transition policy; the
    /// alert stays active if the move is refused. Anyone else joins the roster, guests under a
    /// fresh identifier.
    pub fn admit_from_alert(&mut self, id: &str) -> PortalResult<Inpatient> {
        let index = self
            .alerts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| PortalError::not_found("alert", id))?;
        let outcome = close_alert(id, self.alerts[index].status, AlertStatus::Admitted)?;
        let policy = self.cfg.transition_policy();
        let emergency_ward = self.cfg.emergency_ward().to_owned();

        let alert = &self.alerts[index];
        let is_guest = alert.patient_id == GUEST_PATIENT_ID;
        let rostered = self
            .inpatients
            .iter()
            .position(|p| !is_guest && p.id == alert.patient_id);

        let inpatient = match rostered {
            Some(row) => {
                let patient = &mut self.inpatients[row];
                patient.status =
                    apply_admission_status(patient.status, AdmissionStatus::EnRoute, policy)?;
                patient.ward = emergency_ward;
                patient.clone()
            }
            None => {
                let inpatient = Inpatient {
                    id: if is_guest {
                        new_record_id()
                    } else {
                        alert.patient_id.clone()
                    },
                    patient_name: alert.patient_name.clone(),
                    status: AdmissionStatus::EnRoute,
                    ward: emergency_ward,
                    admission_date: Utc::now().to_rfc3339(),
                    medical_summary: alert.medical_summary.clone(),
                };
                self.inpatients.push(inpatient.clone());
                inpatient
            }
        };

        self.alerts[index].status = outcome;
        tracing::info!(alert_id = %id, patient_id = %inpatient.id, "patient admitted from alert");
        Ok(inpatient)
    }

    pub fn delete_emergency(&mut self, id: &str) -> PortalResult<EmergencyAlert> {
        let index = self
            .alerts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| PortalError::not_found("alert", id))?;
        tracing::info!(alert_id = %id, "emergency alert deleted");
        Ok(self.alerts.remove(index))
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Creates an account from the sign-in form. Patients start with a default medical record.
    pub fn register_user(&mut self, registration: Registration) -> PortalResult<User> {
        let name = NonEmptyText::new(registration.display_name())?;
        let role = registration.role;
        let user = User {
            id: new_record_id(),
            name,
            email: registration.email.trim().to_owned(),
            role,
            medical_record: (role == UserRole::Patient).then(MedicalRecord::default),
            photo: None,
        };
        tracing::info!(user_id = %user.id, role = role.label(), "user registered");
        self.users.push(user.clone());
        Ok(user)
    }

    fn user_mut(&mut self, id: &str) -> PortalResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| PortalError::not_found("user", id))
    }

    /// Applies a partial profile update. A blank photo clears the picture.
    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> PortalResult<User> {
        let name = update.name.as_deref().map(NonEmptyText::new).transpose()?;
        let user = self.user_mut(id)?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email.trim().to_owned();
        }
        if let Some(photo) = update.photo {
            user.photo = non_blank(Some(photo.as_str())).map(str::to_owned);
        }
        tracing::info!(user_id = %id, name = %user.name, "profile updated");
        Ok(user.clone())
    }

    /// Changes the account's role. Becoming a patient creates a default record if none exists.
    pub fn switch_role(&mut self, id: &str, role: UserRole) -> PortalResult<()> {
        let user = self.user_mut(id)?;
        user.role = role;
        if role == UserRole::Patient && user.medical_record.is_none() {
            user.medical_record = Some(MedicalRecord::default());
        }
        tracing::info!(user_id = %id, role = role.label(), "role switched");
        Ok(())
    }

    /// Replaces the account's own medical record and stamps it as updated now.
    pub fn update_user_record(&mut self, id: &str, mut record: MedicalRecord) -> PortalResult<()> {
        record.last_updated = Utc::now();
        self.user_mut(id)?.medical_record = Some(record);
        tracing::info!(user_id = %id, "own medical record updated");
        Ok(())
    }

    pub fn add_user_history(
        &mut self,
        id: &str,
        request: HistoryRequest,
    ) -> PortalResult<HistoryItem> {
        let event = NonEmptyText::new(&request.event)?.into_string();
        let user = self.user_mut(id)?;
        let item = HistoryItem {
            id: new_record_id(),
            event,
            date: request.date,
            visit_type: request.visit_type,
            details: request.details,
        };
        user.medical_record
            .get_or_insert_with(MedicalRecord::default)
            .add_history(item.clone());
        tracing::info!(
            user_id = %id,
            history_id = %item.id,
            visit = item.visit_type.label(),
            "history entry added"
        );
        Ok(item)
    }

    pub fn remove_user_history(&mut self, id: &str, history_id: &str) -> PortalResult<()> {
        let user = self.user_mut(id)?;
        let removed = user
            .medical_record
            .as_mut()
            .is_some_and(|record| record.remove_history(history_id));
        if !removed {
            return Err(PortalError::not_found("history entry", history_id));
        }
        tracing::info!(user_id = %id, history_id = %history_id, "history entry removed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inpatients
    // ------------------------------------------------------------------

    pub fn manual_admit(&mut self, request: AdmissionRequest) -> PortalResult<Inpatient> {
        let patient_name = NonEmptyText::new(&request.name)?.into_string();
        let id = match non_blank(request.id.as_deref()) {
            Some(id) if self.inpatient(id).is_some() => {
                return Err(PortalError::DuplicateId(id.to_owned()))
            }
            Some(id) => id.to_owned(),
            None => new_record_id(),
        };
        let ward = non_blank(request.ward.as_deref())
            .unwrap_or(self.cfg.default_ward())
            .to_owned();

        let mut medical_summary = MedicalRecord::default();
        if let Some(blood_type) = non_blank(request.blood_type.as_deref()) {
            medical_summary.blood_type = blood_type.to_owned();
        }
        if let Some(allergies) = non_blank(request.allergies.as_deref()) {
            medical_summary.allergies = allergies.to_owned();
        }

        let inpatient = Inpatient {
            id,
            patient_name,
            status: request.status,
            ward,
            admission_date: Utc::now().to_rfc3339(),
            medical_summary,
        };
        tracing::info!(
            patient_id = %inpatient.id,
            status = inpatient.status.label(),
            ward = %inpatient.ward,
            "patient admitted"
        );
        self.inpatients.push(inpatient.clone());
        Ok(inpatient)
    }

    fn inpatient_mut(&mut self, id: &str) -> PortalResult<&mut Inpatient> {
        self.inpatients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PortalError::not_found("inpatient", id))
    }

    pub fn update_inpatient_status(
        &mut self,
        id: &str,
        status: AdmissionStatus,
    ) -> PortalResult<()> {
        let policy = self.cfg.transition_policy();
        let patient = self.inpatient_mut(id)?;
        let previous = patient.status;
        patient.status = apply_admission_status(previous, status, policy)?;
        tracing::info!(
            patient_id = %id,
            from = previous.label(),
            to = status.label(),
            "inpatient status updated"
        );
        Ok(())
    }

    /// Replaces the patient's medical summary and stamps it as updated now.
    pub fn update_patient_record(
        &mut self,
        id: &str,
        mut record: MedicalRecord,
    ) -> PortalResult<()> {
        record.last_updated = Utc::now();
        self.inpatient_mut(id)?.medical_summary = record;
        tracing::info!(patient_id = %id, "medical record updated");
        Ok(())
    }

    pub fn delete_inpatient(&mut self, id: &str) -> PortalResult<Inpatient> {
        let index = self
            .inpatients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PortalError::not_found("inpatient", id))?;
        tracing::info!(patient_id = %id, "inpatient removed from roster");
        Ok(self.inpatients.remove(index))
    }

    // ------------------------------------------------------------------
    // Pharmacy
    // ------------------------------------------------------------------

    pub fn update_stock(&mut self, stock: Vec<PharmacyItem>) {
        tracing::info!(items = stock.len(), "pharmacy stock replaced");
        self.stock = stock;
    }

    /// Flips availability of a stock item and returns the new value.
    pub fn toggle_stock(&mut self, id: &str) -> PortalResult<bool> {
        let item = self
            .stock
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| PortalError::not_found("stock item", id))?;
        item.available = !item.available;
        tracing::info!(item_id = %id, available = item.available, "stock availability toggled");
        Ok(item.available)
    }

    pub fn update_prescription_status(
        &mut self,
        id: &str,
        status: PrescriptionStatus,
    ) -> PortalResult<()> {
        let prescription = self
            .prescriptions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PortalError::not_found("prescription", id))?;
        prescription.status = status;
        tracing::info!(prescription_id = %id, status = status.label(), "prescription status updated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    pub fn schedule_board(&mut self, request: MeetingRequest) -> PortalResult<MedicalBoardMeeting> {
        let title = NonEmptyText::new(&request.title)?.into_string();
        let meeting = MedicalBoardMeeting {
            id: new_record_id(),
            title,
            date: request.date,
            time: request.time,
            specialty: request.specialty,
            participants: request.participants,
        };
        tracing::info!(meeting_id = %meeting.id, date = %meeting.date, "board meeting scheduled");
        self.meetings.push(meeting.clone());
        Ok(meeting)
    }

    pub fn delete_meeting(&mut self, id: &str) -> PortalResult<MedicalBoardMeeting> {
        let index = self
            .meetings
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| PortalError::not_found("meeting", id))?;
        tracing::info!(meeting_id = %id, "board meeting cancelled");
        Ok(self.meetings.remove(index))
    }

    /// Books a consultation. The time must be a valid 12-hour clock time.
    pub fn book_appointment(&mut self, request: BookingRequest) -> PortalResult<ScheduleItem> {
        let title = NonEmptyText::new(&request.title)?.into_string();
        let patient_name = NonEmptyText::new(&request.patient_name)?.into_string();
        let item = ScheduleItem {
            id: new_record_id(),
            title,
            time: request.time.trim().to_owned(),
            category: ScheduleCategory::Consultation,
            patient_name: Some(patient_name),
            location: request.location,
        };
        if item.minutes_since_midnight().is_none() {
            return Err(PortalError::InvalidInput(format!(
                "appointment time must look like 09:00 AM, got {:?}",
                request.time
            )));
        }
        tracing::info!(schedule_id = %item.id, time = %item.time, "appointment booked");
        self.schedules.push(item.clone());
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{run_query, PatientQuery, ScheduleQuery};
    use crate::records::VisitType;
    use crate::workflow::TransitionPolicy;
    use chrono::NaiveDate;

    fn store() -> PortalStore {
        PortalStore::new(Arc::new(CoreConfig::default()))
    }

    fn report(name: &str, patient_id: &str) -> EmergencyReport {
        EmergencyReport {
            patient_name: name.into(),
            patient_id: patient_id.into(),
            age: "42".into(),
            sex: "F".into(),
            incident_type: "Chest pain".into(),
        }
    }

    #[test]
    fn manual_admit_applies_defaults() {
        let mut store = store();
        let patient = store
            .manual_admit(AdmissionRequest::new("  Ann Lee ", AdmissionStatus::Admitted))
            .expect("admit");
        assert_eq!(patient.patient_name, "Ann Lee");
        assert_eq!(patient.ward, "General Ward");
        assert_eq!(patient.id.len(), 32);
        assert!(patient.admitted_at().is_some());
        assert_eq!(store.active_census(), 1);
    }

    #[test]
    fn manual_admit_rejects_blank_name_and_duplicate_id() {
        let mut store = store();
        let err = store
            .manual_admit(AdmissionRequest::new("   ", AdmissionStatus::Admitted))
            .expect_err("blank name");
        assert!(matches!(err, PortalError::Text(_)));

        let mut request = AdmissionRequest::new("Ann", AdmissionStatus::Admitted);
        request.id = Some("P-1".into());
        store.manual_admit(request.clone()).expect("first admit");
        let err = store.manual_admit(request).expect_err("duplicate");
        assert!(matches!(err, PortalError::DuplicateId(id) if id == "P-1"));
    }

    #[test]
    fn seeding_rejects_duplicate_ids() {
        let patient = Inpatient {
            id: "P-1".into(),
            patient_name: "Ann".into(),
            status: AdmissionStatus::Admitted,
            ward: "ICU".into(),
            admission_date: "2024-01-01".into(),
            medical_summary: MedicalRecord::default(),
        };
        let err = store()
            .with_inpatients(vec![patient.clone(), patient])
            .expect_err("duplicate ids");
        assert!(matches!(err, PortalError::DuplicateId(_)));
    }

    #[test]
    fn emergency_copies_roster_summary_and_admits() {
        let mut store = store();
        let mut request = AdmissionRequest::new("Ann", AdmissionStatus::Discharged);
        request.id = Some("P-7".into());
        request.allergies = Some("Penicillin".into());
        store.manual_admit(request).expect("admit");

        let alert = store
            .create_emergency(report("Ann", "P-7"))
            .expect("alert");
        assert_eq!(alert.medical_summary.allergies, "Penicillin");
        assert_eq!(store.active_alerts().count(), 1);

        let admitted = store.admit_from_alert(&alert.id).expect("admit from alert");
        assert_eq!(admitted.id, "P-7");
        assert_eq!(admitted.status, AdmissionStatus::EnRoute);
        assert_eq!(store.inpatients().len(), 1);
        assert_eq!(store.inpatient("P-7"), Some(&admitted));
        assert_eq!(store.active_census(), 1);
        assert_eq!(admitted.ward, store.config().emergency_ward());
        assert_eq!(admitted.medical_summary.allergies, "Penicillin");
        assert_eq!(store.alerts()[0].status, AlertStatus::Admitted);
        assert_eq!(store.active_alerts().count(), 0);

        let err = store.resolve_alert(&alert.id).expect_err("already closed");
        assert!(matches!(err, PortalError::AlertNotActive { .. }));
    }

    #[test]
    fn rostered_admission_from_alert_honours_policy() {
        let cfg = CoreConfig::from_env_values(Some("discharge-terminal".into()), None, None)
            .expect("config");
        let mut store = PortalStore::new(Arc::new(cfg));
        let mut request = AdmissionRequest::new("Ann", AdmissionStatus::Discharged);
        request.id = Some("P-7".into());
        request.ward = Some("Maternity".into());
        store.manual_admit(request).expect("admit");

        let alert = store.create_emergency(report("Ann", "P-7")).expect("alert");
        let err = store
            .admit_from_alert(&alert.id)
            .expect_err("discharge is terminal");
        assert!(matches!(err, PortalError::InvalidTransition { .. }));

        let patient = store.inpatient("P-7").expect("still rostered");
        assert_eq!(patient.status, AdmissionStatus::Discharged);
        assert_eq!(patient.ward, "Maternity");
        assert_eq!(store.inpatients().len(), 1);
        assert_eq!(store.active_alerts().count(), 1);
    }

    #[test]
    fn account_lifecycle() {
        let mut store = store();
        let user = store
            .register_user(Registration {
                username: String::new(),
                email: " ann.lee@example.org ".into(),
                role: UserRole::Patient,
            })
            .expect("register");
        assert_eq!(user.name.as_str(), "ann.lee");
        assert_eq!(user.email, "ann.lee@example.org");
        assert!(user.medical_record.is_some());

        let updated = store
            .update_user(
                &user.id,
                UserUpdate {
                    name: Some(" Ann Lee ".into()),
                    photo: Some("data:image/jpeg;base64,AAAA".into()),
                    ..UserUpdate::default()
                },
            )
            .expect("update");
        assert_eq!(updated.name.as_str(), "Ann Lee");
        assert_eq!(updated.email, "ann.lee@example.org");
        assert!(updated.photo.is_some());

        let err = store
            .update_user(
                &user.id,
                UserUpdate {
                    name: Some("  ".into()),
                    ..UserUpdate::default()
                },
            )
            .expect_err("blank name");
        assert!(matches!(err, PortalError::Text(_)));
        assert_eq!(store.user(&user.id).map(|u| u.name.as_str()), Some("Ann Lee"));

        assert!(matches!(
            store.update_user("nobody", UserUpdate::default()),
            Err(PortalError::NotFound { kind: "user", .. })
        ));
    }

    #[test]
    fn staff_accounts_have_no_record_until_switched_to_patient() {
        let mut store = store();
        let doctor = store
            .register_user(Registration {
                username: "dr_grey".into(),
                email: "grey@example.org".into(),
                role: UserRole::Doctor,
            })
            .expect("register");
        assert!(doctor.medical_record.is_none());

        store.switch_role(&doctor.id, UserRole::Patient).expect("switch");
        let user = store.user(&doctor.id).expect("user");
        assert_eq!(user.role, UserRole::Patient);
        assert!(user.medical_record.is_some());
    }

    #[test]
    fn own_record_and_history_feed_emergency_alerts() {
        let mut store = store();
        let user = store
            .register_user(Registration {
                username: "sam".into(),
                email: "sam@example.org".into(),
                role: UserRole::Patient,
            })
            .expect("register");

        let mut record = MedicalRecord::default();
        record.allergies = "Peanuts".into();
        store.update_user_record(&user.id, record).expect("update record");

        let date = NaiveDate::from_ymd_opt(2024, 4, 2).expect("date");
        let first = store
            .add_user_history(
                &user.id,
                HistoryRequest {
                    event: "Flu shot".into(),
                    date,
                    visit_type: VisitType::Vaccination,
                    details: String::new(),
                },
            )
            .expect("history");
        let second = store
            .add_user_history(
                &user.id,
                HistoryRequest {
                    event: "Blood panel".into(),
                    date,
                    visit_type: VisitType::LabTest,
                    details: "Fasting".into(),
                },
            )
            .expect("history");

        let history = &store
            .user(&user.id)
            .and_then(|u| u.medical_record.as_ref())
            .expect("record")
            .medical_history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);

        store.remove_user_history(&user.id, &first.id).expect("remove");
        assert!(matches!(
            store.remove_user_history(&user.id, &first.id),
            Err(PortalError::NotFound { kind: "history entry", .. })
        ));

        let alert = store.create_emergency(report("sam", &user.id)).expect("alert");
        assert_eq!(alert.medical_summary.allergies, "Peanuts");
        assert_eq!(alert.medical_summary.medical_history.len(), 1);
    }

    #[test]
    fn guest_alert_gets_fresh_identity() {
        let mut store = store();
        let alert = store.create_emergency(report("Walk-in", "")).expect("alert");
        assert_eq!(alert.patient_id, GUEST_PATIENT_ID);
        assert_eq!(alert.medical_summary.blood_type, "Unknown");

        let admitted = store.admit_from_alert(&alert.id).expect("admit");
        assert_ne!(admitted.id, GUEST_PATIENT_ID);
        assert_eq!(store.inpatients().len(), 1);
    }

    #[test]
    fn known_but_unrostered_patient_keeps_identifier() {
        let mut store = store();
        let alert = store.create_emergency(report("Sam", "PT-99")).expect("alert");
        let admitted = store.admit_from_alert(&alert.id).expect("admit");
        assert_eq!(admitted.id, "PT-99");
    }

    #[test]
    fn newest_alert_first_and_delete() {
        let mut store = store();
        let first = store.create_emergency(report("One", "")).expect("alert");
        let second = store.create_emergency(report("Two", "")).expect("alert");
        assert_eq!(store.alerts()[0].id, second.id);

        store.resolve_alert(&first.id).expect("resolve");
        assert_eq!(store.active_alerts().count(), 1);

        let removed = store.delete_emergency(&first.id).expect("delete");
        assert_eq!(removed.status, AlertStatus::Resolved);
        assert!(matches!(
            store.delete_emergency(&first.id),
            Err(PortalError::NotFound { kind: "alert", .. })
        ));
    }

    #[test]
    fn status_updates_follow_configured_policy() {
        let cfg = CoreConfig::from_env_values(Some("discharge-terminal".into()), None, None)
            .expect("config");
        let mut store = PortalStore::new(Arc::new(cfg));
        let patient = store
            .manual_admit(AdmissionRequest::new("Ann", AdmissionStatus::EnRoute))
            .expect("admit");

        store
            .update_inpatient_status(&patient.id, AdmissionStatus::Admitted)
            .expect("admit");
        store
            .update_inpatient_status(&patient.id, AdmissionStatus::Discharged)
            .expect("discharge");
        assert_eq!(store.active_census(), 0);

        let err = store
            .update_inpatient_status(&patient.id, AdmissionStatus::Admitted)
            .expect_err("discharge is terminal");
        assert!(matches!(err, PortalError::InvalidTransition { .. }));
        assert_eq!(
            store.inpatient(&patient.id).map(|p| p.status),
            Some(AdmissionStatus::Discharged)
        );
        assert_eq!(store.config().transition_policy(), TransitionPolicy::DischargeTerminal);
    }

    #[test]
    fn permissive_store_allows_readmission() {
        let mut store = store();
        let patient = store
            .manual_admit(AdmissionRequest::new("Ann", AdmissionStatus::Discharged))
            .expect("admit");
        store
            .update_inpatient_status(&patient.id, AdmissionStatus::Admitted)
            .expect("permissive");
        assert!(store.update_inpatient_status("missing", AdmissionStatus::Admitted).is_err());
    }

    #[test]
    fn record_update_and_delete() {
        let mut store = store();
        let patient = store
            .manual_admit(AdmissionRequest::new("Ann", AdmissionStatus::Admitted))
            .expect("admit");
        let mut record = MedicalRecord::default();
        record.conditions = "Asthma".into();
        store
            .update_patient_record(&patient.id, record)
            .expect("update");
        assert_eq!(
            store.inpatient(&patient.id).map(|p| p.medical_summary.conditions.as_str()),
            Some("Asthma")
        );

        store.delete_inpatient(&patient.id).expect("delete");
        assert!(store.inpatients().is_empty());
    }

    #[test]
    fn stock_and_prescriptions() {
        let item = PharmacyItem {
            id: "RX-1".into(),
            name: "Amoxicillin".into(),
            category: "Antibiotic".into(),
            available: true,
            last_restocked: Utc::now(),
        };
        let prescription = Prescription {
            id: "PR-1".into(),
            medication: "Amoxicillin".into(),
            dosage: "500mg".into(),
            patient_name: None,
            prescribed_by: "Dr. Grey".into(),
            status: PrescriptionStatus::Ordered,
        };
        let mut store = store()
            .with_stock(vec![item])
            .with_prescriptions(vec![prescription]);

        assert!(!store.toggle_stock("RX-1").expect("toggle"));
        assert!(store.toggle_stock("RX-1").expect("toggle"));
        assert!(store.toggle_stock("nope").is_err());

        store
            .update_prescription_status("PR-1", PrescriptionStatus::ReadyForPickup)
            .expect("update");
        assert_eq!(store.prescriptions()[0].status, PrescriptionStatus::ReadyForPickup);

        store.update_stock(Vec::new());
        assert!(store.stock().is_empty());
    }

    #[test]
    fn meetings_schedule_and_cancel() {
        let mut store = store();
        let meeting = store
            .schedule_board(MeetingRequest {
                title: "Tumour board".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 3).expect("date"),
                time: "03:00 PM".into(),
                specialty: "Oncology".into(),
                participants: vec!["Dr. Grey".into()],
            })
            .expect("schedule");
        assert_eq!(store.meetings().len(), 1);
        store.delete_meeting(&meeting.id).expect("cancel");
        assert!(store.meetings().is_empty());
    }

    #[test]
    fn booking_validates_time_and_feeds_agenda_queries() {
        let mut store = store();
        let booking = |title: &str, time: &str| BookingRequest {
            title: title.into(),
            time: time.into(),
            location: "Main Clinic - Wing A".into(),
            patient_name: "Jane".into(),
        };
        store.book_appointment(booking("Late", "03:15 PM")).expect("book");
        store.book_appointment(booking("Early", "08:45 AM")).expect("book");
        let err = store
            .book_appointment(booking("Broken", "quarter past"))
            .expect_err("bad time");
        assert!(matches!(err, PortalError::InvalidInput(_)));

        let agenda = run_query(store.schedules(), &ScheduleQuery::default());
        let titles: Vec<&str> = agenda.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Early", "Late"]);
        assert_eq!(store.appointments_for("Jane").count(), 2);
        assert_eq!(store.appointments_for("John").count(), 0);
    }

    #[test]
    fn queries_see_mutations_without_holding_copies() {
        let mut store = store();
        let patient = store
            .manual_admit(AdmissionRequest::new("Ann", AdmissionStatus::EnRoute))
            .expect("admit");
        let query = PatientQuery::default().with_filter(Some(AdmissionStatus::Admitted));
        assert!(run_query(store.inpatients(), &query).is_empty());

        store
            .update_inpatient_status(&patient.id, AdmissionStatus::Admitted)
            .expect("update");
        assert_eq!(run_query(store.inpatients(), &query).len(), 1);
    }
}
