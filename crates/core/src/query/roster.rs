//! Inpatient census queries.

use super::{Queryable, RosterQuery, SortDirection, SortState};
use crate::records::{AdmissionStatus, Inpatient};
use portal_types::SearchTerm;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterSortKey {
    /// Admission timestamp; unparseable values count as the Unix epoch.
    Date,
    /// Case-sensitive lexicographic patient name.
    Name,
}

pub type PatientQuery = RosterQuery<AdmissionStatus, RosterSortKey>;

/// Census lists open on newest admissions first.
impl Default for SortState<RosterSortKey> {
    fn default() -> Self {
        Self::new(RosterSortKey::Date, SortDirection::Descending)
    }
}

impl Inpatient {
    fn admission_millis(&self) -> i64 {
        self.admitted_at().map_or(0, |t| t.timestamp_millis())
    }
}

impl Queryable for Inpatient {
    type Filter = AdmissionStatus;
    type SortKey = RosterSortKey;

    fn matches_filter(&self, filter: AdmissionStatus) -> bool {
        self.status == filter
    }

    fn matches_search(&self, term: &SearchTerm) -> bool {
        term.found_in(&self.patient_name)
            || term.found_in(&self.id)
            || term.found_in(&self.ward)
            || term.found_in(self.status.label())
    }

    fn compare_by(&self, other: &Self, key: RosterSortKey, direction: SortDirection) -> Ordering {
        let ordering = match key {
            RosterSortKey::Date => self.admission_millis().cmp(&other.admission_millis()),
            RosterSortKey::Name => self.patient_name.cmp(&other.patient_name),
        };
        direction.apply(ordering)
    }
}
