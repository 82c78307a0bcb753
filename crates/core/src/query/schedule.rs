//! Daily agenda queries.

use super::{Queryable, RosterQuery, SortDirection, SortState};
use crate::records::{ScheduleCategory, ScheduleItem};
use portal_types::SearchTerm;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleSortKey {
    /// Clock time; entries with an unreadable time always come last.
    Time,
    /// Associated patient name, absent names compared as "".
    Name,
    /// Category code.
    Type,
}

pub type ScheduleQuery = RosterQuery<ScheduleCategory, ScheduleSortKey>;

/// Agendas open in chronological order.
impl Default for SortState<ScheduleSortKey> {
    fn default() -> Self {
        Self::new(ScheduleSortKey::Time, SortDirection::Ascending)
    }
}

impl Queryable for ScheduleItem {
    type Filter = ScheduleCategory;
    type SortKey = ScheduleSortKey;

    fn matches_filter(&self, filter: ScheduleCategory) -> bool {
        self.category == filter
    }

    fn matches_search(&self, term: &SearchTerm) -> bool {
        term.found_in(&self.title)
            || self
                .patient_name
                .as_deref()
                .is_some_and(|name| term.found_in(name))
            || term.found_in(&self.location)
    }

    fn compare_by(&self, other: &Self, key: ScheduleSortKey, direction: SortDirection) -> Ordering {
        match key {
            ScheduleSortKey::Time => {
                match (self.minutes_since_midnight(), other.minutes_since_midnight()) {
                    (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            ScheduleSortKey::Name => {
                let a = self.patient_name.as_deref().unwrap_or("");
                let b = other.patient_name.as_deref().unwrap_or("");
                direction.apply(a.cmp(b))
            }
            ScheduleSortKey::Type => direction.apply(self.category.code().cmp(other.category.code())),
        }
    }
}
