//! Single-day agenda entries for clinical staff.

use crate::query::clock::parse_clock_time;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleCategory {
    Consultation,
    Surgery,
    Rounds,
    Break,
}

impl ScheduleCategory {
    /// Upper-case code, matching the serialised form. Type sorting compares these.
    pub fn code(self) -> &'static str {
        match self {
            Self::Consultation => "CONSULTATION",
            Self::Surgery => "SURGERY",
            Self::Rounds => "ROUNDS",
            Self::Break => "BREAK",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub title: String,
    /// 12-hour clock time such as `09:00 AM`.
    pub time: String,
    #[serde(rename = "type")]
    pub category: ScheduleCategory,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub location: String,
}

impl ScheduleItem {
    /// Minutes since midnight, or `None` when `time` is not a valid 12-hour clock time.
    pub fn minutes_since_midnight(&self) -> Option<u16> {
        parse_clock_time(&self.time)
    }
}

/// A patient's request for a consultation slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub title: String,
    pub time: String,
    pub location: String,
    pub patient_name: String,
}
