use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled medical-board meeting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalBoardMeeting {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub specialty: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub specialty: String,
    #[serde(default)]
    pub participants: Vec<String>,
}
