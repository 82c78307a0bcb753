//! Portal accounts and their roles.

use crate::records::MedicalRecord;
use portal_types::NonEmptyText;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

impl UserRole {
    /// Badge shown next to the account name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Patient => "Verified Patient",
            Self::Doctor => "Medical Staff",
            Self::Admin => "System Admin",
        }
    }
}

/// A signed-in portal account. Only patients carry a medical record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: NonEmptyText,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub medical_record: Option<MedicalRecord>,
    /// Profile picture as a data URL.
    #[serde(default)]
    pub photo: Option<String>,
}

/// Details entered on the sign-in form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl Registration {
    /// Username, or the local part of the email when no username was given.
    pub fn display_name(&self) -> &str {
        let username = self.username.trim();
        if !username.is_empty() {
            return username;
        }
        self.email
            .split('@')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Partial profile update; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}
