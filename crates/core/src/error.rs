use crate::records::{AdmissionStatus, AlertStatus};

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] portal_types::TextError),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("identifier already in use: {0}")]
    DuplicateId(String),
    #[error("status transition not allowed: {} -> {}", .from.label(), .to.label())]
    InvalidTransition {
        from: AdmissionStatus,
        to: AdmissionStatus,
    },
    #[error("alert {id} is no longer active ({})", .status.label())]
    AlertNotActive { id: String, status: AlertStatus },
}

impl PortalError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type PortalResult<T> = std::result::Result<T, PortalError>;
