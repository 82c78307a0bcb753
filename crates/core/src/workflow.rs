//! Admission and alert status rules.
//!
//! The portal historically accepted any admission status change. [`TransitionPolicy`] keeps that
//! behaviour as the default and offers a stricter mode where discharge is final. Alert lifecycle
//! rules are fixed: only an active alert can be resolved or turned into an admission.

use crate::error::{PortalError, PortalResult};
use crate::records::{AdmissionStatus, AlertStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPolicy {
    /// Any status may be set from any status.
    #[default]
    Permissive,
    /// As permissive, except nothing leaves `Discharged`.
    DischargeTerminal,
}

impl FromStr for TransitionPolicy {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "discharge-terminal" => Ok(Self::DischargeTerminal),
            other => Err(PortalError::InvalidInput(format!(
                "unknown transition policy: {other}"
            ))),
        }
    }
}

impl AdmissionStatus {
    /// Setting the current status again is always allowed.
    pub fn can_transition_to(self, target: AdmissionStatus, policy: TransitionPolicy) -> bool {
        match policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::DischargeTerminal => {
                self != AdmissionStatus::Discharged || target == AdmissionStatus::Discharged
            }
        }
    }
}

/// Checks `current -> target` against `policy` and returns the new status.
pub fn apply_admission_status(
    current: AdmissionStatus,
    target: AdmissionStatus,
    policy: TransitionPolicy,
) -> PortalResult<AdmissionStatus> {
    if current.can_transition_to(target, policy) {
        Ok(target)
    } else {
        Err(PortalError::InvalidTransition {
            from: current,
            to: target,
        })
    }
}

/// Closes an active alert with `outcome` (`Resolved` or `Admitted`).
pub fn close_alert(id: &str, current: AlertStatus, outcome: AlertStatus) -> PortalResult<AlertStatus> {
    if outcome.is_active() {
        return Err(PortalError::InvalidInput(
            "an alert cannot be closed back to active".into(),
        ));
    }
    if !current.is_active() {
        return Err(PortalError::AlertNotActive {
            id: id.to_owned(),
            status: current,
        });
    }
    Ok(outcome)
}
