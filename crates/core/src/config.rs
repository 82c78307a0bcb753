//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the record store.
//! Nothing in the core reads environment variables while applying mutations or running queries.

use crate::constants::{DEFAULT_EMERGENCY_WARD, DEFAULT_WARD};
use crate::workflow::TransitionPolicy;
use crate::PortalResult;
use portal_types::NonEmptyText;

pub const ENV_TRANSITION_POLICY: &str = "PORTAL_TRANSITION_POLICY";
pub const ENV_DEFAULT_WARD: &str = "PORTAL_DEFAULT_WARD";
pub const ENV_EMERGENCY_WARD: &str = "PORTAL_EMERGENCY_WARD";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    transition_policy: TransitionPolicy,
    default_ward: String,
    emergency_ward: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            transition_policy: TransitionPolicy::default(),
            default_ward: DEFAULT_WARD.to_owned(),
            emergency_ward: DEFAULT_EMERGENCY_WARD.to_owned(),
        }
    }
}

impl CoreConfig {
    pub fn new(
        transition_policy: TransitionPolicy,
        default_ward: NonEmptyText,
        emergency_ward: NonEmptyText,
    ) -> Self {
        Self {
            transition_policy,
            default_ward: default_ward.into_string(),
            emergency_ward: emergency_ward.into_string(),
        }
    }

    /// Build a configuration from optional raw values.
    ///
    /// Missing or blank values fall back to the defaults; present values must be valid.
    pub fn from_env_values(
        transition_policy: Option<String>,
        default_ward: Option<String>,
        emergency_ward: Option<String>,
    ) -> PortalResult<Self> {
        let defaults = Self::default();

        let transition_policy = match non_blank(transition_policy) {
            Some(raw) => raw.parse()?,
            None => defaults.transition_policy,
        };
        let default_ward = match non_blank(default_ward) {
            Some(raw) => NonEmptyText::new(raw)?.into_string(),
            None => defaults.default_ward,
        };
        let emergency_ward = match non_blank(emergency_ward) {
            Some(raw) => NonEmptyText::new(raw)?.into_string(),
            None => defaults.emergency_ward,
        };

        Ok(Self {
            transition_policy,
            default_ward,
            emergency_ward,
        })
    }

    /// Load `.env` (if present) and resolve the configuration from the process environment.
    pub fn from_env() -> PortalResult<Self> {
        dotenvy::dotenv().ok();
        let cfg = Self::from_env_values(
            std::env::var(ENV_TRANSITION_POLICY).ok(),
            std::env::var(ENV_DEFAULT_WARD).ok(),
            std::env::var(ENV_EMERGENCY_WARD).ok(),
        )?;
        tracing::info!(policy = ?cfg.transition_policy, "portal core configuration resolved");
        Ok(cfg)
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        self.transition_policy
    }

    pub fn default_ward(&self) -> &str {
        &self.default_ward
    }

    pub fn emergency_ward(&self) -> &str {
        &self.emergency_ward
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
