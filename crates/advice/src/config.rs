//! Advice service configuration, resolved once at startup.

use crate::{AdviceError, AdviceResult};
use std::time::Duration;

pub const ENV_API_KEY: &str = "PORTAL_AI_API_KEY";
/// Older deployments export the key under this name.
pub const ENV_LEGACY_API_KEY: &str = "API_KEY";
pub const ENV_MODEL: &str = "PORTAL_AI_MODEL";
pub const ENV_ENDPOINT: &str = "PORTAL_AI_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "PORTAL_AI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct AdviceConfig {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout_secs: u64,
}

impl std::fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AdviceConfig {
    /// Build a configuration from optional raw values.
    ///
    /// `api_key` wins over `legacy_api_key`. A missing key is allowed: every generation then
    /// fails with [`AdviceError::MissingApiKey`] and callers receive the fallback text.
    pub fn from_env_values(
        api_key: Option<String>,
        legacy_api_key: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
        timeout_secs: Option<String>,
    ) -> AdviceResult<Self> {
        let defaults = Self::default();

        let endpoint = match non_blank(endpoint) {
            Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => {
                raw.trim_end_matches('/').to_string()
            }
            Some(raw) => {
                return Err(AdviceError::InvalidConfig(format!(
                    "endpoint must be an http(s) URL, got {raw}"
                )))
            }
            None => defaults.endpoint,
        };

        let timeout_secs = match non_blank(timeout_secs) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(AdviceError::InvalidConfig(format!(
                        "timeout must be a positive number of seconds, got {raw}"
                    )))
                }
            },
            None => defaults.timeout_secs,
        };

        Ok(Self {
            api_key: non_blank(api_key).or_else(|| non_blank(legacy_api_key)),
            model: non_blank(model).unwrap_or(defaults.model),
            endpoint,
            timeout_secs,
        })
    }

    /// Load `.env` (if present) and resolve the configuration from the process environment.
    pub fn from_env() -> AdviceResult<Self> {
        dotenvy::dotenv().ok();
        let cfg = Self::from_env_values(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_LEGACY_API_KEY).ok(),
            std::env::var(ENV_MODEL).ok(),
            std::env::var(ENV_ENDPOINT).ok(),
            std::env::var(ENV_TIMEOUT_SECS).ok(),
        )?;
        if cfg.api_key.is_none() {
            tracing::warn!("no AI API key configured; advice will use fallback text");
        }
        Ok(cfg)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
