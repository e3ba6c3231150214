use super::error::ConfigError;
use crate::constants::{API_KEY_ENV, API_URL_ENV, DEFAULT_MODEL_ENV, FALLBACK_MODEL};
use std::fmt;
use std::path::Path;

/// Immutable server configuration, read once at startup.
///
/// Unset variables collapse to empty strings so that the server still starts;
/// an empty API key makes every tool call fail with `InvalidRequest`.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: String,
    pub default_model: String,
}

impl AppConfig {
    /// Load configuration from the process environment, merged with an
    /// optional env file (default `config/.env`).
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(env_file)
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_model = lookup(DEFAULT_MODEL_ENV)
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| FALLBACK_MODEL.to_string());

        Self {
            api_url: lookup(API_URL_ENV).unwrap_or_default(),
            api_key: lookup(API_KEY_ENV).unwrap_or_default(),
            default_model,
        }
    }

    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            default_model: default_model.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<unset>" })
            .field("default_model", &self.default_model)
            .finish()
    }
}
