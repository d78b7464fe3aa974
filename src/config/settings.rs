use super::{default_wizard_log_path, ConfigError};
use crate::api::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_NAME_CHECK_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_name_check_debounce_ms")]
    pub name_check_debounce_ms: u64,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            name_check_debounce_ms: default_name_check_debounce_ms(),
            log_path: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_name_check_debounce_ms() -> u64 {
    DEFAULT_NAME_CHECK_DEBOUNCE_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Settings(
                "`api_base_url` must start with http:// or https://".to_string(),
            ));
        }
        if self.request_timeout_secs < 1 {
            return Err(ConfigError::Settings(
                "`request_timeout_secs` must be >= 1".to_string(),
            ));
        }
        if let Some(path) = &self.log_path {
            if !path.is_absolute() {
                return Err(ConfigError::Settings(
                    "`log_path` must be an absolute path".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn name_check_debounce(&self) -> Duration {
        Duration::from_millis(self.name_check_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Explicit `log_path`, else the default under the global state dir.
    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| default_wizard_log_path().ok())
    }
}
