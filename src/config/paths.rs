use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".flowlens";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";
pub const WIZARD_LOG_FILE: &str = "logs/wizard.log";

fn global_state_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

pub fn default_global_config_path() -> Result<PathBuf, ConfigError> {
    Ok(global_state_dir()?.join(GLOBAL_SETTINGS_FILE_NAME))
}

pub fn default_wizard_log_path() -> Result<PathBuf, ConfigError> {
    Ok(global_state_dir()?.join(WIZARD_LOG_FILE))
}
