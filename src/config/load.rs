use super::{default_global_config_path, ConfigError, Settings};

/// Loads the global settings file, falling back to defaults when it does not
/// exist yet.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }
    let settings = Settings::from_path(&path)?;
    settings.validate()?;
    Ok(settings)
}
