// Settings service
// TOML persistence for application settings

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::AppSettings;

/// Default settings path under the platform config directory.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pet-reminder").map(|dirs| dirs.config_dir().join("settings.toml"))
}

/// Load settings from a TOML file; a missing file yields defaults.
pub fn load(path: &Path) -> Result<AppSettings> {
    if !path.exists() {
        log::info!("No settings file at {:?}, using defaults", path);
        return Ok(AppSettings::default());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read settings file: {:?}", path))?;
    let settings: AppSettings =
        toml::from_str(&content).context(format!("Invalid settings file: {:?}", path))?;
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;
    Ok(settings)
}

/// Save settings as TOML, creating parent directories as needed.
pub fn save(settings: &AppSettings, path: &Path) -> Result<()> {
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create settings directory: {:?}", parent))?;
        }
    }

    let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, content).context(format!("Failed to write settings file: {:?}", path))?;
    Ok(())
}
