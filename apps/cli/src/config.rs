//! Settings file and API key lookup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drill_core::Settings;

pub const API_KEY_ENV: &str = "WANIKANI_API_KEY";

/// Default location of the settings file.
pub fn settings_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine the config directory")?;
    Ok(dir.join("kanji-drill").join("settings.json"))
}

/// Load settings, falling back to defaults when the file does not exist.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Pick the API key from the flag or the environment.
pub fn resolve_api_key(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
        .with_context(|| format!("An API key is required: pass --api-key or set {API_KEY_ENV}"))
}
