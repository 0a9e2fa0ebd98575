use std::path::Path;

use drill_core::EffectiveSettings;

use crate::config::save_settings;

/// Show the merged settings, optionally persisting them as the new defaults.
pub fn run(path: &Path, settings: &EffectiveSettings, save: bool) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if save {
        save_settings(path, &settings.to_settings())?;
        println!("Saved to {}", path.display());
    } else {
        println!("Settings file: {}", path.display());
    }
    Ok(())
}
