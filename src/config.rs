// Configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{PanelConfig, ThemeConfig};
use crate::panel::ViewOptions;

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("planto");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn load_config() -> Result<PanelConfig> {
    load_config_from(&get_config_path()?)
}

/// Load the config at `path`, writing the defaults there first if it is missing.
pub fn load_config_from(path: &Path) -> Result<PanelConfig> {
    if !path.exists() {
        let default_config = PanelConfig::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path).context("Failed to read config file")?;

    let config: PanelConfig = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &PanelConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, contents).context("Failed to write config file")?;

    Ok(())
}

/// Read the panel style file if the view is allowed to load it.
///
/// Falls back to the default theme when the path is outside the view's
/// resource roots, missing, or malformed.
pub fn load_theme(path: &Path, options: &ViewOptions) -> ThemeConfig {
    if !options.permits(path) {
        tracing::warn!(path = %path.display(), "style file is outside the panel resource roots");
        return ThemeConfig::default();
    }

    let Ok(contents) = fs::read_to_string(path) else {
        return ThemeConfig::default();
    };

    match toml::from_str(&contents) {
        Ok(theme) => theme,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed style file");
            ThemeConfig::default()
        }
    }
}
