use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::StripConfig;

/// Returns the platform-specific base config directory.
///
/// Resolution order:
/// 1. `XDG_CONFIG_HOME`
/// 2. `$HOME/.config`
/// 3. `%USERPROFILE%/.config`
pub fn config_base_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home).join(".config"));
    }
    std::env::var_os("USERPROFILE").map(|home| PathBuf::from(home).join(".config"))
}

/// Returns the path to `~/.config/tabstrip/strip.ron`.
fn config_path() -> Option<PathBuf> {
    config_base_dir().map(|base| base.join("tabstrip").join("strip.ron"))
}

/// Reads and parses a config file.
pub fn load_config_from(path: &Path) -> anyhow::Result<StripConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = StripConfig::from_ron_str(&contents)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(config)
}

/// Loads the config from disk, falling back to defaults on any error.
pub fn load_config() -> StripConfig {
    let Some(path) = config_path() else {
        return StripConfig::default();
    };
    if !path.exists() {
        return StripConfig::default();
    }
    match load_config_from(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("using default strip config: {err:#}");
            StripConfig::default()
        }
    }
}

/// Serializes the config as pretty RON into `path`, creating parent dirs.
pub fn save_config_to(config: &StripConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let pretty = ron::ser::PrettyConfig::default();
    let serialized =
        ron::ser::to_string_pretty(config, pretty).context("failed to serialize strip config")?;
    fs::write(path, serialized).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Persists the config to the default location. Errors are logged.
pub fn save_config(config: &StripConfig) {
    let Some(path) = config_path() else {
        return;
    };
    if let Err(err) = save_config_to(config, &path) {
        log::warn!("could not save strip config: {err:#}");
    }
}
