//! Settings loader for config.toml

use std::path::{Path, PathBuf};

use cform_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "cform";

/// `<config dir>/cform`, if the platform has a config directory
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Load settings from the default config directory.
///
/// Returns default settings if there is no config directory or no file.
pub fn load_settings() -> Settings {
    match default_config_dir() {
        Some(dir) => load_settings_from(&dir),
        None => {
            debug!("No config directory on this platform, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from `config.toml` inside `config_dir`.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings_from(config_dir: &Path) -> Settings {
    let config_path = config_dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match read_settings(&config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            Settings::default()
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings_from(temp.path());

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let config = r#"
[ui]
cell_width_px = 10
resize_debounce_ms = 250

[behavior]
confirm_quit = false
"#;
        std::fs::write(temp.path().join("config.toml"), config).unwrap();

        let settings = load_settings_from(temp.path());

        assert_eq!(settings.ui.cell_width_px, 10);
        assert_eq!(settings.ui.resize_debounce_ms, 250);
        assert_eq!(settings.ui.label_width, 24);
        assert!(!settings.behavior.confirm_quit);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[ui\ncell_width_px = ").unwrap();

        let settings = load_settings_from(temp.path());

        assert_eq!(settings, Settings::default());
    }
}
