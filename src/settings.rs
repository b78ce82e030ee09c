//! Persisted packer settings
//!
//! Defaults for a run, stored as JSON at
//! `{data_dir}/Audio Folder Packer/settings.json`. Command-line flags
//! override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder capacity used when nothing else is configured (seconds)
pub const DEFAULT_FOLDER_CAPACITY: u64 = 100;

fn default_folder_capacity() -> u64 {
    DEFAULT_FOLDER_CAPACITY
}

fn default_clear_destination() -> bool {
    true
}

/// Settings for a packing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackerSettings {
    /// Capacity of each output folder, in seconds
    #[serde(default = "default_folder_capacity")]
    pub folder_capacity: u64,
    /// Strategy name; prompt interactively when unset
    #[serde(default)]
    pub strategy: Option<String>,
    /// Manifest of `name HH:MM:SS` lines
    #[serde(default)]
    pub input_file: Option<PathBuf>,
    /// Directory holding the audio files named in the manifest
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Where summaries and folder copies are written
    #[serde(default)]
    pub destination_dir: Option<PathBuf>,
    /// Empty the destination before writing
    #[serde(default = "default_clear_destination")]
    pub clear_destination: bool,
}

impl Default for PackerSettings {
    fn default() -> Self {
        Self {
            folder_capacity: DEFAULT_FOLDER_CAPACITY,
            strategy: None,
            input_file: None,
            source_dir: None,
            destination_dir: None,
            clear_destination: true,
        }
    }
}

impl PackerSettings {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Get the app data directory, creating it if needed
    fn get_app_data_dir() -> Result<PathBuf, String> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| "Could not determine data directory".to_string())?;

        let app_dir = data_dir.join("Audio Folder Packer");

        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir)
                .map_err(|e| format!("Failed to create app data directory: {}", e))?;
        }

        Ok(app_dir)
    }

    /// Default location of the settings file
    pub fn default_path() -> Result<PathBuf, String> {
        Ok(Self::get_app_data_dir()?.join(Self::SETTINGS_FILE))
    }

    /// Load settings from the default location, or return defaults
    pub fn load() -> Self {
        match Self::default_path().and_then(|p| Self::load_from(&p)) {
            Ok(settings) => {
                log::debug!("Loaded settings from disk");
                settings
            }
            Err(e) => {
                log::debug!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err(format!("Settings file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings: {}", e))?;

        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<PathBuf, String> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        log::debug!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = PackerSettings::default();
        assert_eq!(settings.folder_capacity, 100);
        assert!(settings.strategy.is_none());
        assert!(settings.clear_destination);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = PackerSettings {
            folder_capacity: 4800,
            strategy: Some("best_fit".to_string()),
            input_file: Some(PathBuf::from("/music/AudiosInfo.txt")),
            source_dir: Some(PathBuf::from("/music/Audios")),
            destination_dir: Some(PathBuf::from("/music/out")),
            clear_destination: false,
        };

        settings.save_to(&path).unwrap();
        let loaded = PackerSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "strategy": "worst_fit_heap" }"#).unwrap();

        let loaded = PackerSettings::load_from(&path).unwrap();
        assert_eq!(loaded.folder_capacity, DEFAULT_FOLDER_CAPACITY);
        assert_eq!(loaded.strategy.as_deref(), Some("worst_fit_heap"));
        assert!(loaded.clear_destination);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = PackerSettings::load_from(&temp_dir.path().join("nope.json"));
        assert!(result.unwrap_err().contains("not found"));
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let result = PackerSettings::load_from(&path);
        assert!(result.unwrap_err().contains("Failed to parse settings"));
    }
}
