use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Difficulty, GameConfiguration, MapPreset};

const APP_DIR_NAME: &str = "micro-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Sound menu options, in menu order.
pub const SOUND_OPTIONS: [bool; 2] = [true, false];

/// Number of rows in the settings menu.
pub const SETTINGS_ROWS: usize = 4;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Menu selections remembered between runs, stored as preset indices.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSettings {
    pub selected_setting: usize,
    pub selected_difficulty: usize,
    pub selected_map_size: usize,
    pub selected_sound: usize,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            selected_setting: 0,
            selected_difficulty: 1,
            selected_map_size: 2,
            selected_sound: 0,
        }
    }
}

impl PersistedSettings {
    /// Replaces any out-of-range index with its default.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, value: usize, len: usize, fallback: usize| {
            if value < len {
                value
            } else {
                tracing::warn!(setting = name, value, "stored index out of range, using default");
                fallback
            }
        };

        Self {
            selected_setting: pick(
                "selectedSetting",
                self.selected_setting,
                SETTINGS_ROWS,
                defaults.selected_setting,
            ),
            selected_difficulty: pick(
                "selectedDifficulty",
                self.selected_difficulty,
                Difficulty::ALL.len(),
                defaults.selected_difficulty,
            ),
            selected_map_size: pick(
                "selectedMapSize",
                self.selected_map_size,
                MapPreset::ALL.len(),
                defaults.selected_map_size,
            ),
            selected_sound: pick(
                "selectedSound",
                self.selected_sound,
                SOUND_OPTIONS.len(),
                defaults.selected_sound,
            ),
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::ALL
            .get(self.selected_difficulty)
            .copied()
            .unwrap_or(Difficulty::Medium)
    }

    #[must_use]
    pub fn map_preset(&self) -> MapPreset {
        MapPreset::ALL
            .get(self.selected_map_size)
            .copied()
            .unwrap_or(MapPreset::Medium)
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        SOUND_OPTIONS
            .get(self.selected_sound)
            .copied()
            .unwrap_or(true)
    }

    /// Selects `difficulty` by its preset index.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if let Some(index) = Difficulty::ALL.iter().position(|d| *d == difficulty) {
            self.selected_difficulty = index;
        }
    }

    /// Selects `map` by its preset index.
    pub fn set_map_preset(&mut self, map: MapPreset) {
        if let Some(index) = MapPreset::ALL.iter().position(|m| *m == map) {
            self.selected_map_size = index;
        }
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        if let Some(index) = SOUND_OPTIONS.iter().position(|s| *s == enabled) {
            self.selected_sound = index;
        }
    }

    /// Resolves the selections into session values.
    #[must_use]
    pub fn configuration(&self) -> GameConfiguration {
        GameConfiguration::from_presets(self.difficulty(), self.map_preset(), self.sound_enabled())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings, falling back to defaults when the file is unusable.
#[must_use]
pub fn load_settings() -> PersistedSettings {
    let path = settings_path();
    match load_settings_from_path(&path) {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "using default settings");
            PersistedSettings::default()
        }
    }
}

/// Saves settings, creating parent directories when needed.
pub fn save_settings(settings: &PersistedSettings) -> Result<(), SettingsError> {
    save_settings_to_path(&settings_path(), settings)
}

/// Reads settings from `path`.
///
/// A missing file yields the defaults; missing keys take their defaults.
pub fn load_settings_from_path(path: &Path) -> Result<PersistedSettings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PersistedSettings::default()),
        Err(e) => return Err(e.into()),
    };

    let settings = serde_json::from_str::<PersistedSettings>(&raw)?;
    Ok(settings.sanitized())
}

pub fn save_settings_to_path(path: &Path, settings: &PersistedSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(settings)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_settings_from_path, save_settings_to_path, PersistedSettings};
    use crate::config::{Difficulty, MapPreset};

    #[test]
    fn saved_settings_load_back() {
        let path = unique_test_path("round_trip");
        let settings = PersistedSettings {
            selected_setting: 3,
            selected_difficulty: 3,
            selected_map_size: 0,
            selected_sound: 1,
        };

        save_settings_to_path(&path, &settings).expect("settings save should succeed");
        let loaded = load_settings_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, settings);
        cleanup_test_path(&path);
    }

    #[test]
    fn file_uses_camel_case_keys() {
        let json = serde_json::to_string(&PersistedSettings::default()).expect("serializable");

        assert!(json.contains("\"selectedDifficulty\":1"));
        assert!(json.contains("\"selectedMapSize\":2"));
    }

    #[test]
    fn missing_file_returns_defaults() {
        let path = unique_test_path("missing");
        let loaded = load_settings_from_path(&path).expect("missing file should return defaults");
        assert_eq!(loaded, PersistedSettings::default());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let path = unique_test_path("partial");
        write_raw(&path, r#"{"selectedDifficulty": 2}"#);

        let loaded = load_settings_from_path(&path).expect("partial file should load");

        assert_eq!(loaded.selected_difficulty, 2);
        assert_eq!(loaded.selected_map_size, 2);
        assert_eq!(loaded.selected_sound, 0);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_file_returns_error() {
        let path = unique_test_path("malformed");
        write_raw(&path, "not-json");

        assert!(
            load_settings_from_path(&path).is_err(),
            "malformed file should return Err"
        );
        cleanup_test_path(&path);
    }

    #[test]
    fn out_of_range_indices_fall_back() {
        let settings = PersistedSettings {
            selected_setting: 9,
            selected_difficulty: 4,
            selected_map_size: 1,
            selected_sound: 7,
        }
        .sanitized();

        assert_eq!(settings.selected_setting, 0);
        assert_eq!(settings.selected_difficulty, 1);
        assert_eq!(settings.selected_map_size, 1);
        assert_eq!(settings.selected_sound, 0);
    }

    #[test]
    fn indices_resolve_to_presets() {
        let mut settings = PersistedSettings::default();
        settings.set_difficulty(Difficulty::Ultra);
        settings.set_map_preset(MapPreset::Tiny);
        settings.set_sound_enabled(false);

        let config = settings.configuration();

        assert_eq!(config.move_interval, 5);
        assert_eq!(config.map_size, 3);
        assert_eq!(config.starting_length, 2);
        assert!(!config.sound_enabled);
    }

    fn write_raw(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("micro-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
