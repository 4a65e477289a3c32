// src/config/preferences.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppearanceMode {
    #[default]
    Dark,
    Light,
    System,
}

impl AppearanceMode {
    pub const ALL: [AppearanceMode; 3] = [
        AppearanceMode::Dark,
        AppearanceMode::Light,
        AppearanceMode::System,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppearanceMode::Dark => "Oscuro",
            AppearanceMode::Light => "Claro",
            AppearanceMode::System => "Sistema",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTheme {
    #[default]
    Blue,
    Green,
    DarkBlue,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [ColorTheme::Blue, ColorTheme::Green, ColorTheme::DarkBlue];

    pub fn label(&self) -> &'static str {
        match self {
            ColorTheme::Blue => "Azul",
            ColorTheme::Green => "Verde",
            ColorTheme::DarkBlue => "Azul oscuro",
        }
    }

    /// Selection accent as RGB.
    pub fn accent_rgb(&self) -> [u8; 3] {
        match self {
            ColorTheme::Blue => [31, 106, 165],
            ColorTheme::Green => [45, 140, 90],
            ColorTheme::DarkBlue => [20, 60, 120],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Preferences {
    pub appearance_mode: AppearanceMode,
    pub color_theme: ColorTheme,
}

/// A missing file yields the defaults.
pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<Preferences, String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read preferences {}: {}", path.display(), e))?;
    serde_yaml::from_str(&text)
        .map_err(|e| format!("Failed to parse preferences {}: {}", path.display(), e))
}

pub fn save_preferences<P: AsRef<Path>>(preferences: &Preferences, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(preferences)
        .map_err(|e| format!("Failed to serialize preferences: {}", e))?;
    fs::write(path, yaml)
        .map_err(|e| format!("Failed to write preferences {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load_preferences(dir.path().join("none.yaml")).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.appearance_mode, AppearanceMode::Dark);
    }

    #[test]
    fn saved_theme_is_restored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        let prefs = Preferences {
            appearance_mode: AppearanceMode::Light,
            color_theme: ColorTheme::Green,
        };
        save_preferences(&prefs, &path).unwrap();
        assert_eq!(load_preferences(&path).unwrap(), prefs);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        fs::write(&path, "appearance_mode: Purple\n").unwrap();
        assert!(load_preferences(&path).is_err());
    }
}
