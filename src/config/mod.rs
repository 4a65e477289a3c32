// src/config/mod.rs
pub mod preferences;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "biomedical-dsp.yaml";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub runner: RunnerConfig,
    pub visualization: VisualizationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub root_dir: PathBuf,
    pub unit_prefix: String,
    pub class_marker: String,
    pub slide_extension: String,
    pub script_extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            unit_prefix: "Unidad".to_string(),
            class_marker: "Clase".to_string(),
            slide_extension: "pdf".to_string(),
            script_extension: "py".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    pub interpreter: String,
    pub interpreter_args: Vec<String>,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// Variable that tells the script where to save its figures.
    pub figure_env_var: String,
    pub extra_env: Vec<(String, String)>,
    pub figure_extensions: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            interpreter_args: Vec::new(),
            timeout_secs: 60,
            poll_interval_ms: 10,
            figure_env_var: "DSP_FIGURE_DIR".to_string(),
            extra_env: vec![("MPLBACKEND".to_string(), "Agg".to_string())],
            figure_extensions: vec!["png".to_string(), "svg".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VisualizationConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub nav_panel_width: f32,
    pub plot_height: f32,
    pub preferences_path: PathBuf,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            nav_panel_width: 280.0,
            plot_height: 220.0,
            preferences_path: PathBuf::from("preferences.yaml"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    pub log_file: String,
    pub run_history_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("logs"),
            log_file: "course.log".to_string(),
            run_history_file: "run_history.csv".to_string(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, String> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file: {}", e))?;

    serde_yaml::from_str(&config_str)
        .map_err(|e| format!("Failed to parse config file: {}", e))
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), String> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    fs::write(path, yaml)
        .map_err(|e| format!("Failed to write config file: {}", e))
}

/// Defaults when `path` does not exist; parse failures are still errors.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, String> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}
