use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_interval_secs: f64,
    pub snapshot_delay_ms: u64,
    pub max_rows: usize,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_interval_secs: 1.0,
            snapshot_delay_ms: 200,
            max_rows: 0,
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub truncate_to_width: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            truncate_to_width: true,
        }
    }
}

impl GeneralConfig {
    /// The configured interval, or the default when it is not positive.
    pub fn refresh_interval(&self) -> f64 {
        if self.refresh_interval_secs.is_finite() && self.refresh_interval_secs > 0.0 {
            self.refresh_interval_secs
        } else {
            GeneralConfig::default().refresh_interval_secs
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tasktop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
