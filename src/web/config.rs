use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::hud::{HudSettings, DEFAULT_LOCATION};
use crate::telemetry::{BaselinePolicy, Coordinate};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid location '{0}', expected \"lat, lng\"")]
    InvalidLocation(String),
    #[error("invalid duration '{value}': {message}")]
    InvalidDuration { value: String, message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub hud: HudConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HudConfig {
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_weather_stale_after")]
    pub weather_stale_after: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            weather_stale_after: default_weather_stale_after(),
        }
    }
}

fn default_location() -> String {
    format!(
        "{}, {}",
        DEFAULT_LOCATION.latitude_deg, DEFAULT_LOCATION.longitude_deg
    )
}

fn default_weather_stale_after() -> String {
    "30m".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub baseline_policy: BaselinePolicy,
    pub replay: Option<ReplayConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    pub file: PathBuf,
    /// Fixed spacing between replayed samples; recorded deltas when unset.
    pub pace: Option<String>,
}

impl ReplayConfig {
    pub fn pace(&self) -> Result<Option<std::time::Duration>, ConfigError> {
        self.pace.as_deref().map(parse_duration).transpose()
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn hud_settings(&self) -> Result<HudSettings, ConfigError> {
        let default_location = Coordinate::from_coordinates(&self.hud.default_location)
            .ok_or_else(|| ConfigError::InvalidLocation(self.hud.default_location.clone()))?;

        let stale_after = parse_duration(&self.hud.weather_stale_after)?;
        let weather_stale_after =
            chrono::Duration::from_std(stale_after).map_err(|e| ConfigError::InvalidDuration {
                value: self.hud.weather_stale_after.clone(),
                message: e.to_string(),
            })?;

        Ok(HudSettings {
            default_location,
            weather_stale_after,
            baseline_policy: self.telemetry.baseline_policy,
        })
    }
}

fn parse_duration(value: &str) -> Result<std::time::Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
        value: value.to_string(),
        message: e.to_string(),
    })
}
