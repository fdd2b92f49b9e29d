//! Application configuration, stored as JSON.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "fps": 30, "params": { "burst_count": 50 }, "start_day": "kiss" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::day::{Day, DayConfig};
use crate::error::ConfigError;
use crate::params::FieldParams;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Target frame rate of the active section.
    pub fps: f32,
    /// Day shown first.
    pub start_day: Day,
    /// Fixed RNG seed; random per run when absent.
    pub seed: Option<u64>,
    pub muted: bool,
    /// Play cues on the default output device; when off they are only logged.
    pub audio: bool,
    pub params: FieldParams,
    /// One entry per day, in storybook order.
    pub days: Vec<DayConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            fps: 60.0,
            start_day: Day::Rose,
            seed: None,
            muted: false,
            audio: true,
            params: FieldParams::default(),
            days: DayConfig::storybook(),
        }
    }
}

impl AppConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        if !(self.fps.is_finite() && self.fps >= 1.0) {
            return Err(ConfigError::InvalidValue {
                name: "fps",
                value: self.fps,
            });
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidValue {
                name: "window size",
                value: 0.0,
            });
        }
        // Exactly one entry per day, in order.
        let days: Vec<Day> = self.days.iter().map(|d| d.day).collect();
        if days != Day::ALL {
            return Err(ConfigError::InvalidValue {
                name: "days",
                value: self.days.len() as f32,
            });
        }
        Ok(())
    }

    pub fn day(&self, day: Day) -> &DayConfig {
        &self.days[day.index()]
    }
}
