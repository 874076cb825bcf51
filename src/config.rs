use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application preferences (`config.toml`). The player's game setup lives in
/// the settings store instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_celebration_threshold")]
    pub celebration_threshold: f64,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_feedback_delay_ms() -> u64 {
    1500
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_celebration_threshold() -> f64 {
    80.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            feedback_delay_ms: default_feedback_delay_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            celebration_threshold: default_celebration_threshold(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("numdr")
            .join("config.toml")
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Clamp timings into usable ranges and reset an unknown theme.
    /// Call after deserialization.
    pub fn validate(&mut self, available_themes: &[String]) {
        self.feedback_delay_ms = self.feedback_delay_ms.clamp(200, 10_000);
        self.tick_rate_ms = self.tick_rate_ms.clamp(16, 1000);
        if !self.celebration_threshold.is_finite() {
            self.celebration_threshold = default_celebration_threshold();
        }
        self.celebration_threshold = self.celebration_threshold.clamp(0.0, 100.0);
        if !available_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
    }
}
