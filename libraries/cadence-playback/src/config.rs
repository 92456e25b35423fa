//! Playback configuration

use crate::error::{PlaybackError, Result};
use crate::history::DEFAULT_HISTORY_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the playback manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Maximum history size (default: 50, minimum: 2)
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Decoder volume while ducked for a transient focus loss (default: 0.3)
    #[serde(default = "default_duck_volume")]
    pub duck_volume: f32,

    /// Start playback as soon as a track is prepared (default: true)
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

impl PlaybackConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables are prefixed with `CADENCE_`, e.g.
    /// `CADENCE_HISTORY_SIZE=100`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(PlaybackError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings =
            settings.add_source(config::Environment::with_prefix("CADENCE").try_parsing(true));

        let config: Self = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.history_size < 2 {
            return Err(PlaybackError::Config(format!(
                "history_size must be at least 2 (got {})",
                self.history_size
            )));
        }

        if !(0.0..=1.0).contains(&self.duck_volume) {
            return Err(PlaybackError::Config(format!(
                "duck_volume must be within 0.0..=1.0 (got {})",
                self.duck_volume
            )));
        }

        Ok(())
    }
}

// Default values
fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

fn default_duck_volume() -> f32 {
    0.3
}

fn default_autoplay() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            duck_volume: default_duck_volume(),
            autoplay: default_autoplay(),
        }
    }
}
