//! Track configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MakerError, Result};
use crate::instrument::Instrument;

/// Track length in grid steps
pub const DEFAULT_SIZE: i64 = 200;
/// Playback time units per grid step
pub const TEMPO: f64 = 0.25;

/// Fixed parameters of a track. Missing fields in a config file take the
/// default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub size: i64,
    pub tempo: f64,
    pub instrument: Instrument,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tempo: TEMPO,
            instrument: Instrument::default(),
        }
    }
}

impl TrackConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TrackConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Like [`TrackConfig::load`], but any failure yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default track config, failed to load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(MakerError::InvalidConfig(format!("size must be positive, got {}", self.size)));
        }
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(MakerError::InvalidConfig(format!("tempo must be positive, got {}", self.tempo)));
        }
        Ok(())
    }
}
