//! Guide configuration
//!
//! JSON-backed settings for a guide session: trigger radius, sampling cadence,
//! clip location and the spot catalog. Every field has a default, so an empty
//! object (`{}`) yields the built-in Akihabara walk.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spot_voice_core::spot::MAX_SPOTS;
use spot_voice_core::{CatalogError, ProximityConfig, Spot, SpotCatalog, SpotId};

use crate::error::ConfigError;

/// One spot entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Clip file name, appended to `clip_base_url` at playback time.
    pub clip: String,
}

impl SpotConfig {
    pub fn new(name: &str, latitude: f64, longitude: f64, clip: &str) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
            clip: clip.to_string(),
        }
    }
}

/// Settings for a guide session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Trigger radius in meters.
    pub radius_m: f64,
    /// Interval between position samples.
    pub sample_interval_ms: u64,
    /// How long to wait for a position fix before skipping a tick.
    pub fix_timeout_ms: u64,
    /// Prefix joined with each spot's clip to form the playback URL.
    pub clip_base_url: String,
    /// Ordered catalog; index 0 doubles as the fallback clip.
    pub spots: Vec<SpotConfig>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            radius_m: 100.0,
            sample_interval_ms: 2000,
            fix_timeout_ms: 500,
            clip_base_url: String::new(),
            spots: builtin_spots(),
        }
    }
}

impl GuideConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.proximity_config().is_valid() {
            return Err(ConfigError::InvalidRadius(self.radius_m));
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("sample_interval_ms"));
        }
        if self.fix_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("fix_timeout_ms"));
        }
        self.catalog().map(|_| ())
    }

    /// Build the spot catalog, in file order.
    pub fn catalog(&self) -> Result<SpotCatalog, ConfigError> {
        if self.spots.len() > MAX_SPOTS {
            return Err(CatalogError::CatalogFull.into());
        }

        let spots = self
            .spots
            .iter()
            .enumerate()
            .map(|(index, spot)| {
                Spot::new(
                    SpotId(index as u16),
                    &spot.name,
                    spot.latitude,
                    spot.longitude,
                    &spot.clip,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SpotCatalog::from_spots(spots)?)
    }

    pub fn proximity_config(&self) -> ProximityConfig {
        ProximityConfig {
            radius_m: self.radius_m,
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn fix_timeout(&self) -> Duration {
        Duration::from_millis(self.fix_timeout_ms)
    }
}

/// Built-in walk around Akihabara, led by a fallback entry at (0, 0).
pub fn builtin_spots() -> Vec<SpotConfig> {
    vec![
        SpotConfig::new("Fallback", 0.0, 0.0, "fallback.mp3"),
        SpotConfig::new(
            "Akihabara Station, Electric Town exit",
            35.698466,
            139.773114,
            "akihabara_station.mp3",
        ),
        SpotConfig::new("AKIHABARA UDX", 35.700525, 139.772508, "akihabara_udx.mp3"),
        SpotConfig::new("Kanda Myojin", 35.701922, 139.767846, "kanda_myojin.mp3"),
    ]
}
