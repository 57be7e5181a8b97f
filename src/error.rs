use std::path::PathBuf;

use spot_voice_core::{CatalogError, ProximityError};

use crate::player::PlaybackError;
use crate::position::PositionError;

/// Errors from loading or validating a guide configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid spot catalog: {0}")]
    Catalog(CatalogError),

    #[error("Invalid radius: {0} m")]
    InvalidRadius(f64),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Track line {line}: {reason}")]
    Track { line: usize, reason: String },
}

impl From<CatalogError> for ConfigError {
    fn from(err: CatalogError) -> Self {
        ConfigError::Catalog(err)
    }
}

/// Errors surfaced by a running guide session.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Position error: {0}")]
    Position(#[from] PositionError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Proximity error: {0}")]
    Proximity(ProximityError),
}

impl From<ProximityError> for GuideError {
    fn from(err: ProximityError) -> Self {
        GuideError::Proximity(err)
    }
}
