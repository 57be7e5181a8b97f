//! Position source port
//!
//! A guide session pulls one sample per tick from a [`PositionSource`]. A
//! missing fix is not fatal: the session just skips that tick.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use spot_voice_core::Position;

use crate::error::ConfigError;

/// Errors from sampling a position.
#[derive(Debug, thiserror::Error)]
pub enum PositionError {
    /// No fix available right now.
    #[error("No position fix available")]
    NoFix,

    /// The fix did not arrive in time.
    #[error("Position fix timed out after {0:?}")]
    Timeout(Duration),

    /// The source itself failed (permission denied, device gone).
    #[error("Position source unavailable: {0}")]
    Unavailable(String),
}

impl PositionError {
    /// True for failures that only mean "try again next tick".
    pub fn is_transient(&self) -> bool {
        matches!(self, PositionError::NoFix | PositionError::Timeout(_))
    }
}

/// Supplies the user's current position on demand.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Sample the current position.
    async fn sample(&mut self) -> Result<Position, PositionError>;
}

/// Replays a fixed sequence of samples, then reports [`PositionError::NoFix`].
#[derive(Debug, Default)]
pub struct ScriptedSource {
    samples: VecDeque<Option<Position>>,
}

impl ScriptedSource {
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            samples: positions.into_iter().map(Some).collect(),
        }
    }

    /// Queue a sample; `None` simulates a tick without a fix.
    pub fn push(&mut self, sample: Option<Position>) {
        self.samples.push_back(sample);
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.samples.is_empty()
    }
}

#[async_trait]
impl PositionSource for ScriptedSource {
    async fn sample(&mut self) -> Result<Position, PositionError> {
        self.samples
            .pop_front()
            .flatten()
            .ok_or(PositionError::NoFix)
    }
}

/// Parse a track of `latitude,longitude` lines.
///
/// Blank lines and lines starting with `#` are skipped. A line holding only
/// `-` stands for a tick without a fix.
pub fn parse_track(text: &str) -> Result<Vec<Option<Position>>, ConfigError> {
    let mut track = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "-" {
            track.push(None);
            continue;
        }

        let track_err = |reason: &str| ConfigError::Track {
            line: index + 1,
            reason: reason.to_string(),
        };

        let (lat, lon) = line
            .split_once(',')
            .ok_or_else(|| track_err("expected `latitude,longitude`"))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| track_err("invalid latitude"))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| track_err("invalid longitude"))?;

        track.push(Some(Position::new(latitude, longitude)));
    }

    Ok(track)
}
