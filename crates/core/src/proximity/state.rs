//! Proximity State Types
//!
//! Pure data types for proximity tracking. Owned and mutated only by
//! [`ProximityEngine`](super::ProximityEngine).

use crate::spot::{ClipRef, Position, SpotId};

/// Tracked proximity state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProximityState {
    /// Most recent accepted position sample
    pub last_position: Option<Position>,
    /// Spot within radius of `last_position` (None = nothing nearby)
    pub current_nearest: Option<SpotId>,
    /// Spot whose clip was last triggered by an arrival
    pub last_triggered: Option<SpotId>,
}

impl ProximityState {
    /// Phase derived from the current state
    pub fn phase(&self) -> ProximityPhase {
        match (self.last_position, self.current_nearest) {
            (None, _) => ProximityPhase::Idle,
            (Some(_), None) => ProximityPhase::OutOfRange,
            (Some(_), Some(id)) => ProximityPhase::AtSpot(id),
        }
    }
}

/// Proximity phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProximityPhase {
    /// No position received yet
    #[default]
    Idle,
    /// Position known, no spot within radius
    OutOfRange,
    /// Position within radius of the given spot
    AtSpot(SpotId),
}

/// Why a trigger was emitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// Arrival at a spot different from the last triggered one
    Arrival,
    /// Forced playback of the spot currently within radius
    Forced,
    /// Forced playback with nothing nearby; catalog fallback entry
    Fallback,
}

/// Request to play a spot's clip
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerEvent {
    /// Spot whose clip should play
    pub spot: SpotId,
    /// Clip reference for the audio player
    pub clip: ClipRef,
    /// Distance to the spot in meters (None if no position is known)
    pub distance_m: Option<f64>,
    /// Trigger origin
    pub kind: TriggerKind,
}

/// Configuration for the proximity engine
///
/// The radius is not checked here. Callers loading it from outside must
/// reject values for which [`ProximityConfig::is_valid`] is false: a NaN or
/// negative radius never matches any spot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityConfig {
    /// Trigger radius in meters; a spot at exactly this distance counts as nearby
    pub radius_m: f64,
}

impl ProximityConfig {
    /// Check that the radius is finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.radius_m.is_finite() && self.radius_m >= 0.0
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self { radius_m: 100.0 }
    }
}
