//! Proximity Engine
//!
//! Platform-agnostic state machine that decides when a spot's clip should
//! play. Each position sample recomputes the nearest spot within the trigger
//! radius from scratch; a trigger fires only when that spot differs from the
//! one last triggered, so lingering at a spot plays its clip once.
//!
//! The engine owns no timer and performs no I/O. A scheduler feeds it
//! positions and forwards the returned [`TriggerEvent`]s to an audio player.
//!
//! # Phases
//!
//! ```text
//! Idle --update--> OutOfRange <--update--> AtSpot(w) --update--> AtSpot(w')
//!   ^                                                  (emits trigger for w')
//!   +------------------------- reset ---------------------------------+
//! ```

mod error;
mod state;

pub use error::ProximityError;
pub use state::{ProximityConfig, ProximityPhase, ProximityState, TriggerEvent, TriggerKind};

use crate::spot::{Position, Spot, SpotCatalog, SpotId};

/// Edge-triggered proximity engine over a fixed spot catalog
#[derive(Debug, Clone)]
pub struct ProximityEngine {
    catalog: SpotCatalog,
    config: ProximityConfig,
    state: ProximityState,
}

impl ProximityEngine {
    /// Create a new engine in Idle state
    ///
    /// `config` must be valid (see [`ProximityConfig::is_valid`]); this is
    /// only asserted in debug builds.
    pub fn new(catalog: SpotCatalog, config: ProximityConfig) -> Self {
        debug_assert!(config.is_valid(), "invalid trigger radius {}", config.radius_m);
        Self {
            catalog,
            config,
            state: ProximityState::default(),
        }
    }

    /// Create a new engine with the default 100 m radius
    pub fn with_default_radius(catalog: SpotCatalog) -> Self {
        Self::new(catalog, ProximityConfig::default())
    }

    /// Spot catalog
    pub fn catalog(&self) -> &SpotCatalog {
        &self.catalog
    }

    /// Engine configuration
    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Snapshot of the tracked state
    pub fn state(&self) -> ProximityState {
        self.state
    }

    /// Current phase
    pub fn phase(&self) -> ProximityPhase {
        self.state.phase()
    }

    /// Spot currently within radius, if any
    pub fn current_nearest(&self) -> Option<&Spot> {
        self.state.current_nearest.and_then(|id| self.catalog.get(id))
    }

    /// Spot within radius and its distance from the last position
    pub fn nearest(&self) -> Option<(SpotId, f64)> {
        let position = self.state.last_position?;
        let id = self.state.current_nearest?;
        let spot = self.catalog.get(id)?;
        Some((id, position.distance_to(&spot.position)))
    }

    /// Feed a new position sample
    ///
    /// Returns `Ok(Some(event))` when the sample lands within the radius of a
    /// spot other than the one last triggered. Invalid positions are rejected
    /// and leave the state untouched.
    pub fn update_position(
        &mut self,
        position: Position,
    ) -> Result<Option<TriggerEvent>, ProximityError> {
        if !position.is_valid() {
            return Err(ProximityError::InvalidPosition {
                latitude: position.latitude,
                longitude: position.longitude,
            });
        }

        self.state.last_position = Some(position);
        let distance = self.recompute_nearest();

        let Some(nearest) = self.state.current_nearest else {
            return Ok(None);
        };
        if self.state.last_triggered == Some(nearest) {
            return Ok(None);
        }

        self.state.last_triggered = Some(nearest);
        Ok(self.event_for(nearest, distance, TriggerKind::Arrival))
    }

    /// Force playback for the current location without a new sample
    ///
    /// Recomputes the nearest spot from the last known position and returns
    /// its clip, or the catalog fallback (index 0) when nothing is nearby or
    /// no position is known. `last_triggered` is left unchanged so periodic
    /// updates keep firing normally.
    pub fn force_trigger(&mut self) -> TriggerEvent {
        let distance = self.recompute_nearest();

        if let Some(event) = self
            .state
            .current_nearest
            .and_then(|id| self.event_for(id, distance, TriggerKind::Forced))
        {
            return event;
        }

        let fallback = self.catalog.fallback();
        TriggerEvent {
            spot: fallback.id,
            clip: fallback.clip.clone(),
            distance_m: self
                .state
                .last_position
                .map(|position| position.distance_to(&fallback.position)),
            kind: TriggerKind::Fallback,
        }
    }

    /// Clear all tracked state, returning to Idle
    pub fn reset(&mut self) {
        self.state = ProximityState::default();
    }

    /// Swap in a new catalog
    ///
    /// State is reset since spot ids refer to the previous catalog.
    pub fn replace_catalog(&mut self, catalog: SpotCatalog) {
        self.catalog = catalog;
        self.reset();
    }

    /// Recompute `current_nearest` from `last_position`
    ///
    /// Returns the distance to the closest spot (None without a position).
    fn recompute_nearest(&mut self) -> Option<f64> {
        let Some(position) = self.state.last_position else {
            self.state.current_nearest = None;
            return None;
        };

        let (id, distance) = self.catalog.closest(&position);
        self.state.current_nearest = if distance <= self.config.radius_m {
            Some(id)
        } else {
            None
        };
        Some(distance)
    }

    fn event_for(
        &self,
        id: SpotId,
        distance_m: Option<f64>,
        kind: TriggerKind,
    ) -> Option<TriggerEvent> {
        self.catalog.get(id).map(|spot| TriggerEvent {
            spot: id,
            clip: spot.clip.clone(),
            distance_m,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::calculate_distance;

    const STATION: Position = Position {
        latitude: 35.698466,
        longitude: 139.773114,
    };
    const ORIGIN: Position = Position {
        latitude: 0.0,
        longitude: 0.0,
    };
    const FAR_AWAY: Position = Position {
        latitude: -33.8688,
        longitude: 151.2093,
    };

    fn two_spot_engine() -> ProximityEngine {
        let catalog = SpotCatalog::from_entries(&[
            ("W0", 0.0, 0.0, "w0.mp3"),
            ("W1", 35.698466, 139.773114, "w1.mp3"),
        ])
        .unwrap();
        ProximityEngine::with_default_radius(catalog)
    }

    fn clip_of(event: &TriggerEvent) -> &str {
        event.clip.as_str()
    }

    #[test]
    fn test_engine_starts_idle() {
        let engine = two_spot_engine();
        assert_eq!(engine.phase(), ProximityPhase::Idle);
        assert_eq!(engine.state(), ProximityState::default());
        assert!(engine.nearest().is_none());
    }

    #[test]
    fn test_arrival_scenario() {
        let mut engine = two_spot_engine();

        let event = engine.update_position(STATION).unwrap().unwrap();
        assert_eq!(event.spot, SpotId(1));
        assert_eq!(clip_of(&event), "w1.mp3");
        assert_eq!(event.kind, TriggerKind::Arrival);
        assert_eq!(event.distance_m, Some(0.0));

        assert!(engine.update_position(STATION).unwrap().is_none());

        let event = engine.update_position(ORIGIN).unwrap().unwrap();
        assert_eq!(clip_of(&event), "w0.mp3");

        let event = engine.update_position(STATION).unwrap().unwrap();
        assert_eq!(clip_of(&event), "w1.mp3");
    }

    #[test]
    fn test_far_away_scenario() {
        let mut engine = two_spot_engine();

        assert!(engine.update_position(FAR_AWAY).unwrap().is_none());
        assert_eq!(engine.phase(), ProximityPhase::OutOfRange);
        assert!(engine.state().current_nearest.is_none());

        let event = engine.force_trigger();
        assert_eq!(event.spot, SpotId(0));
        assert_eq!(clip_of(&event), "w0.mp3");
        assert_eq!(event.kind, TriggerKind::Fallback);
    }

    #[test]
    fn test_lingering_fires_once() {
        let mut engine = two_spot_engine();
        let nearby = Position::new(35.6993, 139.773114); // 93 m from W1

        let fired = [STATION, nearby, STATION, nearby, nearby]
            .iter()
            .filter_map(|&pos| engine.update_position(pos).unwrap())
            .count();
        assert_eq!(fired, 1);
        assert_eq!(engine.phase(), ProximityPhase::AtSpot(SpotId(1)));
    }

    #[test]
    fn test_reentry_same_spot_does_not_refire() {
        let mut engine = two_spot_engine();

        assert!(engine.update_position(STATION).unwrap().is_some());
        assert!(engine.update_position(FAR_AWAY).unwrap().is_none());
        assert_eq!(engine.phase(), ProximityPhase::OutOfRange);
        assert!(engine.update_position(STATION).unwrap().is_none());
        assert_eq!(engine.state().last_triggered, Some(SpotId(1)));
    }

    #[test]
    fn test_reset_rearms_trigger() {
        let mut engine = two_spot_engine();

        assert!(engine.update_position(STATION).unwrap().is_some());
        engine.reset();
        assert_eq!(engine.phase(), ProximityPhase::Idle);
        assert_eq!(engine.state(), ProximityState::default());

        let event = engine.update_position(STATION).unwrap().unwrap();
        assert_eq!(event.spot, SpotId(1));
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        let sample = Position::new(35.6993, 139.773114);
        let exact = calculate_distance(
            sample.latitude,
            sample.longitude,
            STATION.latitude,
            STATION.longitude,
        );
        let catalog =
            SpotCatalog::from_entries(&[("W1", 35.698466, 139.773114, "w1.mp3")]).unwrap();

        let mut engine = ProximityEngine::new(catalog.clone(), ProximityConfig { radius_m: exact });
        let event = engine.update_position(sample).unwrap().unwrap();
        assert_eq!(event.distance_m, Some(exact));

        let mut engine = ProximityEngine::new(catalog, ProximityConfig { radius_m: exact - 1.0 });
        assert!(engine.update_position(sample).unwrap().is_none());
        assert_eq!(engine.phase(), ProximityPhase::OutOfRange);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid trigger radius")]
    fn test_new_rejects_nan_radius() {
        let catalog = SpotCatalog::from_entries(&[("W0", 0.0, 0.0, "w0.mp3")]).unwrap();
        let _ = ProximityEngine::new(catalog, ProximityConfig { radius_m: f64::NAN });
    }

    #[test]
    fn test_tie_break_prefers_lower_index() {
        let catalog = SpotCatalog::from_entries(&[
            ("east", 0.0, 0.0005, "east.mp3"),
            ("west", 0.0, -0.0005, "west.mp3"),
        ])
        .unwrap();
        let mut engine = ProximityEngine::with_default_radius(catalog);

        let event = engine.update_position(ORIGIN).unwrap().unwrap();
        assert_eq!(event.spot, SpotId(0));
        engine.reset();
        let event = engine.update_position(ORIGIN).unwrap().unwrap();
        assert_eq!(event.spot, SpotId(0));
    }

    #[test]
    fn test_switching_spots_fires_each_time() {
        let catalog = SpotCatalog::from_entries(&[
            ("dummy", 0.0, 0.0, "dummy.mp3"),
            ("station", 35.698466, 139.773114, "station.mp3"),
            ("udx", 35.700525, 139.772508, "udx.mp3"),
        ])
        .unwrap();
        let mut engine = ProximityEngine::with_default_radius(catalog);
        let udx = Position::new(35.700525, 139.772508);

        assert_eq!(engine.update_position(STATION).unwrap().unwrap().spot, SpotId(1));
        assert_eq!(engine.update_position(udx).unwrap().unwrap().spot, SpotId(2));
        assert_eq!(engine.update_position(STATION).unwrap().unwrap().spot, SpotId(1));
    }

    #[test]
    fn test_invalid_position_rejected() {
        let mut engine = two_spot_engine();
        engine.update_position(STATION).unwrap();
        let before = engine.state();

        let err = engine.update_position(Position::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, ProximityError::InvalidPosition { .. }));
        assert!(engine.update_position(Position::new(95.0, 0.0)).is_err());
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_force_trigger_at_spot() {
        let mut engine = two_spot_engine();
        engine.update_position(STATION).unwrap();

        let event = engine.force_trigger();
        assert_eq!(event.spot, SpotId(1));
        assert_eq!(event.kind, TriggerKind::Forced);
        assert_eq!(engine.state().last_triggered, Some(SpotId(1)));
    }

    #[test]
    fn test_force_trigger_keeps_last_triggered() {
        let mut engine = two_spot_engine();

        engine.update_position(FAR_AWAY).unwrap();
        let event = engine.force_trigger();
        assert_eq!(event.kind, TriggerKind::Fallback);
        assert!(engine.state().last_triggered.is_none());

        // Periodic updates still fire after a forced playback
        let event = engine.update_position(STATION).unwrap().unwrap();
        assert_eq!(event.spot, SpotId(1));
    }

    #[test]
    fn test_force_trigger_without_position() {
        let mut engine = two_spot_engine();
        let event = engine.force_trigger();
        assert_eq!(event.spot, SpotId(0));
        assert_eq!(event.kind, TriggerKind::Fallback);
        assert!(event.distance_m.is_none());
        assert_eq!(engine.phase(), ProximityPhase::Idle);
    }

    #[test]
    fn test_fallback_spot_can_be_nearest() {
        // Index 0 is a real spot for arrivals, distinct from "nothing nearby"
        let mut engine = two_spot_engine();
        let event = engine.update_position(ORIGIN).unwrap().unwrap();
        assert_eq!(event.spot, SpotId(0));
        assert_eq!(event.kind, TriggerKind::Arrival);
        assert_eq!(engine.phase(), ProximityPhase::AtSpot(SpotId(0)));
    }

    #[test]
    fn test_nearest_reports_distance() {
        let mut engine = two_spot_engine();
        engine.update_position(Position::new(35.6993, 139.773114)).unwrap();
        assert_eq!(engine.nearest(), Some((SpotId(1), 93.0)));
        assert_eq!(engine.current_nearest().unwrap().name.as_str(), "W1");
    }

    #[test]
    fn test_replace_catalog_resets_state() {
        let mut engine = two_spot_engine();
        engine.update_position(STATION).unwrap();

        let catalog =
            SpotCatalog::from_entries(&[("only", 35.698466, 139.773114, "only.mp3")]).unwrap();
        engine.replace_catalog(catalog);
        assert_eq!(engine.phase(), ProximityPhase::Idle);
        assert_eq!(engine.catalog().len(), 1);

        let event = engine.update_position(STATION).unwrap().unwrap();
        assert_eq!(clip_of(&event), "only.mp3");
    }
}
