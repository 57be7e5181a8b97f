//! Shared proximity engine
//!
//! [`SharedEngine`] wraps a [`ProximityEngine`] behind a single mutex so that
//! updates from the sampling loop and forced triggers from elsewhere are
//! serialized. Each call holds the lock only for the synchronous engine
//! operation, never across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use spot_voice_core::{
    Position, ProximityEngine, ProximityError, ProximityPhase, ProximityState, SpotCatalog,
    SpotId, TriggerEvent,
};

#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ProximityEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ProximityEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Engine operations never leave the state half-updated, so a poisoned
    // lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, ProximityEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update_position(
        &self,
        position: Position,
    ) -> Result<Option<TriggerEvent>, ProximityError> {
        self.lock().update_position(position)
    }

    pub fn force_trigger(&self) -> TriggerEvent {
        self.lock().force_trigger()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn replace_catalog(&self, catalog: SpotCatalog) {
        self.lock().replace_catalog(catalog);
    }

    pub fn phase(&self) -> ProximityPhase {
        self.lock().phase()
    }

    pub fn state(&self) -> ProximityState {
        self.lock().state()
    }

    pub fn nearest(&self) -> Option<(SpotId, f64)> {
        self.lock().nearest()
    }

    /// Display name of a spot, for logging and status output.
    pub fn spot_name(&self, id: SpotId) -> Option<String> {
        self.lock()
            .catalog()
            .get(id)
            .map(|spot| spot.name.as_str().to_string())
    }
}
