//! Guide session
//!
//! Drives a [`SharedEngine`] from a [`PositionSource`] on a fixed interval and
//! forwards arrivals to an [`AudioPlayer`]. This is the scheduler side of the
//! engine: the engine itself holds no timer.
//!
//! A running session also accepts [`GuideCommand`]s, so a "talk now" or
//! "stop voice" request is served between ticks without a second owner of
//! the player.

use std::time::Duration;

use spot_voice_core::{ProximityEngine, TriggerEvent, TriggerKind};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::GuideConfig;
use crate::engine::SharedEngine;
use crate::error::{ConfigError, GuideError};
use crate::player::{AudioPlayer, ClipResolver, PlaybackError};
use crate::position::{PositionError, PositionSource};

/// Requests served by [`GuideSession::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideCommand {
    /// Play the clip for the current location right away.
    TalkNow,
    /// Stop the clip currently playing.
    StopVoice,
    /// Stop sampling and return from `run`.
    Stop,
}

pub struct GuideSession {
    engine: SharedEngine,
    source: Box<dyn PositionSource>,
    player: Box<dyn AudioPlayer>,
    resolver: ClipResolver,
    sample_interval: Duration,
    fix_timeout: Duration,
}

impl GuideSession {
    pub fn new(
        engine: SharedEngine,
        source: Box<dyn PositionSource>,
        player: Box<dyn AudioPlayer>,
        config: &GuideConfig,
    ) -> Self {
        Self {
            engine,
            source,
            player,
            resolver: ClipResolver::new(config.clip_base_url.clone()),
            sample_interval: config.sample_interval(),
            fix_timeout: config.fix_timeout(),
        }
    }

    /// Build the catalog and engine described by `config`.
    pub fn from_config(
        config: &GuideConfig,
        source: Box<dyn PositionSource>,
        player: Box<dyn AudioPlayer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = ProximityEngine::new(config.catalog()?, config.proximity_config());
        Ok(Self::new(SharedEngine::new(engine), source, player, config))
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn resolver(&self) -> &ClipResolver {
        &self.resolver
    }

    /// Sample once and play the clip if this sample is a new arrival.
    ///
    /// A missing or late fix is not an error: the engine is left untouched
    /// and `Ok(None)` is returned.
    pub async fn tick(&mut self) -> Result<Option<TriggerEvent>, GuideError> {
        let sample = time::timeout(self.fix_timeout, self.source.sample())
            .await
            .unwrap_or(Err(PositionError::Timeout(self.fix_timeout)));
        let position = match sample {
            Ok(position) => position,
            Err(err) if err.is_transient() => {
                log::debug!("skipping tick: {err}");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let Some(event) = self.engine.update_position(position)? else {
            return Ok(None);
        };

        log::info!(
            "arrived at {} {} ({:.0} m)",
            event.spot,
            self.spot_label(&event),
            event.distance_m.unwrap_or(f64::NAN)
        );
        self.play(&event).await?;
        Ok(Some(event))
    }

    /// Play the clip for the current location without waiting for a tick.
    ///
    /// Falls back to the catalog's first entry when nothing is nearby. Does
    /// not affect which arrival the next tick reports.
    pub async fn talk_now(&mut self) -> Result<TriggerEvent, GuideError> {
        let event = self.engine.force_trigger();
        match event.kind {
            TriggerKind::Fallback => {
                log::info!("nothing nearby, playing fallback {}", self.spot_label(&event))
            }
            _ => log::info!("talk now at {} {}", event.spot, self.spot_label(&event)),
        }
        self.play(&event).await?;
        Ok(event)
    }

    pub async fn stop_voice(&mut self) -> Result<(), GuideError> {
        self.player.stop().await?;
        Ok(())
    }

    /// Sample every interval until [`GuideCommand::Stop`] arrives or the
    /// command channel closes.
    ///
    /// The engine is reset on entry so a restarted session announces the
    /// current spot again. Per-tick failures are logged and sampling carries
    /// on.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<GuideCommand>) {
        self.engine.reset();
        log::info!("guide session started, sampling every {:?}", self.sample_interval);

        let mut interval =
            time::interval_at(Instant::now() + self.sample_interval, self.sample_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(err) = self.tick().await {
                        log::warn!("tick failed: {err}");
                    }
                }
                command = commands.recv() => match command {
                    Some(GuideCommand::TalkNow) => {
                        if let Err(err) = self.talk_now().await {
                            log::warn!("talk now failed: {err}");
                        }
                    }
                    Some(GuideCommand::StopVoice) => {
                        if let Err(err) = self.stop_voice().await {
                            log::warn!("stop voice failed: {err}");
                        }
                    }
                    Some(GuideCommand::Stop) | None => break,
                },
            }
        }

        log::info!("guide session stopped");
    }

    async fn play(&mut self, event: &TriggerEvent) -> Result<(), PlaybackError> {
        let url = self.resolver.resolve(event.clip.as_str());
        self.player.clear_queue().await?;
        self.player.play(&url).await
    }

    fn spot_label(&self, event: &TriggerEvent) -> String {
        self.engine
            .spot_name(event.spot)
            .unwrap_or_else(|| event.spot.to_string())
    }
}
