//! spot_voice - Location-triggered voice guide
//!
//! Host-side runtime around [`spot_voice_core`]: it samples the user's
//! position on a fixed interval, feeds the proximity engine and hands each
//! new arrival's clip to an audio player.
//!
//! # Modules
//!
//! - [`config`]: JSON guide configuration and the built-in catalog
//! - [`engine`]: Mutex-guarded engine shared between tasks
//! - [`position`]: Position source port and scripted source
//! - [`player`]: Audio player port and clip URL resolution
//! - [`session`]: Sampling loop, "talk now" and "stop voice"
//! - [`error`]: Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod position;
pub mod session;

pub use config::{GuideConfig, SpotConfig};
pub use engine::SharedEngine;
pub use error::{ConfigError, GuideError};
pub use player::{AudioPlayer, ClipResolver, LogPlayer, PlaybackError};
pub use position::{PositionError, PositionSource, ScriptedSource};
pub use session::{GuideCommand, GuideSession};
pub use spot_voice_core::{
    Position, ProximityConfig, ProximityEngine, ProximityPhase, SpotCatalog, SpotId,
    TriggerEvent, TriggerKind,
};
