//! spot_voice_core - Pure no_std proximity logic for spot_voice
//!
//! This crate contains the platform-agnostic algorithms and types that decide
//! when a location-triggered voice clip should play. It can be tested on host
//! without any feature flags, async runtime or audio backend.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **No I/O**: Position sampling and playback belong to the caller
//!
//! # Modules
//!
//! - [`geo`]: Degree/radian conversion and ellipsoidal ground distance
//! - [`spot`]: Spot, position and catalog types
//! - [`proximity`]: Edge-triggered nearest-spot engine

#![no_std]

pub mod geo;
pub mod proximity;
pub mod spot;

pub use proximity::{
    ProximityConfig, ProximityEngine, ProximityError, ProximityPhase, ProximityState,
    TriggerEvent, TriggerKind,
};
pub use spot::{CatalogError, ClipRef, Position, Spot, SpotCatalog, SpotId};
