//! Spot Catalog Types
//!
//! Pure data structures for the voice spots a guide session reacts to.
//!
//! # Catalog Storage
//!
//! - Fixed-size spot array (max 64 spots)
//! - Ordered: a spot's id is its index in the catalog
//! - Never empty: construction fails with [`CatalogError::EmptyCatalog`]
//!
//! # Note
//!
//! Loading a catalog from storage is the host's concern. This module only
//! validates and holds an already-parsed list.

mod catalog;
mod error;

pub use catalog::SpotCatalog;
pub use error::CatalogError;

use core::fmt;

use heapless::String;

/// Maximum number of spots in a catalog
pub const MAX_SPOTS: usize = 64;

/// Maximum spot name length in bytes (UTF-8)
pub const MAX_NAME_LEN: usize = 96;

/// Maximum clip reference length in bytes (UTF-8)
pub const MAX_CLIP_LEN: usize = 128;

/// Display name of a spot
pub type SpotName = String<MAX_NAME_LEN>;

/// Opaque clip reference (file name or URL suffix) handed to the audio player
pub type ClipRef = String<MAX_CLIP_LEN>;

/// Stable spot identifier (index into the catalog)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpotId(pub u16);

impl SpotId {
    /// Catalog index of this spot
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geographic position in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f64,
}

impl Position {
    /// Create a new position
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both coordinates are finite and within geographic range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Distance to another position in whole meters
    pub fn distance_to(&self, other: &Position) -> f64 {
        crate::geo::calculate_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// A named location bound to a voice clip
#[derive(Clone, Debug, PartialEq)]
pub struct Spot {
    /// Catalog index
    pub id: SpotId,
    /// Display-only name
    pub name: SpotName,
    /// Spot location
    pub position: Position,
    /// Clip played on arrival
    pub clip: ClipRef,
}

impl Spot {
    /// Create a spot, copying name and clip into fixed-capacity strings
    ///
    /// The id is assigned by [`SpotCatalog`] when the spot is added, so the
    /// value given here is only provisional.
    pub fn new(
        id: SpotId,
        name: &str,
        latitude: f64,
        longitude: f64,
        clip: &str,
    ) -> Result<Self, CatalogError> {
        let position = Position::new(latitude, longitude);
        if !position.is_valid() {
            return Err(CatalogError::InvalidCoordinates { index: id.0 });
        }

        let mut spot_name = SpotName::new();
        spot_name
            .push_str(name)
            .map_err(|_| CatalogError::NameTooLong { index: id.0 })?;

        let mut clip_ref = ClipRef::new();
        clip_ref
            .push_str(clip)
            .map_err(|_| CatalogError::ClipTooLong { index: id.0 })?;

        Ok(Self {
            id,
            name: spot_name,
            position,
            clip: clip_ref,
        })
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }
}
