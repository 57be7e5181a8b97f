//! Proximity engine error types

use core::fmt;

/// Errors from proximity engine operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProximityError {
    /// Position sample is non-finite or outside geographic range
    InvalidPosition {
        /// Rejected latitude in degrees
        latitude: f64,
        /// Rejected longitude in degrees
        longitude: f64,
    },
}

impl fmt::Display for ProximityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProximityError::InvalidPosition {
                latitude,
                longitude,
            } => write!(f, "invalid position ({}, {})", latitude, longitude),
        }
    }
}
