//! Catalog error types

use core::fmt;

use super::MAX_SPOTS;

/// Errors from building a spot catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// No spots were supplied
    EmptyCatalog,
    /// More than [`MAX_SPOTS`] spots were supplied
    CatalogFull,
    /// Spot name does not fit the fixed-capacity name buffer
    NameTooLong {
        /// Catalog index of the offending spot
        index: u16,
    },
    /// Clip reference does not fit the fixed-capacity clip buffer
    ClipTooLong {
        /// Catalog index of the offending spot
        index: u16,
    },
    /// Latitude or longitude is non-finite or outside its geographic range
    InvalidCoordinates {
        /// Catalog index of the offending spot
        index: u16,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::EmptyCatalog => write!(f, "spot catalog is empty"),
            CatalogError::CatalogFull => {
                write!(f, "spot catalog full (max {} spots)", MAX_SPOTS)
            }
            CatalogError::NameTooLong { index } => {
                write!(f, "spot {}: name too long", index)
            }
            CatalogError::ClipTooLong { index } => {
                write!(f, "spot {}: clip reference too long", index)
            }
            CatalogError::InvalidCoordinates { index } => {
                write!(f, "spot {}: invalid coordinates", index)
            }
        }
    }
}
