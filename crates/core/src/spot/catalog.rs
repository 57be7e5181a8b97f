//! Spot catalog storage

use heapless::Vec;

use super::{CatalogError, Position, Spot, SpotId, MAX_SPOTS};

/// Ordered, non-empty, immutable list of spots
///
/// A spot's id always equals its index, so lookups by [`SpotId`] are O(1) and
/// catalog order doubles as the tie-break order for equidistant spots.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotCatalog {
    spots: Vec<Spot, MAX_SPOTS>,
}

impl SpotCatalog {
    /// Build a catalog from an ordered list of spots
    ///
    /// Ids are reassigned to match catalog order. Fails with
    /// [`CatalogError::EmptyCatalog`] when no spots are supplied and with
    /// [`CatalogError::CatalogFull`] when more than [`MAX_SPOTS`] are.
    pub fn from_spots<I>(spots: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Spot>,
    {
        let mut storage = Vec::new();
        for (index, mut spot) in spots.into_iter().enumerate() {
            spot.id = SpotId(index as u16);
            storage.push(spot).map_err(|_| CatalogError::CatalogFull)?;
        }

        if storage.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        Ok(Self { spots: storage })
    }

    /// Build a catalog from `(name, latitude, longitude, clip)` tuples
    pub fn from_entries(entries: &[(&str, f64, f64, &str)]) -> Result<Self, CatalogError> {
        if entries.len() > MAX_SPOTS {
            return Err(CatalogError::CatalogFull);
        }

        let mut spots: Vec<Spot, MAX_SPOTS> = Vec::new();
        for (index, &(name, lat, lon, clip)) in entries.iter().enumerate() {
            let spot = Spot::new(SpotId(index as u16), name, lat, lon, clip)?;
            spots.push(spot).map_err(|_| CatalogError::CatalogFull)?;
        }
        Self::from_spots(spots)
    }

    /// Number of spots (always at least 1)
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Get a spot by id
    pub fn get(&self, id: SpotId) -> Option<&Spot> {
        self.spots.get(id.index())
    }

    /// Fallback entry played when nothing is nearby (index 0)
    pub fn fallback(&self) -> &Spot {
        &self.spots[0]
    }

    /// Iterate spots in catalog order
    pub fn iter(&self) -> core::slice::Iter<'_, Spot> {
        self.spots.iter()
    }

    /// Find the spot closest to `position`
    ///
    /// Returns the id and distance in meters of the first (lowest-index) spot
    /// achieving the minimum distance. NaN distances lose to any real one.
    pub fn closest(&self, position: &Position) -> (SpotId, f64) {
        let mut best = (self.spots[0].id, position.distance_to(&self.spots[0].position));

        for spot in self.spots.iter().skip(1) {
            let distance = position.distance_to(&spot.position);
            if distance < best.1 || (best.1.is_nan() && !distance.is_nan()) {
                best = (spot.id, distance);
            }
        }

        best
    }
}

impl<'a> IntoIterator for &'a SpotCatalog {
    type Item = &'a Spot;
    type IntoIter = core::slice::Iter<'a, Spot>;

    fn into_iter(self) -> Self::IntoIter {
        self.spots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn akihabara() -> SpotCatalog {
        SpotCatalog::from_entries(&[
            ("dummy", 0.0, 0.0, "dummy.mp3"),
            ("station", 35.698466, 139.773114, "station.mp3"),
            ("udx", 35.700525, 139.772508, "udx.mp3"),
            ("myojin", 35.701922, 139.767846, "myojin.mp3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = akihabara();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.fallback().name.as_str(), "dummy");
    }

    #[test]
    fn test_catalog_ids_follow_order() {
        let catalog = akihabara();
        for (index, spot) in catalog.iter().enumerate() {
            assert_eq!(spot.id, SpotId(index as u16));
        }
    }

    #[test]
    fn test_from_spots_reassigns_ids() {
        let a = Spot::new(SpotId(9), "a", 1.0, 1.0, "a.mp3").unwrap();
        let b = Spot::new(SpotId(9), "b", 2.0, 2.0, "b.mp3").unwrap();
        let catalog = SpotCatalog::from_spots([a, b]).unwrap();
        assert_eq!(catalog.get(SpotId(0)).unwrap().name.as_str(), "a");
        assert_eq!(catalog.get(SpotId(1)).unwrap().id, SpotId(1));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(SpotCatalog::from_entries(&[]), Err(CatalogError::EmptyCatalog));
        let none: [Spot; 0] = [];
        assert_eq!(SpotCatalog::from_spots(none), Err(CatalogError::EmptyCatalog));
    }

    #[test]
    fn test_catalog_full_rejected() {
        let entries = [("x", 0.0, 0.0, "x.mp3"); MAX_SPOTS + 1];
        assert_eq!(SpotCatalog::from_entries(&entries), Err(CatalogError::CatalogFull));
    }

    #[test]
    fn test_catalog_reports_bad_entry_index() {
        let result = SpotCatalog::from_entries(&[
            ("ok", 0.0, 0.0, "ok.mp3"),
            ("bad", 0.0, 200.0, "bad.mp3"),
        ]);
        assert_eq!(result, Err(CatalogError::InvalidCoordinates { index: 1 }));
    }

    #[test]
    fn test_get_out_of_range() {
        assert!(akihabara().get(SpotId(4)).is_none());
    }

    #[test]
    fn test_closest_spot() {
        let catalog = akihabara();
        let (id, distance) = catalog.closest(&Position::new(35.700525, 139.772508));
        assert_eq!(id, SpotId(2));
        assert_eq!(distance, 0.0);

        let (id, distance) = catalog.closest(&Position::new(35.6993, 139.773114));
        assert_eq!(id, SpotId(1));
        assert_eq!(distance, 93.0);
    }

    #[test]
    fn test_closest_tie_breaks_to_lowest_index() {
        let catalog = SpotCatalog::from_entries(&[
            ("east", 0.0, 0.0005, "east.mp3"),
            ("west", 0.0, -0.0005, "west.mp3"),
        ])
        .unwrap();

        for _ in 0..3 {
            let (id, _) = catalog.closest(&Position::new(0.0, 0.0));
            assert_eq!(id, SpotId(0));
        }
    }

    #[test]
    fn test_closest_ignores_nan_distance() {
        let catalog = akihabara();
        let (_, distance) = catalog.closest(&Position::new(f64::NAN, 0.0));
        assert!(distance.is_nan());
    }
}
