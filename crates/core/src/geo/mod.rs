//! Geodesic calculation utilities
//!
//! Pure functions for ground distance between two latitude/longitude pairs.
//! The distance uses the Hubeny approximation on the WGS-84 ellipsoid, which is
//! accurate to well under a meter over the few hundred meters a spot radius
//! covers.

use core::f64::consts::PI;

use libm::{cos, rint, sin, sqrt};

/// WGS-84 first eccentricity squared
pub const ECCENTRICITY_SQ: f64 = 0.00669438;

/// WGS-84 semi-major axis times (1 - e²), in meters
pub const MERIDIAN_NUMERATOR_M: f64 = 6_335_439.327;

/// WGS-84 semi-major axis (equatorial radius), in meters
pub const EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    (deg / 180.0) * PI
}

/// Calculate ground distance between two GPS positions
///
/// # Arguments
///
/// * `lat1`, `lon1` - First position in degrees
/// * `lat2`, `lon2` - Second position in degrees
///
/// # Returns
///
/// Distance in meters, rounded to the nearest whole meter (ties to even).
///
/// Coordinates are not range-checked. NaN or infinite inputs yield a NaN or
/// infinite distance, which never compares as within any radius.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_avg = deg_to_rad(lat1 + (lat2 - lat1) / 2.0);
    let delta_lat = deg_to_rad(lat1 - lat2);
    let delta_lon = deg_to_rad(lon1 - lon2);

    let sin_avg = sin(lat_avg);
    let w = 1.0 - ECCENTRICITY_SQ * sin_avg * sin_avg;

    // Radii of curvature along the meridian and the prime vertical
    let meridian = MERIDIAN_NUMERATOR_M / sqrt(w * w * w);
    let prime_vertical = EQUATORIAL_RADIUS_M / sqrt(w);

    let north = meridian * delta_lat;
    let east = prime_vertical * cos(lat_avg) * delta_lon;

    rint(sqrt(north * north + east * east))
}
