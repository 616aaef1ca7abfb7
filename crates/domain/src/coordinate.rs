//! Coordinate — a latitude/longitude pair and the great-circle distance between two of them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mean Earth radius used by the spherical model, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Nothing stops a caller from building an out-of-range coordinate; the
/// distance function accepts any real input. Use [`Coordinate::validate`]
/// where bad input must be rejected (configuration, builders).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters. See [`haversine_distance`].
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }

    /// Check that both components are finite and inside their ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending component.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Haversine great-circle distance between two coordinates, in meters.
///
/// Uses a spherical Earth of radius [`EARTH_RADIUS_METERS`]. The result is
/// always `>= 0` and exactly `0` for identical points. Longitude deltas are
/// not wrapped, so pairs straddling the ±180° meridian come out too long.
#[must_use]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
