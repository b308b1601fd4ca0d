//! Geographic points and great-circle distance.

use std::fmt;

use super::DomainError;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// A WGS84 coordinate.
///
/// Providers disagree on axis order (OSRM emits `[lon, lat]`, Nominatim
/// emits separate fields), so construction always names both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting values outside the WGS84 range.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuel_planner::domain::GeoPoint;
    ///
    /// assert!(GeoPoint::checked(41.88, -87.63).is_ok());
    /// assert!(GeoPoint::checked(91.0, 0.0).is_err());
    /// assert!(GeoPoint::checked(0.0, -181.0).is_err());
    /// ```
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate("latitude out of range"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate("longitude out of range"));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Build a point from a GeoJSON `[lon, lat]` position.
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self::new(position[1], position[0])
    }

    /// Linear interpolation towards `other` by `fraction` in `[0, 1]`.
    pub fn lerp(&self, other: &GeoPoint, fraction: f64) -> GeoPoint {
        GeoPoint::new(
            self.latitude + (other.latitude - self.latitude) * fraction,
            self.longitude + (other.longitude - self.longitude) * fraction,
        )
    }

    /// Bit-exact key for hashing. Distinguishes `0.0` from `-0.0`.
    pub fn cache_key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_meters(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}
