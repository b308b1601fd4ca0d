//! Geocoding provider abstraction.

use std::future::Future;

use crate::domain::GeoPoint;

use super::error::GeocodeError;
use super::types::GeocodeResult;

/// A source of forward and reverse geocoding.
///
/// This abstraction allows the resolver and planner to be tested with
/// in-memory data. `Ok(None)` means the provider answered but found
/// nothing.
pub trait GeocodeProvider: Send + Sync {
    /// Look up a free-text place.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodeResult>, GeocodeError>> + Send;

    /// Find the region (state) containing a point.
    fn region_at(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}
