//! Routing provider abstraction.

use std::future::Future;

use crate::domain::GeoPoint;

use super::error::RoutingError;
use super::types::RoutePolyline;

/// A source of driving routes.
pub trait RouteSource: Send + Sync {
    /// Fetch the best driving route from `origin` to `destination`.
    fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = Result<RoutePolyline, RoutingError>> + Send;
}
