//! Trip planning error types.

use crate::domain::DomainError;
use crate::prices::PriceError;
use crate::routing::RoutingError;

/// Errors that fail a whole planning request.
///
/// Geocoding failures for individual stops are not errors; they show up
/// as missing fields on the stop.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Start or finish was not given
    #[error("Provide start and finish query parameters")]
    MissingPlace,

    /// Start or finish could not be geocoded
    #[error("Could not geocode start or finish")]
    UnresolvedPlace,

    /// The routing provider failed or found no route
    #[error("Routing failed: {0}")]
    Routing(#[from] RoutingError),

    /// The route needs stops but has no geometry to place them on
    #[error("route has no geometry to place stops on")]
    NoGeometry,

    /// The route geometry holds a coordinate that cannot be walked
    #[error("invalid route geometry: {0}")]
    InvalidGeometry(DomainError),

    /// Price dataset could not be loaded
    #[error("fuel prices unavailable: {0}")]
    Prices(#[from] PriceError),
}

impl From<DomainError> for PlanError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EmptyPolyline => PlanError::NoGeometry,
            DomainError::InvalidCoordinate(_) => PlanError::InvalidGeometry(e),
        }
    }
}

impl PlanError {
    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlanError::MissingPlace | PlanError::UnresolvedPlace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            PlanError::MissingPlace.to_string(),
            "Provide start and finish query parameters"
        );
        assert_eq!(
            PlanError::UnresolvedPlace.to_string(),
            "Could not geocode start or finish"
        );
        assert_eq!(
            PlanError::from(RoutingError::NoRoute).to_string(),
            "Routing failed: no route found between the given points"
        );
    }

    #[test]
    fn empty_polyline_is_no_geometry() {
        assert!(matches!(
            PlanError::from(DomainError::EmptyPolyline),
            PlanError::NoGeometry
        ));
    }

    #[test]
    fn invalid_coordinate_is_invalid_geometry() {
        let err = PlanError::from(DomainError::InvalidCoordinate("latitude out of range"));
        assert!(matches!(
            err,
            PlanError::InvalidGeometry(DomainError::InvalidCoordinate(_))
        ));
        assert_eq!(
            err.to_string(),
            "invalid route geometry: invalid coordinate: latitude out of range"
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn client_errors() {
        assert!(PlanError::MissingPlace.is_client_error());
        assert!(PlanError::UnresolvedPlace.is_client_error());
        assert!(!PlanError::NoGeometry.is_client_error());
        assert!(!PlanError::from(RoutingError::NoRoute).is_client_error());
    }
}
