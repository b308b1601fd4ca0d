//! Domain error types.
//!
//! These errors represent geometric failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for geometry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A polyline with no points cannot be walked
    #[error("polyline has no points")]
    EmptyPolyline,

    /// Coordinate outside the valid latitude/longitude range
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyPolyline;
        assert_eq!(err.to_string(), "polyline has no points");

        let err = DomainError::InvalidCoordinate("latitude out of range");
        assert_eq!(err.to_string(), "invalid coordinate: latitude out of range");
    }
}
