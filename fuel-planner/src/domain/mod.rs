//! Core domain types for route and fuel planning.
//!
//! These types are independent of any provider or transport and are
//! shared by the geocoding, routing and planning layers.

mod error;
mod point;

pub use error::DomainError;
pub use point::{EARTH_RADIUS_METERS, GeoPoint, METERS_PER_MILE, haversine_meters};
