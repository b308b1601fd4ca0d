//! Driving routes from an OSRM server.
//!
//! One request per trip: the first candidate route is used, with its
//! full GeoJSON geometry.

mod client;
mod error;
mod provider;
mod types;

pub use client::{OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use provider::RouteSource;
pub use types::{OsrmResponse, OsrmRoute, RoutePolyline};
