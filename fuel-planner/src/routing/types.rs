//! OSRM response types and the route polyline.

use serde::Deserialize;

use crate::domain::{GeoPoint, METERS_PER_MILE};

use super::error::RoutingError;

/// A fetched route.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePolyline {
    /// Total driving distance reported by the provider, in meters
    pub distance_meters: f64,

    /// Points in travel order
    pub points: Vec<GeoPoint>,

    /// The provider's GeoJSON geometry, passed through to clients
    pub geometry: serde_json::Value,
}

impl RoutePolyline {
    /// Build a polyline from points, with a matching GeoJSON LineString.
    pub fn from_points(distance_meters: f64, points: Vec<GeoPoint>) -> Self {
        let coordinates: Vec<[f64; 2]> = points.iter().map(|p| [p.longitude, p.latitude]).collect();
        Self {
            distance_meters,
            geometry: serde_json::json!({
                "type": "LineString",
                "coordinates": coordinates,
            }),
            points,
        }
    }

    /// Reported distance in miles.
    pub fn distance_miles(&self) -> f64 {
        self.distance_meters / METERS_PER_MILE
    }
}

/// Top-level OSRM `/route` response.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmResponse {
    /// Take the first candidate route.
    pub fn into_polyline(self) -> Result<RoutePolyline, RoutingError> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute)?;
        route.into_polyline()
    }
}

impl OsrmRoute {
    /// Convert to a polyline. A missing geometry yields no points.
    pub fn into_polyline(self) -> Result<RoutePolyline, RoutingError> {
        let geometry = self.geometry.unwrap_or(serde_json::Value::Null);

        let points = if geometry.is_null() {
            Vec::new()
        } else {
            let line: LineString =
                serde_json::from_value(geometry.clone()).map_err(|e| RoutingError::Json {
                    message: format!("invalid route geometry: {e}"),
                })?;
            line.coordinates
                .into_iter()
                .map(GeoPoint::from_lon_lat)
                .collect()
        };

        Ok(RoutePolyline {
            distance_meters: self.distance,
            points,
            geometry,
        })
    }
}
