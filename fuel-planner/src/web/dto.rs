//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::GeoPoint;
use crate::planner::StopPlan;
use crate::prices::RegionPriceEntry;
use crate::service::TripResult;

/// Query parameters for `GET /route/`.
#[derive(Debug, Default, Deserialize)]
pub struct RouteRequest {
    /// Free-text start place (a US city, address, ...)
    pub start: Option<String>,

    /// Free-text finish place
    pub finish: Option<String>,
}

/// A coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordResult {
    pub lat: f64,
    pub lon: f64,
}

impl From<GeoPoint> for CoordResult {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.latitude,
            lon: p.longitude,
        }
    }
}

/// The station chosen at a stop.
#[derive(Debug, Clone, Serialize)]
pub struct StationResult {
    /// Price per gallon
    pub price: f64,
    pub name: String,
    pub city: String,
    pub address: String,
}

impl From<&RegionPriceEntry> for StationResult {
    fn from(e: &RegionPriceEntry) -> Self {
        Self {
            price: e.price,
            name: e.station_name.clone(),
            city: e.city.clone(),
            address: e.address.clone(),
        }
    }
}

/// A refuel stop.
#[derive(Debug, Clone, Serialize)]
pub struct StopResult {
    /// 1-based stop number
    pub index: usize,

    pub distance_from_start_miles: f64,

    /// Where on the route the stop falls
    pub coord: CoordResult,

    /// Region name from reverse geocoding
    pub state: Option<String>,

    /// Price table key used for the station
    pub chosen_state_abbr: Option<String>,

    pub station: Option<StationResult>,

    /// Approximate station location
    pub station_coord: Option<CoordResult>,

    /// Miles since the previous stop
    pub segment_miles: f64,
}

impl StopResult {
    /// Build from a planned stop.
    pub fn from_stop(stop: &StopPlan) -> Self {
        Self {
            index: stop.sequence_index,
            distance_from_start_miles: stop.distance_from_start,
            coord: stop.coord.into(),
            state: stop.resolved_region.clone(),
            chosen_state_abbr: stop.matched_region_key.clone(),
            station: stop.station.as_ref().map(StationResult::from),
            station_coord: stop.station_coord.map(CoordResult::from),
            segment_miles: stop.segment_miles,
        }
    }
}

/// Response for `GET /route/`.
#[derive(Debug, Clone, Serialize)]
pub struct TripResponse {
    pub distance_miles: f64,

    /// GeoJSON LineString from the routing provider
    pub route_geojson: serde_json::Value,

    pub stops: Vec<StopResult>,

    pub estimated_total_fuel_gallons: f64,

    pub estimated_total_cost: f64,
}

impl TripResponse {
    /// Build from a planned trip.
    pub fn from_trip(trip: &TripResult) -> Self {
        Self {
            distance_miles: trip.distance_miles,
            route_geojson: trip.route_geometry.clone(),
            stops: trip.stops.iter().map(StopResult::from_stop).collect(),
            estimated_total_fuel_gallons: trip.total_fuel_gallons,
            estimated_total_cost: trip.total_cost,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
