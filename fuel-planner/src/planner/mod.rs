//! Fuel stop planning.
//!
//! Given a route, places refuel stops at fixed mileage intervals, finds
//! the region each stop falls in, picks the cheapest station for that
//! region, and estimates the fuel bill for the trip.

mod config;
mod cost;
mod polyline;
mod stops;

pub use config::PlannerConfig;
pub use cost::{CostEstimator, FuelEstimate, no_stop_price, round2};
pub use polyline::{point_along, stop_targets};
pub use stops::{MatchSource, StopPlan, StopPlanner, resolve_station};
