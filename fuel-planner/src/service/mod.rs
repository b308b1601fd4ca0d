//! Trip planning pipeline.
//!
//! geocode endpoints → fetch route → place stops → price them → estimate
//! cost. One [`RoutePlanningService`] is built at startup and owns the
//! geocode cache and the price table for its whole lifetime.

mod error;


pub use error::PlanError;

use tracing::{debug, info};

use crate::domain::GeoPoint;
use crate::geocode::{GeoResolver, GeocodeProvider};
use crate::planner::{CostEstimator, PlannerConfig, StopPlan, StopPlanner, no_stop_price, round2};
use crate::prices::PriceStore;
use crate::routing::{RouteSource, RoutePolyline};

/// Country suffix appended to user place names. Only US places resolve.
const COUNTRY_SUFFIX: &str = "USA";

/// The result of planning one trip.
#[derive(Debug, Clone)]
pub struct TripResult {
    /// Route length in miles, rounded to 2 places
    pub distance_miles: f64,
    /// GeoJSON geometry from the routing provider
    pub route_geometry: serde_json::Value,
    pub stops: Vec<StopPlan>,
    /// Rounded to 2 places
    pub total_fuel_gallons: f64,
    /// Rounded to 2 places
    pub total_cost: f64,
}

/// Orchestrates geocoding, routing, stop planning and costing.
pub struct RoutePlanningService<G, R> {
    resolver: GeoResolver<G>,
    router: R,
    prices: PriceStore,
    config: PlannerConfig,
}

impl<G: GeocodeProvider, R: RouteSource> RoutePlanningService<G, R> {
    pub fn new(resolver: GeoResolver<G>, router: R, prices: PriceStore, config: PlannerConfig) -> Self {
        Self {
            resolver,
            router,
            prices,
            config,
        }
    }

    /// Plan a trip between two free-text US places.
    pub async fn plan(&self, start: &str, finish: &str) -> Result<TripResult, PlanError> {
        if start.is_empty() || finish.is_empty() {
            return Err(PlanError::MissingPlace);
        }

        let origin = self.locate(start).await;
        let destination = self.locate(finish).await;
        let (Some(origin), Some(destination)) = (origin, destination) else {
            return Err(PlanError::UnresolvedPlace);
        };

        let route = self.router.route(origin, destination).await?;
        self.plan_route(origin, &route).await
    }

    /// Plan stops and cost for an already-fetched route.
    pub async fn plan_route(
        &self,
        origin: GeoPoint,
        route: &RoutePolyline,
    ) -> Result<TripResult, PlanError> {
        let table = self.prices.get().await?;
        let distance_miles = route.distance_miles();

        let stops = StopPlanner::new(&self.resolver, &table, &self.config)
            .plan(route)
            .await?;

        let price = if stops.is_empty() {
            let origin_region = self.resolver.reverse(origin).await;
            no_stop_price(&table, origin_region.as_deref())
        } else {
            0.0
        };

        let estimate = CostEstimator::new(self.config.mpg).estimate(distance_miles, &stops, price);

        info!(
            distance_miles = round2(distance_miles),
            stops = stops.len(),
            total_cost = estimate.total_cost,
            "planned trip"
        );

        Ok(TripResult {
            distance_miles: round2(distance_miles),
            route_geometry: route.geometry.clone(),
            stops,
            total_fuel_gallons: round2(estimate.total_gallons),
            total_cost: estimate.total_cost,
        })
    }

    async fn locate(&self, place: &str) -> Option<GeoPoint> {
        let query = format!("{place}, {COUNTRY_SUFFIX}");
        let result = self.resolver.forward(&query).await;
        if result.is_none() {
            debug!(place, "could not geocode place");
        }
        result.map(|r| r.point)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}
