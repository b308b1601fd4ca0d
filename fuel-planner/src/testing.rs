//! In-memory providers and fixtures for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::{EARTH_RADIUS_METERS, GeoPoint, METERS_PER_MILE};
use crate::geocode::{GeocodeError, GeocodeProvider, GeocodeResult};
use crate::prices::RegionPriceEntry;
use crate::routing::{RouteSource, RoutePolyline, RoutingError};

type RegionRule = Box<dyn Fn(GeoPoint) -> Option<String> + Send + Sync>;

/// Geocoder serving fixed answers and counting provider calls.
#[derive(Default)]
pub struct MockGeocoder {
    places: HashMap<String, GeocodeResult>,
    failing_places: HashSet<String>,
    regions: HashMap<(u64, u64), String>,
    failing_regions: HashSet<(u64, u64)>,
    region_rule: Option<RegionRule>,
    reverse_delay: bool,
    searched: Mutex<Vec<String>>,
    search_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, query: &str, lat: f64, lon: f64) -> Self {
        self.places.insert(
            query.to_string(),
            GeocodeResult {
                point: GeoPoint::new(lat, lon),
                display_name: Some(query.to_string()),
            },
        );
        self
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_places.insert(query.to_string());
        self
    }

    pub fn with_region(mut self, point: GeoPoint, region: &str) -> Self {
        self.regions.insert(point.cache_key(), region.to_string());
        self
    }

    pub fn failing_region(mut self, point: GeoPoint) -> Self {
        self.failing_regions.insert(point.cache_key());
        self
    }

    /// Answer reverse lookups not covered by `with_region`.
    pub fn with_region_rule(
        mut self,
        rule: impl Fn(GeoPoint) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.region_rule = Some(Box::new(rule));
        self
    }

    /// Delay reverse lookups so that points further west finish later.
    pub fn with_reverse_delay(mut self) -> Self {
        self.reverse_delay = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }

    /// Queries sent to `search`, in order.
    pub fn searched(&self) -> Vec<String> {
        self.searched.lock().unwrap().clone()
    }
}

impl GeocodeProvider for MockGeocoder {
    async fn search(&self, query: &str) -> Result<Option<GeocodeResult>, GeocodeError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searched.lock().unwrap().push(query.to_string());

        if self.failing_places.contains(query) {
            return Err(GeocodeError::Api {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.places.get(query).cloned())
    }

    async fn region_at(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);

        if self.reverse_delay {
            let millis = (30.0 - 2.0 * point.longitude).max(0.0) as u64;
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        let key = point.cache_key();
        if self.failing_regions.contains(&key) {
            return Err(GeocodeError::RateLimited);
        }
        if let Some(region) = self.regions.get(&key) {
            return Ok(Some(region.clone()));
        }
        Ok(self.region_rule.as_ref().and_then(|rule| rule(point)))
    }
}

/// Router returning one fixed answer.
pub struct MockRouter {
    route: Option<RoutePolyline>,
    calls: AtomicUsize,
}

impl MockRouter {
    pub fn with_route(route: RoutePolyline) -> Self {
        Self {
            route: Some(route),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn no_route() -> Self {
        Self {
            route: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteSource for MockRouter {
    async fn route(
        &self,
        _origin: GeoPoint,
        _destination: GeoPoint,
    ) -> Result<RoutePolyline, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.route.clone().ok_or(RoutingError::NoRoute)
    }
}

/// A route of `miles` running east along the equator from (0, 0), whose
/// polyline length matches its reported distance.
pub fn equator_route(miles: f64) -> RoutePolyline {
    let meters = miles * METERS_PER_MILE;
    let degrees = (meters / EARTH_RADIUS_METERS).to_degrees();
    let steps = 20;
    let points = (0..=steps)
        .map(|i| GeoPoint::new(0.0, degrees * f64::from(i) / f64::from(steps)))
        .collect();
    RoutePolyline::from_points(meters, points)
}

/// A price entry with placeholder station details.
pub fn entry(key: &str, city: &str, price: f64) -> RegionPriceEntry {
    RegionPriceEntry {
        region_key: key.to_string(),
        price,
        station_name: format!("{city} Travel Center"),
        city: city.to_string(),
        address: format!("I-10, EXIT {}", city.len()),
    }
}
