//! Stop placement and station selection.

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::domain::{DomainError, GeoPoint, METERS_PER_MILE};
use crate::geocode::{GeoResolver, GeocodeProvider};
use crate::prices::{PriceTable, RegionMatch, RegionPriceEntry};
use crate::routing::RoutePolyline;

use super::config::PlannerConfig;
use super::polyline::{point_along, stop_targets};

/// How a stop's station was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Region name equals a table key
    Exact,
    /// Case-insensitive or prefix match
    Loose,
    /// No match; the cheapest station anywhere
    CheapestOverall,
}

impl From<RegionMatch> for MatchSource {
    fn from(m: RegionMatch) -> Self {
        match m {
            RegionMatch::Exact => MatchSource::Exact,
            RegionMatch::Loose => MatchSource::Loose,
        }
    }
}

/// A planned refuel stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPlan {
    /// 1-based position in the trip
    pub sequence_index: usize,
    /// Miles from the start of the route
    pub distance_from_start: f64,
    /// Point on the route where the stop falls
    pub coord: GeoPoint,
    /// Region name from reverse geocoding
    pub resolved_region: Option<String>,
    /// Price table key the region resolved to
    pub matched_region_key: Option<String>,
    pub station: Option<RegionPriceEntry>,
    /// Approximate station location (geocoded from its city)
    pub station_coord: Option<GeoPoint>,
    /// Miles since the previous stop (or the start)
    pub segment_miles: f64,
}

impl StopPlan {
    /// Station price, or 0 when no station was found.
    pub fn price(&self) -> f64 {
        self.station.as_ref().map_or(0.0, |s| s.price)
    }
}

/// Pick the station for a region, first match wins:
///
/// 1. the region name is a table key;
/// 2. a key equals the name ignoring case, or the name starts with it;
/// 3. the cheapest station in the whole table;
/// 4. nothing, if the table is empty.
pub fn resolve_station<'t>(
    table: &'t PriceTable,
    region: Option<&str>,
) -> Option<(&'t RegionPriceEntry, MatchSource)> {
    region
        .and_then(|r| table.match_region(r))
        .map(|(entry, how)| (entry, how.into()))
        .or_else(|| {
            table
                .cheapest_overall()
                .map(|entry| (entry, MatchSource::CheapestOverall))
        })
}

/// Places stops along a route and resolves each to a station.
pub struct StopPlanner<'a, P> {
    resolver: &'a GeoResolver<P>,
    prices: &'a PriceTable,
    config: &'a PlannerConfig,
}

impl<'a, P: GeocodeProvider> StopPlanner<'a, P> {
    pub fn new(
        resolver: &'a GeoResolver<P>,
        prices: &'a PriceTable,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            resolver,
            prices,
            config,
        }
    }

    /// Plan stops for `route`, ordered by distance from the start.
    ///
    /// Fails only when stops are needed but the route has no geometry.
    pub async fn plan(&self, route: &RoutePolyline) -> Result<Vec<StopPlan>, DomainError> {
        let targets = stop_targets(route.distance_miles(), self.config.interval_miles);
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        // Geometry first so a bad polyline fails before any lookups
        let mut placed = Vec::with_capacity(targets.len());
        let mut previous = 0.0;
        for (i, &target) in targets.iter().enumerate() {
            let coord = point_along(&route.points, target * METERS_PER_MILE)?;
            placed.push((i + 1, target, target - previous, coord));
            previous = target;
        }

        let stops: Vec<StopPlan> = stream::iter(placed)
            .map(|(index, target, segment, coord)| self.resolve_stop(index, target, segment, coord))
            .buffered(self.config.stop_concurrency.max(1))
            .collect()
            .await;

        Ok(stops)
    }

    async fn resolve_stop(
        &self,
        sequence_index: usize,
        distance_from_start: f64,
        segment_miles: f64,
        coord: GeoPoint,
    ) -> StopPlan {
        let resolved_region = self.resolver.reverse(coord).await;
        let choice = resolve_station(self.prices, resolved_region.as_deref());

        let (matched_region_key, station) = match choice {
            Some((entry, how)) => {
                debug!(
                    stop = sequence_index,
                    region = ?resolved_region,
                    key = %entry.region_key,
                    ?how,
                    "resolved stop station"
                );
                (Some(entry.region_key.clone()), Some(entry.clone()))
            }
            None => (None, None),
        };

        let station_coord = match &station {
            Some(entry) => {
                let query = format!("{}, {}, USA", entry.city, entry.region_key);
                self.resolver.forward(&query).await.map(|r| r.point)
            }
            None => None,
        };

        StopPlan {
            sequence_index,
            distance_from_start,
            coord,
            resolved_region,
            matched_region_key,
            station,
            station_coord,
            segment_miles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::GeoResolverConfig;
    use crate::testing::{MockGeocoder, entry, equator_route};

    fn table() -> PriceTable {
        PriceTable::from_entries([
            entry("TX", "Austin", 3.20),
            entry("OK", "Tulsa", 2.95),
            entry("NM", "Gallup", 3.40),
        ])
    }

    #[test]
    fn ladder_exact_first() {
        let table = table();
        let (e, how) = resolve_station(&table, Some("TX")).unwrap();
        assert_eq!(e.region_key, "TX");
        assert_eq!(how, MatchSource::Exact);
    }

    #[test]
    fn ladder_loose_second() {
        let table = table();
        let (e, how) = resolve_station(&table, Some("nm")).unwrap();
        assert_eq!(e.region_key, "NM");
        assert_eq!(how, MatchSource::Loose);

        // "Oklahoma" starts with "ok"
        let (e, how) = resolve_station(&table, Some("Oklahoma")).unwrap();
        assert_eq!(e.region_key, "OK");
        assert_eq!(how, MatchSource::Loose);
    }

    #[test]
    fn ladder_falls_back_to_cheapest() {
        let table = table();
        let (e, how) = resolve_station(&table, Some("Ohio")).unwrap();
        assert_eq!(e.region_key, "OK");
        assert_eq!(how, MatchSource::CheapestOverall);

        let (e, how) = resolve_station(&table, None).unwrap();
        assert_eq!(e.region_key, "OK");
        assert_eq!(how, MatchSource::CheapestOverall);
    }

    #[test]
    fn ladder_empty_table_gives_nothing() {
        let table = PriceTable::new();
        assert!(resolve_station(&table, Some("TX")).is_none());
        assert!(resolve_station(&table, None).is_none());
    }

    #[tokio::test]
    async fn short_route_has_no_stops_and_no_lookups() {
        let resolver = GeoResolver::new(MockGeocoder::new(), &GeoResolverConfig::default());
        let table = table();
        let config = PlannerConfig::default();
        let planner = StopPlanner::new(&resolver, &table, &config);

        let stops = planner.plan(&equator_route(300.0)).await.unwrap();
        assert!(stops.is_empty());
        assert_eq!(resolver.provider().reverse_calls(), 0);
    }

    #[tokio::test]
    async fn plans_stops_at_interval() {
        let mock = MockGeocoder::new()
            .with_region_rule(|p| {
                let region = if p.longitude < 10.0 { "TX" } else { "Oklahoma" };
                Some(region.to_string())
            })
            .with_place("Austin, TX, USA", 30.27, -97.74)
            .with_place("Tulsa, OK, USA", 36.15, -95.99);
        let resolver = GeoResolver::new(mock, &GeoResolverConfig::default());
        let table = table();
        let config = PlannerConfig::default();
        let planner = StopPlanner::new(&resolver, &table, &config);

        let stops = planner.plan(&equator_route(1200.0)).await.unwrap();

        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].sequence_index, 1);
        assert_eq!(stops[0].distance_from_start, 500.0);
        assert_eq!(stops[0].segment_miles, 500.0);
        assert_eq!(stops[1].sequence_index, 2);
        assert_eq!(stops[1].distance_from_start, 1000.0);
        assert_eq!(stops[1].segment_miles, 500.0);

        // 500 miles along the equator is about 7.24 degrees of longitude
        assert!(stops[0].coord.latitude.abs() < 1e-9);
        assert!((stops[0].coord.longitude - 7.24).abs() < 0.01);

        assert_eq!(stops[0].resolved_region.as_deref(), Some("TX"));
        assert_eq!(stops[0].matched_region_key.as_deref(), Some("TX"));
        assert_eq!(stops[0].station_coord, Some(GeoPoint::new(30.27, -97.74)));

        assert_eq!(stops[1].resolved_region.as_deref(), Some("Oklahoma"));
        assert_eq!(stops[1].matched_region_key.as_deref(), Some("OK"));
        assert_eq!(stops[1].price(), 2.95);
    }

    #[tokio::test]
    async fn stop_survives_missing_station_coord() {
        let mock = MockGeocoder::new().with_region_rule(|_| Some("TX".to_string()));
        let resolver = GeoResolver::new(mock, &GeoResolverConfig::default());
        let table = table();
        let config = PlannerConfig::default();
        let planner = StopPlanner::new(&resolver, &table, &config);

        let stops = planner.plan(&equator_route(700.0)).await.unwrap();
        assert_eq!(stops.len(), 1);
        assert!(stops[0].station.is_some());
        assert!(stops[0].station_coord.is_none());
        assert_eq!(
            resolver.provider().searched(),
            vec!["Austin, TX, USA".to_string()]
        );
    }

    #[tokio::test]
    async fn reverse_failure_falls_back_to_cheapest() {
        let resolver = GeoResolver::new(MockGeocoder::new(), &GeoResolverConfig::default());
        let table = table();
        let config = PlannerConfig::default();
        let planner = StopPlanner::new(&resolver, &table, &config);

        let stops = planner.plan(&equator_route(700.0)).await.unwrap();
        assert!(stops[0].resolved_region.is_none());
        assert_eq!(stops[0].matched_region_key.as_deref(), Some("OK"));
    }

    #[tokio::test]
    async fn empty_table_gives_no_station() {
        let mock = MockGeocoder::new().with_region_rule(|_| Some("Texas".to_string()));
        let resolver = GeoResolver::new(mock, &GeoResolverConfig::default());
        let table = PriceTable::new();
        let config = PlannerConfig::default();
        let planner = StopPlanner::new(&resolver, &table, &config);

        let stops = planner.plan(&equator_route(1600.0)).await.unwrap();
        assert_eq!(stops.len(), 3);
        for stop in &stops {
            assert!(stop.station.is_none());
            assert!(stop.matched_region_key.is_none());
            assert!(stop.station_coord.is_none());
            assert_eq!(stop.price(), 0.0);
        }
        assert_eq!(resolver.provider().search_calls(), 0);
    }

    #[tokio::test]
    async fn long_route_without_geometry_fails() {
        let resolver = GeoResolver::new(MockGeocoder::new(), &GeoResolverConfig::default());
        let table = table();
        let config = PlannerConfig::default();
        let planner = StopPlanner::new(&resolver, &table, &config);

        let route = RoutePolyline::from_points(900.0 * METERS_PER_MILE, Vec::new());
        assert_eq!(planner.plan(&route).await, Err(DomainError::EmptyPolyline));
        assert_eq!(resolver.provider().reverse_calls(), 0);
    }

    #[tokio::test]
    async fn concurrent_resolution_preserves_order() {
        let mock = MockGeocoder::new()
            .with_region_rule(|p| Some(format!("R{}", p.longitude.round())))
            .with_reverse_delay();
        let resolver = GeoResolver::new(mock, &GeoResolverConfig::default());
        let table = table();
        let config = PlannerConfig::new(100.0, 10.0, 8);
        let planner = StopPlanner::new(&resolver, &table, &config);

        let stops = planner.plan(&equator_route(1050.0)).await.unwrap();
        assert_eq!(stops.len(), 10);
        for (i, stop) in stops.iter().enumerate() {
            assert_eq!(stop.sequence_index, i + 1);
            assert_eq!(stop.distance_from_start, 100.0 * (i as f64 + 1.0));
        }
        assert!(
            stops
                .windows(2)
                .all(|w| w[0].coord.longitude < w[1].coord.longitude)
        );
    }
}
