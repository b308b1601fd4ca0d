//! Fuel cost estimation.
//!
//! The vehicle is assumed to start with a full tank whose range equals
//! the stop interval, so nothing is bought at the origin. At each stop it
//! buys exactly the fuel needed to reach the next stop, or the finish
//! after the last stop.

use crate::prices::PriceTable;

use super::stops::StopPlan;

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Total fuel use and cost for a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelEstimate {
    /// Gallons burned over the whole trip (unrounded)
    pub total_gallons: f64,
    /// Money spent, rounded to cents
    pub total_cost: f64,
}

/// Greedy fuel purchase plan over a sequence of stops.
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator {
    mpg: f64,
}

impl CostEstimator {
    pub fn new(mpg: f64) -> Self {
        Self { mpg }
    }

    fn gallons_for(&self, miles: f64) -> f64 {
        if self.mpg > 0.0 { miles / self.mpg } else { 0.0 }
    }

    /// Estimate the cost of driving `distance_miles` with the given stops.
    ///
    /// With no stops the whole trip is priced at `no_stop_price` (see
    /// [`no_stop_price`]). Otherwise each stop pays its own station price
    /// for the fuel to reach the next stop; a stop with no station
    /// contributes nothing.
    pub fn estimate(
        &self,
        distance_miles: f64,
        stops: &[StopPlan],
        no_stop_price: f64,
    ) -> FuelEstimate {
        let total_gallons = self.gallons_for(distance_miles);

        if stops.is_empty() {
            return FuelEstimate {
                total_gallons,
                total_cost: round2(total_gallons * no_stop_price),
            };
        }

        let next_distances = stops
            .iter()
            .skip(1)
            .map(|s| s.distance_from_start)
            .chain(std::iter::once(distance_miles));

        let total_cost: f64 = stops
            .iter()
            .zip(next_distances)
            .map(|(stop, next)| {
                let gallons = self.gallons_for(next - stop.distance_from_start).max(0.0);
                gallons * stop.price()
            })
            .sum();

        FuelEstimate {
            total_gallons,
            total_cost: round2(total_cost),
        }
    }
}

/// Price for a trip short enough to need no stop.
///
/// Uses the station for the origin's region when the region name is
/// exactly a table key, else the cheapest station overall, else 0.
pub fn no_stop_price(table: &PriceTable, origin_region: Option<&str>) -> f64 {
    origin_region
        .and_then(|r| table.lookup(r))
        .or_else(|| table.cheapest_overall())
        .map_or(0.0, |e| e.price)
}
