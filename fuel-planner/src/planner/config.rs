//! Planner configuration.

/// Configuration parameters for stop planning and cost estimation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Miles between refuel stops. Also the assumed full-tank range.
    pub interval_miles: f64,

    /// Fuel economy in miles per gallon.
    pub mpg: f64,

    /// How many stops may be resolved against the geocoder at once.
    /// Output order is preserved regardless.
    pub stop_concurrency: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(interval_miles: f64, mpg: f64, stop_concurrency: usize) -> Self {
        Self {
            interval_miles,
            mpg,
            stop_concurrency,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            interval_miles: 500.0,
            mpg: 10.0,
            // Public Nominatim allows one request per second
            stop_concurrency: 1,
        }
    }
}
