//! Application state for the web layer.

use std::sync::Arc;

use crate::service::RoutePlanningService;

/// Shared application state.
///
/// Generic over the geocoding and routing providers so the router can be
/// served with the live clients or with in-memory ones.
pub struct AppState<G, R> {
    /// Trip planner, owning the geocode cache and price table
    pub service: Arc<RoutePlanningService<G, R>>,
}

impl<G, R> AppState<G, R> {
    /// Create a new app state.
    pub fn new(service: RoutePlanningService<G, R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<G, R> Clone for AppState<G, R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
