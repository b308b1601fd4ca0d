//! OSRM HTTP client.

use tracing::debug;

use crate::domain::GeoPoint;

use super::error::RoutingError;
use super::provider::RouteSource;
use super::types::{OsrmResponse, RoutePolyline};

/// Default base URL for the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Routing profile (e.g. `driving`)
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: "driving".to_string(),
            timeout_secs: 15,
        }
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the OSRM route service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new OSRM client.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            profile: config.profile,
        })
    }

    /// Route URL for a pair of points. OSRM takes `lon,lat` pairs.
    fn route_url(&self, origin: GeoPoint, destination: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            self.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }
}

impl RouteSource for OsrmClient {
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RoutePolyline, RoutingError> {
        let url = self.route_url(origin, destination);
        debug!(%origin, %destination, "osrm route");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), body));
        }

        let parsed: OsrmResponse = serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })?;

        parsed.into_polyline()
    }
}

/// Map a failed OSRM response to an error.
///
/// OSRM reports unroutable pairs as 400 with code `NoRoute`; other
/// failures carry a human-readable `message`, used in place of the raw body.
fn error_for_status(status: u16, body: String) -> RoutingError {
    match serde_json::from_str::<OsrmResponse>(&body) {
        Ok(parsed) if parsed.code.as_deref() == Some("NoRoute") => RoutingError::NoRoute,
        Ok(OsrmResponse {
            message: Some(message),
            ..
        }) => RoutingError::Api { status, message },
        _ => RoutingError::Api {
            status,
            message: body,
        },
    }
}
