//! Nominatim HTTP client.
//!
//! Public Nominatim instances block clients that do not identify
//! themselves, so every request carries a User-Agent naming this
//! application and a contact address, plus an `email` query parameter.

use tracing::debug;

use crate::domain::GeoPoint;

use super::error::GeocodeError;
use super::provider::GeocodeProvider;
use super::types::{GeocodeResult, ReverseResponse, SearchHit};

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default contact address when none is configured.
pub const DEFAULT_CONTACT_EMAIL: &str = "dev@example.com";

/// Reverse lookups at zoom 5 resolve to state level.
const REVERSE_ZOOM: &str = "5";

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Contact address sent with every request
    pub contact_email: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Create a new config with the given contact address.
    pub fn new(contact_email: impl Into<String>) -> Self {
        Self {
            contact_email: contact_email.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// User-Agent header value identifying this application.
    pub fn user_agent(&self) -> String {
        format!(
            "fuel-planner/{} ({})",
            env!("CARGO_PKG_VERSION"),
            self.contact_email
        )
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_EMAIL)
    }
}

/// Client for the Nominatim search and reverse APIs.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    contact_email: String,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        if config.contact_email.trim().is_empty() {
            return Err(GeocodeError::Config(
                "contact email must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            contact_email: config.contact_email,
        })
    }

    /// Send a GET and return the body, mapping error statuses.
    async fn get_body(&self, url: &str, query: &[(&str, &str)]) -> Result<String, GeocodeError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("format", "json"), ("email", self.contact_email.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeocodeError::Forbidden);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl GeocodeProvider for NominatimClient {
    async fn search(&self, query: &str) -> Result<Option<GeocodeResult>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        debug!(query, "nominatim search");

        let body = self.get_body(&url, &[("q", query), ("limit", "1")]).await?;
        let hits: Vec<SearchHit> = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        hits.first().map(SearchHit::to_result).transpose()
    }

    async fn region_at(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let lat = point.latitude.to_string();
        let lon = point.longitude.to_string();
        debug!(%point, "nominatim reverse");

        let body = self
            .get_body(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("zoom", REVERSE_ZOOM),
                    ("addressdetails", "1"),
                ],
            )
            .await?;
        let response: ReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        if let Some(message) = &response.error {
            debug!(%point, reason = %message, "nominatim found no address");
        }
        Ok(response.region_name())
    }
}
