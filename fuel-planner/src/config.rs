//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geocode::{DEFAULT_CONTACT_EMAIL, GeoResolverConfig, NominatimConfig};
use crate::routing::OsrmConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_PRICES_PATH: &str = "data/fuel-prices.csv";
const DEFAULT_STATIC_DIR: &str = "static";

/// Error for a malformed environment variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Contact address sent to the geocoder (`NOMINATIM_EMAIL`)
    pub contact_email: String,
    pub nominatim_base_url: Option<String>,
    pub osrm_base_url: Option<String>,
    /// OSRM routing profile (`OSRM_PROFILE`)
    pub osrm_profile: Option<String>,
    /// Fuel price CSV
    pub prices_path: PathBuf,
    pub static_dir: String,
    pub geocode_cache_capacity: u64,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    ///
    /// Unset and empty variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: "BIND_ADDR",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_BIND_ADDR.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
                reason: e.to_string(),
            })?,
        };

        let geocode_cache_capacity = match get("GEOCODE_CACHE_CAPACITY") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError {
                var: "GEOCODE_CACHE_CAPACITY",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => GeoResolverConfig::default().max_capacity,
        };

        Ok(Self {
            bind_addr,
            contact_email: get("NOMINATIM_EMAIL")
                .unwrap_or_else(|| DEFAULT_CONTACT_EMAIL.to_string()),
            nominatim_base_url: get("NOMINATIM_BASE_URL"),
            osrm_base_url: get("OSRM_BASE_URL"),
            osrm_profile: get("OSRM_PROFILE"),
            prices_path: get("FUEL_PRICES_PATH")
                .unwrap_or_else(|| DEFAULT_PRICES_PATH.to_string())
                .into(),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            geocode_cache_capacity,
        })
    }

    /// Whether the contact address is still the placeholder.
    pub fn uses_placeholder_email(&self) -> bool {
        self.contact_email == DEFAULT_CONTACT_EMAIL
    }

    pub fn nominatim(&self) -> NominatimConfig {
        let config = NominatimConfig::new(&self.contact_email);
        match &self.nominatim_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    pub fn osrm(&self) -> OsrmConfig {
        let config = match &self.osrm_base_url {
            Some(url) => OsrmConfig::new(url),
            None => OsrmConfig::default(),
        };
        match &self.osrm_profile {
            Some(profile) => config.with_profile(profile),
            None => config,
        }
    }

    pub fn geocode_cache(&self) -> GeoResolverConfig {
        GeoResolverConfig {
            max_capacity: self.geocode_cache_capacity,
            ..GeoResolverConfig::default()
        }
    }
}
