//! Nominatim response types and geocoding results.

use serde::Deserialize;

use crate::domain::GeoPoint;

use super::error::GeocodeError;

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub point: GeoPoint,
    pub display_name: Option<String>,
}

/// One hit from `/search`. Nominatim encodes coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchHit {
    /// Convert to a [`GeocodeResult`], validating the coordinates.
    pub fn to_result(&self) -> Result<GeocodeResult, GeocodeError> {
        let parse = |raw: &str, axis: &str| {
            raw.trim().parse::<f64>().map_err(|e| GeocodeError::Json {
                message: format!("invalid {axis} {raw:?}: {e}"),
            })
        };
        let lat = parse(&self.lat, "lat")?;
        let lon = parse(&self.lon, "lon")?;
        let point = GeoPoint::checked(lat, lon).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        Ok(GeocodeResult {
            point,
            display_name: self.display_name.clone(),
        })
    }
}

/// Response from `/reverse`.
///
/// When nothing is found Nominatim answers 200 with an `error` field and
/// no `address`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<AddressDetails>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Address breakdown, restricted to the region-level fields we use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressDetails {
    pub state: Option<String>,
    pub state_district: Option<String>,
    pub region: Option<String>,
}

impl AddressDetails {
    /// The region name, preferring state, then state district, then region.
    pub fn region_name(&self) -> Option<&str> {
        [&self.state, &self.state_district, &self.region]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

impl ReverseResponse {
    pub fn region_name(&self) -> Option<String> {
        self.address
            .as_ref()
            .and_then(AddressDetails::region_name)
            .map(str::to_string)
    }
}
