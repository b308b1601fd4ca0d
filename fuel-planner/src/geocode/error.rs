//! Geocoding error types.

/// Errors from a geocoding provider.
///
/// The resolver recovers all of these locally as "no result".
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider refused the request (usually a missing contact address)
    #[error("forbidden: set NOMINATIM_EMAIL to a real contact address")]
    Forbidden,

    /// Rate limited by the provider
    #[error("rate limited by geocoding provider")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client could not be configured
    #[error("invalid configuration: {0}")]
    Config(String),
}
