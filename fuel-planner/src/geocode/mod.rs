//! Forward and reverse geocoding.
//!
//! [`NominatimClient`] talks to a Nominatim instance; [`GeoResolver`]
//! wraps any [`GeocodeProvider`] with a memoizing cache that also
//! remembers failed lookups, so a query that failed once is never sent
//! to the provider again while it stays cached.

mod client;
mod error;
mod provider;
mod resolver;
mod types;

pub use client::{DEFAULT_CONTACT_EMAIL, NominatimClient, NominatimConfig};
pub use error::GeocodeError;
pub use provider::GeocodeProvider;
pub use resolver::{GeoResolver, GeoResolverConfig};
pub use types::{AddressDetails, GeocodeResult, ReverseResponse, SearchHit};
