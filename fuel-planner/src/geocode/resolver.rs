//! Memoizing geocode resolver.
//!
//! Both positive and negative results are cached by exact key: a place
//! query string for forward lookups, the coordinate's bit pattern for
//! reverse lookups. Provider errors are logged and cached as `None`.
//! Concurrent lookups of the same key share one provider call.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::GeoPoint;

use super::provider::GeocodeProvider;
use super::types::GeocodeResult;

/// Configuration for the resolver caches.
#[derive(Debug, Clone)]
pub struct GeoResolverConfig {
    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,

    /// Optional TTL. `None` keeps entries until evicted by capacity.
    pub ttl: Option<Duration>,
}

impl Default for GeoResolverConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: None,
        }
    }
}

/// Geocoding with a memo cache in front of a provider.
///
/// Caches live as long as the resolver; the service owns one resolver
/// for its whole lifetime.
pub struct GeoResolver<P> {
    provider: P,
    places: MokaCache<String, Option<GeocodeResult>>,
    regions: MokaCache<(u64, u64), Option<String>>,
}

impl<P: GeocodeProvider> GeoResolver<P> {
    /// Create a resolver with the given cache configuration.
    pub fn new(provider: P, config: &GeoResolverConfig) -> Self {
        Self {
            provider,
            places: build_cache(config),
            regions: build_cache(config),
        }
    }

    /// Resolve a free-text place, or `None` if it cannot be found.
    pub async fn forward(&self, place: &str) -> Option<GeocodeResult> {
        self.places
            .get_with(place.to_string(), async {
                debug!(place, "geocode cache miss");
                match self.provider.search(place).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(place, error = %e, "forward geocoding failed");
                        None
                    }
                }
            })
            .await
    }

    /// Resolve the region containing `point`, or `None`.
    pub async fn reverse(&self, point: GeoPoint) -> Option<String> {
        self.regions
            .get_with(point.cache_key(), async {
                debug!(%point, "reverse geocode cache miss");
                match self.provider.region_at(point).await {
                    Ok(region) => region,
                    Err(e) => {
                        warn!(%point, error = %e, "reverse geocoding failed");
                        None
                    }
                }
            })
            .await
    }

    /// Access the underlying provider.
    #[cfg(test)]
    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }
}

fn build_cache<K, V>(config: &GeoResolverConfig) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let builder = MokaCache::builder().max_capacity(config.max_capacity);
    match config.ttl {
        Some(ttl) => builder.time_to_live(ttl).build(),
        None => builder.build(),
    }
}
