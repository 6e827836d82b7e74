//! Caching layer for geocoding and routing responses.
//!
//! Both caches are in-process moka caches with a per-cache TTL. Entries are
//! immutable once written, so concurrent writers of the same key are
//! harmless. Only successful lookups are ever inserted.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use sha2::{Digest, Sha256};

use crate::domain::{Coordinate, RouteResult};

/// Default TTL for geocoding results (24 hours).
pub const DEFAULT_GEOCODE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default TTL for routes (1 hour).
pub const DEFAULT_ROUTE_TTL: Duration = Duration::from_secs(60 * 60);

/// Directional cache key for routes: (start bits, end bits).
pub type RouteKey = ((u64, u64), (u64, u64));

/// Configuration for the caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for geocoded addresses.
    pub geocode_ttl: Duration,

    /// TTL for routes.
    pub route_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            geocode_ttl: DEFAULT_GEOCODE_TTL,
            route_ttl: DEFAULT_ROUTE_TTL,
            max_capacity: 10_000,
        }
    }
}

impl CacheConfig {
    pub fn with_geocode_ttl(mut self, ttl: Duration) -> Self {
        self.geocode_ttl = ttl;
        self
    }

    pub fn with_route_ttl(mut self, ttl: Duration) -> Self {
        self.route_ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = n;
        self
    }
}

/// Normalize an address and derive its cache key.
///
/// Addresses differing only in case or surrounding whitespace share a key.
pub fn geocode_key(address: &str) -> String {
    let normalized = address.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("geocode_{digest:x}")
}

/// Build the directional route key for a coordinate pair.
pub fn route_key(start: &Coordinate, end: &Coordinate) -> RouteKey {
    (start.key_bits(), end.key_bits())
}

/// Cache of resolved addresses.
#[derive(Clone)]
pub struct GeocodeCache {
    entries: MokaCache<String, Coordinate>,
}

impl GeocodeCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    pub async fn get(&self, address: &str) -> Option<Coordinate> {
        self.entries.get(&geocode_key(address)).await
    }

    pub async fn insert(&self, address: &str, coordinate: Coordinate) {
        self.entries.insert(geocode_key(address), coordinate).await;
    }
}

/// Cache of driving routes.
#[derive(Clone)]
pub struct RouteCache {
    entries: MokaCache<RouteKey, Arc<RouteResult>>,
}

impl RouteCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.route_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    pub async fn get(&self, start: &Coordinate, end: &Coordinate) -> Option<Arc<RouteResult>> {
        self.entries.get(&route_key(start, end)).await
    }

    pub async fn insert(&self, start: &Coordinate, end: &Coordinate, route: Arc<RouteResult>) {
        self.entries.insert(route_key(start, end), route).await;
    }
}
