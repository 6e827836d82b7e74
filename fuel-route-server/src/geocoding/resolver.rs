//! Address resolution with USA-only validation and caching.

use std::future::Future;

use tracing::{debug, error, warn};

use crate::cache::GeocodeCache;
use crate::domain::Coordinate;

use super::error::{GeocoderError, ResolveError};

/// Country descriptors accepted as domestic (compared uppercased).
pub const DOMESTIC_COUNTRY_CODES: [&str; 4] =
    ["USA", "US", "UNITED STATES", "UNITED STATES OF AMERICA"];

/// Country reported when reverse geocoding yields no country at all.
const UNKNOWN_COUNTRY: &str = "unknown";

/// Trait for geocoding providers.
///
/// This abstraction allows the resolver to be tested with mock data.
pub trait Geocoder {
    /// Resolve free text to a coordinate, `None` if nothing matched.
    fn forward_geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocoderError>> + Send;

    /// Look up the country descriptor of a coordinate, `None` if unknown.
    fn reverse_geocode(
        &self,
        location: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, GeocoderError>> + Send;
}

/// Whether a country descriptor names the USA.
pub fn is_domestic(country: &str) -> bool {
    let upper = country.trim().to_uppercase();
    DOMESTIC_COUNTRY_CODES.contains(&upper.as_str())
}

/// Resolves addresses to domestic coordinates.
pub struct GeocodingResolver<G> {
    geocoder: G,
    cache: GeocodeCache,
}

impl<G: Geocoder> GeocodingResolver<G> {
    pub fn new(geocoder: G, cache: GeocodeCache) -> Self {
        Self { geocoder, cache }
    }

    /// Resolve an address to a coordinate inside the USA.
    ///
    /// Forward geocoding runs first; the reverse lookup confirming the
    /// country only runs once a match exists. A cache hit skips both.
    /// Failures are never cached.
    pub async fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        if let Some(cached) = self.cache.get(address).await {
            debug!(address, "geocode cache hit");
            return Ok(cached);
        }
        debug!(address, "geocode cache miss");

        let location = self
            .geocoder
            .forward_geocode(address)
            .await
            .map_err(|e| unavailable(address, e))?
            .ok_or_else(|| ResolveError::LocationNotFound {
                address: address.to_string(),
            })?;

        let country = self
            .geocoder
            .reverse_geocode(location)
            .await
            .map_err(|e| unavailable(address, e))?
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        if !is_domestic(&country) {
            warn!(address, %country, "rejected non-domestic location");
            return Err(ResolveError::NonDomesticLocation {
                address: address.to_string(),
                country,
            });
        }

        self.cache.insert(address, location).await;
        Ok(location)
    }

    #[cfg(test)]
    pub(crate) fn geocoder(&self) -> &G {
        &self.geocoder
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}

fn unavailable(address: &str, e: GeocoderError) -> ResolveError {
    error!(address, error = %e, "geocoding failed");
    ResolveError::Unavailable(e)
}
