//! Cached route lookup.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error};

use crate::cache::RouteCache;
use crate::domain::{Coordinate, RouteResult, meters_to_miles};

use super::error::{DirectionsError, RouteError};

/// A route as reported by the provider, before unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRoute {
    pub path: Vec<Coordinate>,
    pub distance_meters: f64,
}

/// Trait for directions providers.
///
/// This abstraction allows the route provider to be tested with mock data.
pub trait Directions {
    /// Fetch a driving route, `None` if the provider has no route.
    fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<Option<RawRoute>, DirectionsError>> + Send;
}

/// Resolves coordinate pairs to driving routes, with caching.
pub struct RouteProvider<D> {
    directions: D,
    cache: RouteCache,
}

impl<D: Directions> RouteProvider<D> {
    pub fn new(directions: D, cache: RouteCache) -> Self {
        Self { directions, cache }
    }

    /// Get the route from `start` to `end`.
    ///
    /// Keys are directional: `get_route(a, b)` and `get_route(b, a)` are
    /// cached separately.
    pub async fn get_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Arc<RouteResult>, RouteError> {
        if let Some(cached) = self.cache.get(&start, &end).await {
            debug!(%start, %end, "route cache hit");
            return Ok(cached);
        }
        debug!(%start, %end, "route cache miss");

        let raw = self
            .directions
            .directions(start, end)
            .await
            .map_err(|e| {
                error!(%start, %end, error = %e, "routing failed");
                RouteError::Unavailable(e)
            })?
            .ok_or(RouteError::NotFound)?;

        let route = Arc::new(RouteResult::new(
            raw.path,
            meters_to_miles(raw.distance_meters),
        ));

        self.cache.insert(&start, &end, route.clone()).await;
        Ok(route)
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &RouteCache {
        &self.cache
    }
}
