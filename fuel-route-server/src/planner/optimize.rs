//! Route optimization pipeline.
//!
//! Resolves both endpoints, fetches the route, selects fuel stops and
//! computes the trip cost. Geocoding and routing failures are
//! client-correctable and propagate with their message; anything else is
//! logged and reported as an internal error.

use tracing::{error, info};

use crate::catalog::StationCatalog;
use crate::domain::OptimizationResult;
use crate::geocoding::{Geocoder, GeocodingResolver, ResolveError};
use crate::routing::{Directions, RouteError, RouteProvider};

use super::config::VehicleConfig;
use super::cost::{CostCalculator, CostError};
use super::select::FuelStopSelector;

/// Error from route optimization.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("Location not found: {address}")]
    LocationNotFound { address: String },

    #[error("Location must be within the USA. '{address}' is in {country}")]
    NonDomesticLocation { address: String, country: String },

    #[error("Geocoding service unavailable")]
    GeocodingUnavailable,

    #[error("No route found")]
    RouteNotFound,

    #[error("Routing service unavailable")]
    RoutingUnavailable,

    /// Unexpected failure. `context` is for logs only.
    #[error("Internal server error")]
    Internal { context: String },
}

impl OptimizeError {
    /// Whether the caller can fix the failure by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, OptimizeError::Internal { .. })
    }
}

impl From<ResolveError> for OptimizeError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::LocationNotFound { address } => {
                OptimizeError::LocationNotFound { address }
            }
            ResolveError::NonDomesticLocation { address, country } => {
                OptimizeError::NonDomesticLocation { address, country }
            }
            ResolveError::Unavailable(_) => OptimizeError::GeocodingUnavailable,
        }
    }
}

impl From<RouteError> for OptimizeError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::NotFound => OptimizeError::RouteNotFound,
            RouteError::Unavailable(_) => OptimizeError::RoutingUnavailable,
        }
    }
}

impl From<CostError> for OptimizeError {
    fn from(e: CostError) -> Self {
        error!(error = %e, "route optimization failed");
        OptimizeError::Internal {
            context: e.to_string(),
        }
    }
}

/// Composes geocoding, routing, stop selection and costing.
///
/// Every collaborator is injected, so each can be substituted in tests.
pub struct Optimizer<G, D, C> {
    resolver: GeocodingResolver<G>,
    routes: RouteProvider<D>,
    catalog: C,
    selector: FuelStopSelector,
    calculator: CostCalculator,
}

impl<G, D, C> Optimizer<G, D, C>
where
    G: Geocoder,
    D: Directions,
    C: StationCatalog,
{
    pub fn new(
        resolver: GeocodingResolver<G>,
        routes: RouteProvider<D>,
        catalog: C,
        vehicle: VehicleConfig,
    ) -> Self {
        Self {
            resolver,
            routes,
            catalog,
            selector: FuelStopSelector::new(vehicle.clone()),
            calculator: CostCalculator::new(vehicle),
        }
    }

    /// Plan the cheapest fuel stops from `start` to `end`.
    ///
    /// Both endpoints are geocoded concurrently. If both fail, the start
    /// location's error is reported.
    pub async fn optimize(
        &self,
        start: &str,
        end: &str,
    ) -> Result<OptimizationResult, OptimizeError> {
        let (start_coord, end_coord) =
            futures::join!(self.resolver.resolve(start), self.resolver.resolve(end));
        let start_coord = start_coord?;
        let end_coord = end_coord?;

        let route = self.routes.get_route(start_coord, end_coord).await?;

        let stops = self.selector.select_stops(&route, &self.catalog).await;

        let result = self.calculator.calculate(&route, stops)?;

        info!(
            start,
            end,
            stops = result.stops_count,
            cost = result.total_fuel_cost,
            "route optimized"
        );
        Ok(result)
    }

    #[cfg(test)]
    pub(crate) fn resolver(&self) -> &GeocodingResolver<G> {
        &self.resolver
    }
}

#[cfg(test)]
#[path = "optimize_tests.rs"]
mod tests;
