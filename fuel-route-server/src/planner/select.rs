//! Fuel stop selection.
//!
//! Stations are filtered to the route corridor (the bounding box of the
//! route path) and the cheapest one is chosen for every required stop.
//! The same station may be picked for every stop: selection does not
//! exclude stations already used or consider progress along the route.

use tracing::{debug, error, warn};

use crate::catalog::StationCatalog;
use crate::domain::{BoundingBox, FuelStation, FuelStop, RouteResult};

use super::config::VehicleConfig;

/// Number of stops for a route longer than the vehicle range.
///
/// Always at least one. Callers check the range first.
pub fn stops_needed(distance_miles: f64, range_miles: f64) -> usize {
    ((distance_miles / range_miles).floor() as usize).max(1)
}

/// The cheapest station, first minimum wins on ties.
pub fn find_cheapest(stations: &[FuelStation]) -> Option<&FuelStation> {
    let mut cheapest: Option<&FuelStation> = None;
    for station in stations {
        if cheapest.is_none_or(|c| station.retail_price() < c.retail_price()) {
            cheapest = Some(station);
        }
    }
    cheapest
}

/// Chooses refueling stops for a route.
#[derive(Debug, Clone)]
pub struct FuelStopSelector {
    config: VehicleConfig,
}

impl FuelStopSelector {
    pub fn new(config: VehicleConfig) -> Self {
        Self { config }
    }

    /// Select the stops for `route`.
    ///
    /// Returns no stops when the route fits in one tank, when the corridor
    /// holds no stations, or when the catalog query fails. That last case
    /// is logged and degrades to a zero-stop plan.
    pub async fn select_stops<C: StationCatalog>(
        &self,
        route: &RouteResult,
        catalog: &C,
    ) -> Vec<FuelStop> {
        if route.distance_miles <= self.config.range_miles {
            return Vec::new();
        }

        let Some(corridor) = BoundingBox::around(&route.path) else {
            warn!("route has no geometry, skipping fuel stops");
            return Vec::new();
        };

        let stations = match catalog.query_by_bounding_box(&corridor).await {
            Ok(stations) => stations,
            Err(e) => {
                error!(error = %e, "error finding fuel stops");
                return Vec::new();
            }
        };

        if stations.is_empty() {
            warn!(?corridor, "no fuel stations found in route area");
            return Vec::new();
        }

        let needed = stops_needed(route.distance_miles, self.config.range_miles);
        debug!(needed, candidates = stations.len(), "selecting fuel stops");

        (0..needed)
            .filter_map(|_| find_cheapest(&stations).map(FuelStop::from))
            .collect()
    }
}
