//! Driving route and optimization result types.

use super::{Coordinate, FuelStop};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Convert a distance in meters to miles.
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// A driving route between two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Ordered path of the route geometry.
    pub path: Vec<Coordinate>,

    /// Total driving distance in miles.
    pub distance_miles: f64,
}

impl RouteResult {
    pub fn new(path: Vec<Coordinate>, distance_miles: f64) -> Self {
        Self {
            path,
            distance_miles,
        }
    }
}

/// The final plan handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub route_geometry: Vec<Coordinate>,
    pub fuel_stops: Vec<FuelStop>,

    /// Rounded to 1 decimal place.
    pub total_distance_miles: f64,

    /// Rounded to 2 decimal places. Zero when there are no stops.
    pub total_fuel_cost: f64,

    /// Rounded to 1 decimal place.
    pub estimated_gallons: f64,

    pub stops_count: usize,
}
