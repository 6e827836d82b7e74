//! Trip cost aggregation.
//!
//! The whole trip's fuel is priced at the mean price of the selected stops;
//! there is no per-leg split.

use crate::domain::{FuelStop, OptimizationResult, RouteResult};

use super::config::VehicleConfig;

/// Error from cost aggregation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    /// Route distance cannot be costed
    #[error("route distance {0} is not a finite non-negative number")]
    InvalidDistance(f64),
}

/// Round to a fixed number of decimal places, halves to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Computes gallons and cost for a route and its stops.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    config: VehicleConfig,
}

impl CostCalculator {
    pub fn new(config: VehicleConfig) -> Self {
        Self { config }
    }

    /// Build the final result.
    ///
    /// Distance and gallons are rounded to 1 decimal place, cost to 2.
    pub fn calculate(
        &self,
        route: &RouteResult,
        fuel_stops: Vec<FuelStop>,
    ) -> Result<OptimizationResult, CostError> {
        let distance = route.distance_miles;
        if !distance.is_finite() || distance < 0.0 {
            return Err(CostError::InvalidDistance(distance));
        }

        let gallons = distance / self.config.mpg;

        let total_cost = if fuel_stops.is_empty() {
            0.0
        } else {
            let mean_price =
                fuel_stops.iter().map(|s| s.price).sum::<f64>() / fuel_stops.len() as f64;
            gallons * mean_price
        };

        Ok(OptimizationResult {
            route_geometry: route.path.clone(),
            stops_count: fuel_stops.len(),
            fuel_stops,
            total_distance_miles: round_to(distance, 1),
            total_fuel_cost: round_to(total_cost, 2),
            estimated_gallons: round_to(gallons, 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn stop(price: f64) -> FuelStop {
        FuelStop {
            name: "Pilot".into(),
            city: "Amarillo".into(),
            state: "TX".into(),
            price,
            location: Coordinate::new(35.2, -101.8).unwrap(),
        }
    }

    fn route(distance_miles: f64) -> RouteResult {
        RouteResult::new(vec![Coordinate::new(35.0, -100.0).unwrap()], distance_miles)
    }

    fn calculator() -> CostCalculator {
        CostCalculator::new(VehicleConfig::default())
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(95.04, 1), 95.0);
        assert_eq!(round_to(95.06, 1), 95.1);
        assert_eq!(round_to(979.996, 2), 980.0);
        assert_eq!(round_to(12.345_6, 2), 12.35);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(390.625, 2), 390.62);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn exact_half_totals_round_to_even() {
        let stops = vec![stop(3.125), stop(3.125)];
        let result = calculator().calculate(&route(1250.0), stops).unwrap();

        // 125 gal * 3.125 = 390.625
        assert_eq!(result.total_fuel_cost, 390.62);
        assert_eq!(result.estimated_gallons, 125.0);

        let result = calculator().calculate(&route(2.5), Vec::new()).unwrap();
        assert_eq!(result.estimated_gallons, 0.2);
        assert_eq!(result.total_distance_miles, 2.5);
    }

    #[test]
    fn no_stops_costs_nothing() {
        let result = calculator().calculate(&route(95.0), Vec::new()).unwrap();

        assert_eq!(result.stops_count, 0);
        assert_eq!(result.total_fuel_cost, 0.0);
        assert_eq!(result.estimated_gallons, 9.5);
        assert_eq!(result.total_distance_miles, 95.0);
    }

    #[test]
    fn single_station_repeated() {
        let stops = vec![stop(3.50); 5];
        let result = calculator().calculate(&route(2800.0), stops).unwrap();

        assert_eq!(result.stops_count, 5);
        assert_eq!(result.estimated_gallons, 280.0);
        assert_eq!(result.total_fuel_cost, 980.0);
    }

    #[test]
    fn whole_trip_priced_at_mean() {
        let stops = vec![stop(3.00), stop(4.00)];
        let result = calculator().calculate(&route(1234.56), stops).unwrap();

        // 123.456 gal * 3.50
        assert_eq!(result.total_fuel_cost, 432.1);
        assert_eq!(result.estimated_gallons, 123.5);
        assert_eq!(result.total_distance_miles, 1234.6);
    }

    #[test]
    fn rejects_bad_distance() {
        let err = calculator()
            .calculate(&route(f64::NAN), Vec::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "route distance NaN is not a finite non-negative number"
        );
        assert!(calculator().calculate(&route(-1.0), Vec::new()).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    proptest! {
        /// Gallons always equal the rounded distance over mpg
        #[test]
        fn gallons_match_distance(distance in 0.0f64..50_000.0, mpg in 1.0f64..60.0) {
            let calc = CostCalculator::new(VehicleConfig::new(500.0, mpg).unwrap());
            let route = RouteResult::new(vec![Coordinate::new(0.0, 0.0).unwrap()], distance);
            let result = calc.calculate(&route, Vec::new()).unwrap();

            prop_assert_eq!(result.estimated_gallons, round_to(distance / mpg, 1));
            prop_assert_eq!(result.total_fuel_cost, 0.0);
        }
    }
}
