//! Unit tests for the optimization pipeline.

use super::*;
use crate::cache::{CacheConfig, GeocodeCache, RouteCache};
use crate::catalog::InMemoryCatalog;
use crate::domain::{Coordinate, FuelStation};
use crate::geocoding::GeocoderError;
use crate::routing::{DirectionsError, RawRoute};
use std::collections::HashMap;
use std::sync::Mutex;

fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

fn nyc() -> Coordinate {
    coord(40.7128, -74.0060)
}

fn philly() -> Coordinate {
    coord(39.9526, -75.1652)
}

fn la() -> Coordinate {
    coord(34.0522, -118.2437)
}

fn toronto() -> Coordinate {
    coord(43.6532, -79.3832)
}

/// Mock geocoder: address → (location, country).
struct MockGeocoder {
    places: HashMap<String, (Coordinate, String)>,
    forward_calls: Mutex<Vec<String>>,
    reverse_calls: Mutex<usize>,
}

impl MockGeocoder {
    fn new() -> Self {
        let mut places = HashMap::new();
        for (address, location, country) in [
            ("New York, NY", nyc(), "USA"),
            ("Philadelphia, PA", philly(), "USA"),
            ("Los Angeles, CA", la(), "USA"),
            ("Toronto, Canada", toronto(), "CAN"),
        ] {
            places.insert(address.to_string(), (location, country.to_string()));
        }
        Self {
            places,
            forward_calls: Mutex::new(Vec::new()),
            reverse_calls: Mutex::new(0),
        }
    }

    fn forward_calls_for(&self, address: &str) -> usize {
        self.forward_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.as_str() == address)
            .count()
    }
}

impl Geocoder for MockGeocoder {
    async fn forward_geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocoderError> {
        self.forward_calls.lock().unwrap().push(address.to_string());
        if address == "Timeout City" {
            return Err(GeocoderError::Api {
                status: 504,
                message: "gateway timeout".into(),
            });
        }
        Ok(self.places.get(address).map(|(c, _)| *c))
    }

    async fn reverse_geocode(&self, location: Coordinate) -> Result<Option<String>, GeocoderError> {
        *self.reverse_calls.lock().unwrap() += 1;
        Ok(self
            .places
            .values()
            .find(|(c, _)| *c == location)
            .map(|(_, country)| country.clone()))
    }
}

/// Mock directions: fixed distances per (start, end), straight-line geometry.
struct MockDirections {
    distances: Vec<((Coordinate, Coordinate), f64)>,
    fail: bool,
}

impl MockDirections {
    fn new() -> Self {
        Self {
            distances: vec![
                ((nyc(), philly()), 95.0 * 1609.344),
                ((nyc(), la()), 2800.0 * 1609.344),
            ],
            fail: false,
        }
    }
}

impl Directions for MockDirections {
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<RawRoute>, DirectionsError> {
        if self.fail {
            return Err(DirectionsError::Api {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(self
            .distances
            .iter()
            .find(|((s, e), _)| *s == start && *e == end)
            .map(|(_, meters)| RawRoute {
                path: vec![start, coord(39.10, -94.58), end],
                distance_meters: *meters,
            }))
    }
}

fn station(id: i64, price: f64, location: Coordinate) -> FuelStation {
    FuelStation::new(id, format!("Station {id}"), "Kansas City", "MO", price, location).unwrap()
}

fn optimizer(
    directions: MockDirections,
    stations: Vec<FuelStation>,
) -> Optimizer<MockGeocoder, MockDirections, InMemoryCatalog> {
    let cache = CacheConfig::default();
    Optimizer::new(
        GeocodingResolver::new(MockGeocoder::new(), GeocodeCache::new(&cache)),
        RouteProvider::new(directions, RouteCache::new(&cache)),
        InMemoryCatalog::from_stations(stations),
        VehicleConfig::default(),
    )
}

#[tokio::test]
async fn short_route_has_no_stops() {
    let opt = optimizer(MockDirections::new(), vec![station(1, 3.50, coord(40.0, -75.0))]);

    let result = opt.optimize("New York, NY", "Philadelphia, PA").await.unwrap();

    assert_eq!(result.stops_count, 0);
    assert!(result.fuel_stops.is_empty());
    assert_eq!(result.total_fuel_cost, 0.0);
    assert_eq!(result.total_distance_miles, 95.0);
    assert_eq!(result.estimated_gallons, 9.5);
}

#[tokio::test]
async fn long_route_uses_single_station_for_every_stop() {
    let opt = optimizer(MockDirections::new(), vec![station(7, 3.50, coord(38.0, -97.0))]);

    let result = opt.optimize("New York, NY", "Los Angeles, CA").await.unwrap();

    assert_eq!(result.stops_count, 5);
    assert_eq!(result.fuel_stops.len(), 5);
    assert!(result.fuel_stops.iter().all(|s| s.name == "Station 7"));
    assert_eq!(result.estimated_gallons, 280.0);
    assert_eq!(result.total_fuel_cost, 980.0);
    assert_eq!(result.route_geometry.len(), 3);
}

#[tokio::test]
async fn long_route_picks_cheapest_in_corridor() {
    let opt = optimizer(
        MockDirections::new(),
        vec![
            station(1, 3.75, coord(38.0, -97.0)),
            station(2, 3.25, coord(36.0, -110.0)),
            station(3, 1.99, coord(46.0, -100.0)), // outside the corridor
        ],
    );

    let result = opt.optimize("New York, NY", "Los Angeles, CA").await.unwrap();

    assert!(result.fuel_stops.iter().all(|s| s.price == 3.25));
    assert_eq!(result.total_fuel_cost, 910.0);
}

#[tokio::test]
async fn empty_corridor_costs_nothing() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    let result = opt.optimize("New York, NY", "Los Angeles, CA").await.unwrap();

    assert_eq!(result.stops_count, 0);
    assert_eq!(result.total_fuel_cost, 0.0);
    assert_eq!(result.estimated_gallons, 280.0);
}

#[tokio::test]
async fn non_domestic_endpoint_is_rejected() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    let err = opt.optimize("New York, NY", "Toronto, Canada").await.unwrap_err();

    assert!(matches!(
        err,
        OptimizeError::NonDomesticLocation { ref country, .. } if country == "CAN"
    ));
    assert!(err.is_client_error());
    assert!(err.to_string().contains("CAN"));
}

#[tokio::test]
async fn unknown_location_never_reverse_geocodes() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    let err = opt.optimize("Qwxyzzy", "Qwxyzzy Two").await.unwrap_err();

    assert!(matches!(err, OptimizeError::LocationNotFound { ref address } if address == "Qwxyzzy"));
    assert_eq!(*opt.resolver().geocoder().reverse_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn start_error_wins_when_both_fail() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    let err = opt.optimize("Toronto, Canada", "Nowhere").await.unwrap_err();
    assert!(matches!(err, OptimizeError::NonDomesticLocation { .. }));

    let err = opt.optimize("Nowhere", "Toronto, Canada").await.unwrap_err();
    assert!(matches!(err, OptimizeError::LocationNotFound { .. }));
}

#[tokio::test]
async fn geocoding_outage_is_unavailable() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    let err = opt.optimize("Timeout City", "New York, NY").await.unwrap_err();
    assert!(matches!(err, OptimizeError::GeocodingUnavailable));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn missing_route_is_not_found() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    // No canned route in this direction
    let err = opt.optimize("Philadelphia, PA", "New York, NY").await.unwrap_err();
    assert!(matches!(err, OptimizeError::RouteNotFound));
}

#[tokio::test]
async fn routing_outage_is_unavailable() {
    let directions = MockDirections {
        fail: true,
        ..MockDirections::new()
    };
    let opt = optimizer(directions, Vec::new());

    let err = opt.optimize("New York, NY", "Los Angeles, CA").await.unwrap_err();
    assert!(matches!(err, OptimizeError::RoutingUnavailable));
    assert_eq!(err.to_string(), "Routing service unavailable");
}

#[tokio::test]
async fn repeated_requests_geocode_once() {
    let opt = optimizer(MockDirections::new(), Vec::new());

    opt.optimize("New York, NY", "Philadelphia, PA").await.unwrap();
    opt.optimize("New York, NY", "Philadelphia, PA").await.unwrap();

    let geocoder = opt.resolver().geocoder();
    assert_eq!(geocoder.forward_calls_for("New York, NY"), 1);
    assert_eq!(geocoder.forward_calls_for("Philadelphia, PA"), 1);
}

#[test]
fn internal_errors_hide_context() {
    let err = OptimizeError::from(CostError::InvalidDistance(f64::NAN));

    assert!(!err.is_client_error());
    assert_eq!(err.to_string(), "Internal server error");
    assert!(matches!(err, OptimizeError::Internal { ref context } if context.contains("NaN")));
}
