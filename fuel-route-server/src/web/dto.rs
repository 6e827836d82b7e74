//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, FuelStop, OptimizationResult};

/// Maximum length of a location string.
pub const MAX_LOCATION_LEN: usize = 200;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const INVALID_LOCATION: &str =
    "Location must contain only letters, spaces, commas, periods, and hyphens";
const SAME_LOCATIONS: &str = "Start and end locations must be different";

/// Key for errors that concern the request as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation failures: field name → reasons.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Request to optimize a route.
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    /// Starting location (e.g., "New York, NY")
    #[serde(default)]
    pub start: Option<String>,

    /// Destination location (e.g., "Los Angeles, CA")
    #[serde(default)]
    pub end: Option<String>,
}

/// A validated pair of locations, whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPair {
    pub start: String,
    pub end: String,
}

impl OptimizeRequest {
    /// Validate the request.
    ///
    /// Every failing field is reported, not just the first.
    pub fn validate(&self) -> Result<LocationPair, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut check = |field: &str, value: Option<&str>| {
            validate_location(value)
                .map_err(|reason| {
                    errors
                        .entry(field.to_string())
                        .or_default()
                        .push(reason.to_string())
                })
                .ok()
        };
        let start = check("start", self.start.as_deref());
        let end = check("end", self.end.as_deref());

        match (start, end) {
            (Some(start), Some(end)) => {
                if start.to_lowercase() == end.to_lowercase() {
                    errors.insert(
                        NON_FIELD_ERRORS.to_string(),
                        vec![SAME_LOCATIONS.to_string()],
                    );
                    Err(errors)
                } else {
                    Ok(LocationPair { start, end })
                }
            }
            _ => Err(errors),
        }
    }
}

fn validate_location(value: Option<&str>) -> Result<String, &'static str> {
    let value = value.ok_or(REQUIRED)?.trim();

    if value.is_empty() {
        return Err(BLANK);
    }
    if value.chars().count() > MAX_LOCATION_LEN {
        return Err("Ensure this field has no more than 200 characters.");
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
    {
        return Err(INVALID_LOCATION);
    }

    Ok(value.to_string())
}

/// GeoJSON `LineString` of the route.
#[derive(Debug, Serialize)]
pub struct GeometryResult {
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// `[longitude, latitude]` positions
    pub coordinates: Vec<[f64; 2]>,
}

impl GeometryResult {
    pub fn from_path(path: &[Coordinate]) -> Self {
        Self {
            kind: "LineString",
            coordinates: path.iter().map(Coordinate::to_lng_lat).collect(),
        }
    }
}

/// A fuel stop in the response.
#[derive(Debug, Serialize)]
pub struct FuelStopResult {
    pub name: String,
    pub city: String,
    pub state: String,

    /// Price per gallon
    pub price: f64,

    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
}

impl From<&FuelStop> for FuelStopResult {
    fn from(stop: &FuelStop) -> Self {
        Self {
            name: stop.name.clone(),
            city: stop.city.clone(),
            state: stop.state.clone(),
            price: stop.price,
            coordinates: [stop.location.latitude(), stop.location.longitude()],
        }
    }
}

/// Response for route optimization.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub route_geometry: GeometryResult,
    pub fuel_stops: Vec<FuelStopResult>,
    pub total_distance_miles: f64,
    pub total_fuel_cost: f64,
    pub estimated_gallons: f64,
    pub stops_count: usize,
}

impl OptimizeResponse {
    pub fn from_result(result: &OptimizationResult) -> Self {
        Self {
            route_geometry: GeometryResult::from_path(&result.route_geometry),
            fuel_stops: result.fuel_stops.iter().map(FuelStopResult::from).collect(),
            total_distance_miles: result.total_distance_miles,
            total_fuel_cost: result.total_fuel_cost,
            estimated_gallons: result.estimated_gallons,
            stops_count: result.stops_count,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Validation error response.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: ValidationErrors,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
