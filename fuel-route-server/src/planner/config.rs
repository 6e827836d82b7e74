//! Vehicle configuration for fuel planning.

/// Shortest range accepted. Bounds the number of stops a route can need.
pub const MIN_RANGE_MILES: f64 = 1.0;

/// Error returned for an unusable vehicle parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidVehicleConfig {
    #[error("vehicle range must be finite and at least 1 mile, got {0}")]
    Range(f64),

    #[error("vehicle mpg must be positive and finite, got {0}")]
    Mpg(f64),
}

/// Vehicle parameters used for stop selection and costing.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleConfig {
    /// Miles a full tank covers before a stop is mandatory.
    pub range_miles: f64,

    /// Fuel efficiency in miles per gallon.
    pub mpg: f64,
}

impl VehicleConfig {
    /// Create a configuration, rejecting unusable values.
    pub fn new(range_miles: f64, mpg: f64) -> Result<Self, InvalidVehicleConfig> {
        if !range_miles.is_finite() || range_miles < MIN_RANGE_MILES {
            return Err(InvalidVehicleConfig::Range(range_miles));
        }
        if !mpg.is_finite() || mpg <= 0.0 {
            return Err(InvalidVehicleConfig::Mpg(mpg));
        }
        Ok(Self { range_miles, mpg })
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            range_miles: 500.0,
            mpg: 10.0,
        }
    }
}
