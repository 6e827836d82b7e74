//! Fuel route planning.
//!
//! This module implements the optimization pipeline that answers:
//! "Driving from here to there, where should I refuel and what will
//! the fuel cost?"

mod config;
mod cost;
mod optimize;
mod select;

pub use config::{InvalidVehicleConfig, MIN_RANGE_MILES, VehicleConfig};
pub use cost::{CostCalculator, CostError, round_to};
pub use optimize::{OptimizeError, Optimizer};
pub use select::{FuelStopSelector, find_cheapest, stops_needed};
