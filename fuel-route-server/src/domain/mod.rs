//! Domain types for the fuel route optimizer.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod fuel;
mod route;

pub use coordinate::{BoundingBox, Coordinate, InvalidCoordinate};
pub use fuel::{FuelStation, FuelStop, InvalidStation, MAX_PRICE_PER_GALLON};
pub use route::{METERS_PER_MILE, OptimizationResult, RouteResult, meters_to_miles};
