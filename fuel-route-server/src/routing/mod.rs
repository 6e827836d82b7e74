//! Driving directions.
//!
//! Resolves coordinate pairs to driving routes via OpenRouteService
//! (`driving-car` profile). Distances are converted from meters to miles.

mod client;
mod error;
mod provider;
mod types;

pub use client::{OrsClient, OrsConfig};
pub use error::{DirectionsError, RouteError};
pub use provider::{Directions, RawRoute, RouteProvider};
