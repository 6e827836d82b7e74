//! Fuel station and fuel stop types.

use std::fmt;

use super::Coordinate;

/// Highest retail price per gallon a station record may carry.
pub const MAX_PRICE_PER_GALLON: f64 = 10.0;

/// Error returned when a station record fails validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidStation {
    #[error("station {id}: state must be a 2-letter code, got {state:?}")]
    State { id: i64, state: String },

    #[error("station {id}: price {price} must be within [0, {MAX_PRICE_PER_GALLON}]")]
    Price { id: i64, price: f64 },
}

/// A fuel station from the catalog.
///
/// Read-only to the pipeline. The state is always two uppercase ASCII
/// letters and the price is within [0, 10].
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStation {
    pub id: i64,
    pub name: String,
    pub city: String,
    state: String,
    retail_price: f64,
    pub location: Coordinate,
}

impl FuelStation {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        city: impl Into<String>,
        state: &str,
        retail_price: f64,
        location: Coordinate,
    ) -> Result<Self, InvalidStation> {
        let state = state.trim();
        if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(InvalidStation::State {
                id,
                state: state.to_string(),
            });
        }

        if !retail_price.is_finite() || !(0.0..=MAX_PRICE_PER_GALLON).contains(&retail_price) {
            return Err(InvalidStation::Price {
                id,
                price: retail_price,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            city: city.into(),
            state: state.to_ascii_uppercase(),
            retail_price,
            location,
        })
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn retail_price(&self) -> f64 {
        self.retail_price
    }
}

impl fmt::Display for FuelStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}, {} (${})",
            self.name, self.city, self.state, self.retail_price
        )
    }
}

/// A refueling stop in a computed plan.
///
/// Copied from the station at selection time, so later catalog changes
/// do not alter a plan already handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStop {
    pub name: String,
    pub city: String,
    pub state: String,
    pub price: f64,
    pub location: Coordinate,
}

impl From<&FuelStation> for FuelStop {
    fn from(station: &FuelStation) -> Self {
        Self {
            name: station.name.clone(),
            city: station.city.clone(),
            state: station.state.clone(),
            price: station.retail_price,
            location: station.location,
        }
    }
}
