//! Web layer for the fuel route optimizer.
//!
//! Provides the JSON endpoint for route optimization and a health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
