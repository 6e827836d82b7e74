//! Routing error types.

use crate::domain::InvalidCoordinate;
use crate::retry::Transient;

/// Errors from a directions provider.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by routing API")]
    RateLimited,

    /// Failed to parse or interpret the response
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Route geometry contained an out-of-range position
    #[error("route geometry contains {0}")]
    BadCoordinate(#[from] InvalidCoordinate),
}

impl Transient for DirectionsError {
    fn is_transient(&self) -> bool {
        matches!(self, DirectionsError::Http(e) if e.is_transient())
    }
}

/// Errors from fetching a route.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The provider returned no route between the points
    #[error("No route found")]
    NotFound,

    /// The provider failed
    #[error("Routing service unavailable")]
    Unavailable(#[source] DirectionsError),
}
