//! Geocoding error types.

use crate::domain::InvalidCoordinate;
use crate::retry::Transient;

/// Errors from a geocoding provider.
#[derive(Debug, thiserror::Error)]
pub enum GeocoderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status or an error payload
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider returned a coordinate outside the valid range
    #[error("provider returned {0}")]
    BadCoordinate(#[from] InvalidCoordinate),
}

impl Transient for GeocoderError {
    fn is_transient(&self) -> bool {
        matches!(self, GeocoderError::Http(e) if e.is_transient())
    }
}

/// Errors from resolving an address.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The geocoder found no match for the address
    #[error("Location not found: {address}")]
    LocationNotFound { address: String },

    /// The address resolved to a point outside the USA
    #[error("Location must be within the USA. '{address}' is in {country}")]
    NonDomesticLocation { address: String, country: String },

    /// The geocoder timed out or failed
    #[error("Geocoding service unavailable")]
    Unavailable(#[source] GeocoderError),
}
