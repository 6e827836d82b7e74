//! Address geocoding.
//!
//! Resolves free-text locations to coordinates and confirms, via reverse
//! geocoding, that they lie inside the USA. The production provider is the
//! ArcGIS World Geocoding Service; any [`Geocoder`] can be substituted.

mod client;
mod error;
mod resolver;
mod types;

pub use client::{ArcGisClient, ArcGisConfig};
pub use error::{GeocoderError, ResolveError};
pub use resolver::{DOMESTIC_COUNTRY_CODES, Geocoder, GeocodingResolver, is_domestic};
