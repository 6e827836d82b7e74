//! Fuel station catalog.
//!
//! The catalog is a read-only data source queried by bounding box.
//! Many optimizations may query it concurrently.

mod error;
mod memory;

use std::future::Future;

use crate::domain::{BoundingBox, FuelStation};

pub use error::CatalogError;
pub use memory::{InMemoryCatalog, StationRecord};

/// Trait for station catalogs.
pub trait StationCatalog {
    /// All stations inside `bbox`, ordered by ascending price.
    fn query_by_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<FuelStation>, CatalogError>> + Send;
}
