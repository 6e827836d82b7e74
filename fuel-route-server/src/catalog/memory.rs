//! In-memory station catalog loaded from a JSON file.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{BoundingBox, Coordinate, FuelStation};

use super::StationCatalog;
use super::error::CatalogError;

/// On-disk representation of a geocoded station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub opis_id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub retail_price: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl StationRecord {
    fn into_station(self) -> Result<FuelStation, String> {
        let location = Coordinate::new(self.latitude, self.longitude).map_err(|e| e.to_string())?;
        FuelStation::new(
            self.opis_id,
            self.name.trim(),
            self.city.trim(),
            &self.state,
            self.retail_price,
            location,
        )
        .map_err(|e| e.to_string())
    }
}

/// Read-only catalog held in memory, sorted by ascending price.
///
/// Stations with equal prices keep their load order. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    stations: Arc<Vec<FuelStation>>,
}

impl InMemoryCatalog {
    /// Build a catalog from already-validated stations.
    pub fn from_stations(mut stations: Vec<FuelStation>) -> Self {
        stations.sort_by(|a, b| a.retail_price().total_cmp(&b.retail_price()));
        Self {
            stations: Arc::new(stations),
        }
    }

    /// Build a catalog from records, skipping invalid ones and duplicate ids.
    pub fn from_records(records: Vec<StationRecord>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut stations = Vec::with_capacity(records.len());

        for record in records {
            let id = record.opis_id;
            let station = match record.into_station() {
                Ok(station) => station,
                Err(reason) => {
                    warn!(id, %reason, "skipping invalid station record");
                    continue;
                }
            };
            if !seen.insert(id) {
                warn!(id, "skipping duplicate station id");
                continue;
            }
            stations.push(station);
        }

        Self::from_stations(stations)
    }

    /// Load a catalog from a JSON array of [`StationRecord`]s.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let records: Vec<StationRecord> =
            serde_json::from_str(&json).map_err(|e| CatalogError::Json {
                message: e.to_string(),
            })?;

        let total = records.len();
        let catalog = Self::from_records(records);
        info!(
            path = %path.display(),
            loaded = catalog.len(),
            skipped = total - catalog.len(),
            "loaded station catalog"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl StationCatalog for InMemoryCatalog {
    async fn query_by_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<FuelStation>, CatalogError> {
        Ok(self
            .stations
            .iter()
            .filter(|s| bbox.contains(&s.location))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: i64, price: f64, lat: f64, lng: f64) -> StationRecord {
        StationRecord {
            opis_id: id,
            name: format!("Station {id}"),
            city: "Springfield".to_string(),
            state: "il".to_string(),
            retail_price: price,
            latitude: lat,
            longitude: lng,
        }
    }

    fn corridor() -> BoundingBox {
        BoundingBox {
            min_lat: 30.0,
            max_lat: 40.0,
            min_lng: -100.0,
            max_lng: -90.0,
        }
    }

    #[tokio::test]
    async fn query_filters_and_sorts_by_price() {
        let catalog = InMemoryCatalog::from_records(vec![
            record(1, 3.75, 35.0, -95.0),
            record(2, 3.25, 36.0, -96.0),
            record(3, 2.99, 45.0, -95.0), // outside
            record(4, 3.50, 31.0, -91.0),
        ]);

        let found = catalog.query_by_bounding_box(&corridor()).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[tokio::test]
    async fn equal_prices_keep_load_order() {
        let catalog = InMemoryCatalog::from_records(vec![
            record(9, 3.00, 35.0, -95.0),
            record(5, 3.00, 36.0, -96.0),
        ]);

        let found = catalog.query_by_bounding_box(&corridor()).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![9, 5]);
    }

    #[test]
    fn skips_invalid_and_duplicate_records() {
        let catalog = InMemoryCatalog::from_records(vec![
            record(1, 3.75, 35.0, -95.0),
            record(1, 3.10, 35.0, -95.0),
            record(2, 12.0, 35.0, -95.0),
            record(3, 3.00, 95.0, -95.0),
        ]);
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn invalid_record_does_not_claim_its_id() {
        let catalog = InMemoryCatalog::from_records(vec![
            record(4, 42.0, 35.0, -95.0),
            record(4, 3.40, 35.0, -95.0),
        ]);

        let found = catalog.query_by_bounding_box(&corridor()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].retail_price(), 3.40);
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        let records = vec![record(1, 3.75, 35.0, -95.0), record(2, 3.25, 36.0, -96.0)];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let catalog = InMemoryCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(matches!(
            InMemoryCatalog::load("/nonexistent/stations.json"),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            InMemoryCatalog::load(&path),
            Err(CatalogError::Json { .. })
        ));
    }
}
