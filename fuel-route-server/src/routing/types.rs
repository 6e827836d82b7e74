//! OpenRouteService GeoJSON directions response types.

use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::DirectionsError;
use super::provider::RawRoute;

/// Top-level GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: LineString,
    #[serde(default)]
    pub properties: Properties,
}

/// GeoJSON `LineString`; positions are `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub segments: Vec<Segment>,
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    /// Meters
    pub distance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    /// Meters
    #[serde(default)]
    pub distance: f64,
}

/// Convert the first feature of a response to a raw route.
///
/// Returns `Ok(None)` when the response has no features.
pub fn first_route(response: &DirectionsResponse) -> Result<Option<RawRoute>, DirectionsError> {
    let Some(feature) = response.features.first() else {
        return Ok(None);
    };

    let distance_meters = feature
        .properties
        .segments
        .first()
        .map(|s| s.distance)
        .or_else(|| feature.properties.summary.as_ref().map(|s| s.distance))
        .ok_or_else(|| DirectionsError::Json {
            message: "route feature has no distance".to_string(),
        })?;

    if !distance_meters.is_finite() || distance_meters < 0.0 {
        return Err(DirectionsError::Json {
            message: format!("invalid route distance: {distance_meters}"),
        });
    }

    let path = feature
        .geometry
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            // Positions may carry a third elevation component
            [lng, lat, ..] => Ok(Coordinate::from_lng_lat([*lng, *lat])?),
            _ => Err(DirectionsError::Json {
                message: format!("malformed position: {position:?}"),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(RawRoute {
        path,
        distance_meters,
    }))
}
