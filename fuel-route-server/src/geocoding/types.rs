//! ArcGIS World Geocoding Service response types.
//!
//! Only the fields the resolver needs are modelled. ArcGIS reports many
//! failures as HTTP 200 with an `error` object in the body.

use serde::Deserialize;

/// Error payload embedded in an otherwise successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct ArcGisErrorBody {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// `findAddressCandidates` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatesResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub error: Option<ArcGisErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub address: String,
    pub location: Point,
    #[serde(default)]
    pub score: f64,
}

/// ArcGIS point: `x` is longitude, `y` is latitude (WGS84).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// `reverseGeocode` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseResponse {
    pub address: Option<ReverseAddress>,
    pub error: Option<ArcGisErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReverseAddress {
    #[serde(rename = "Match_addr", default)]
    pub match_addr: String,
    #[serde(rename = "LongLabel", default)]
    pub long_label: String,
    #[serde(rename = "CountryCode", default)]
    pub country_code: String,
}

impl ReverseAddress {
    /// The country descriptor for this address.
    ///
    /// Uses `CountryCode` when present, otherwise the last comma-separated
    /// component of the long label or matched address.
    pub fn country(&self) -> Option<String> {
        let code = self.country_code.trim();
        if !code.is_empty() {
            return Some(code.to_string());
        }

        [&self.long_label, &self.match_addr]
            .into_iter()
            .filter_map(|label| label.rsplit(',').next())
            .map(str::trim)
            .find(|part| !part.is_empty())
            .map(str::to_string)
    }
}
