//! ArcGIS World Geocoding Service HTTP client.
//!
//! Provides forward geocoding (`findAddressCandidates`) and reverse
//! geocoding (`reverseGeocode`). Timeouts are retried a bounded number of
//! times; other failures are returned immediately.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;
use crate::retry::{DEFAULT_MAX_RETRIES, retry_transient};

use super::error::GeocoderError;
use super::resolver::Geocoder;
use super::types::{ArcGisErrorBody, CandidatesResponse, ReverseResponse};

/// Default base URL for the ArcGIS World Geocoding Service.
const DEFAULT_BASE_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// ArcGIS reports "no address here" for reverse lookups with this code.
const NO_ADDRESS_CODE: i64 = 400;

/// Configuration for the ArcGIS client.
#[derive(Debug, Clone)]
pub struct ArcGisConfig {
    /// Optional API token. The public endpoint works without one.
    pub token: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Forward geocoding timeout
    pub forward_timeout: Duration,
    /// Reverse geocoding timeout
    pub reverse_timeout: Duration,
    /// Retries after a timed-out request
    pub max_retries: u32,
}

impl Default for ArcGisConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            forward_timeout: Duration::from_secs(10),
            reverse_timeout: Duration::from_secs(5),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ArcGisConfig {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeouts(mut self, forward: Duration, reverse: Duration) -> Self {
        self.forward_timeout = forward;
        self.reverse_timeout = reverse;
        self
    }

    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }
}

/// ArcGIS geocoding client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct ArcGisClient {
    http: reqwest::Client,
    config: ArcGisConfig,
    semaphore: Arc<Semaphore>,
}

impl ArcGisClient {
    pub fn new(config: ArcGisConfig) -> Result<Self, GeocoderError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            config,
        })
    }

    /// Issue a GET and return the body, mapping HTTP failures.
    async fn get_body(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<String, GeocoderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeocoderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.config.base_url, endpoint);

        let mut request = self.http.get(&url).query(query).timeout(timeout);
        if let Some(token) = &self.config.token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocoderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    async fn find_candidates(&self, address: &str) -> Result<Option<Coordinate>, GeocoderError> {
        let body = self
            .get_body(
                "findAddressCandidates",
                &[
                    ("SingleLine", address.to_string()),
                    ("f", "json".to_string()),
                    ("maxLocations", "1".to_string()),
                    ("outSR", "4326".to_string()),
                ],
                self.config.forward_timeout,
            )
            .await?;

        let response: CandidatesResponse =
            serde_json::from_str(&body).map_err(|e| GeocoderError::Json {
                message: e.to_string(),
            })?;

        if let Some(error) = response.error {
            return Err(api_error(error));
        }

        let Some(best) = response.candidates.first() else {
            return Ok(None);
        };

        debug!(address, matched = %best.address, score = best.score, "geocoded address");
        Ok(Some(Coordinate::new(best.location.y, best.location.x)?))
    }

    async fn reverse(&self, location: Coordinate) -> Result<Option<String>, GeocoderError> {
        let body = self
            .get_body(
                "reverseGeocode",
                &[
                    (
                        "location",
                        format!("{},{}", location.longitude(), location.latitude()),
                    ),
                    ("f", "json".to_string()),
                    ("outSR", "4326".to_string()),
                ],
                self.config.reverse_timeout,
            )
            .await?;

        let response: ReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocoderError::Json {
                message: e.to_string(),
            })?;

        match response.error {
            Some(error) if error.code == NO_ADDRESS_CODE => return Ok(None),
            Some(error) => return Err(api_error(error)),
            None => {}
        }

        Ok(response.address.and_then(|a| a.country()))
    }
}

fn api_error(error: ArcGisErrorBody) -> GeocoderError {
    GeocoderError::Api {
        status: u16::try_from(error.code).unwrap_or(0),
        message: error.message,
    }
}

impl Geocoder for ArcGisClient {
    async fn forward_geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocoderError> {
        retry_transient("forward geocode", self.config.max_retries, || {
            self.find_candidates(address)
        })
        .await
    }

    async fn reverse_geocode(&self, location: Coordinate) -> Result<Option<String>, GeocoderError> {
        retry_transient("reverse geocode", self.config.max_retries, || {
            self.reverse(location)
        })
        .await
    }
}
