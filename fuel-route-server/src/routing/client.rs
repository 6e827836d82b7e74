//! OpenRouteService directions HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;
use crate::retry::{DEFAULT_MAX_RETRIES, retry_transient};

use super::error::DirectionsError;
use super::provider::{Directions, RawRoute};
use super::types::{DirectionsResponse, first_route};

/// Default base URL for OpenRouteService.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing profile used for every request.
const PROFILE: &str = "driving-car";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the OpenRouteService client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key, sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after a timed-out request
    pub max_retries: u32,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            max_retries: DEFAULT_MAX_RETRIES,
        }
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

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }
}

/// OpenRouteService directions client.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    semaphore: Arc<Semaphore>,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, DirectionsError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| DirectionsError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_retries: config.max_retries,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn fetch(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<RawRoute>, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/v2/directions/{}/geojson", self.base_url, PROFILE);
        let body = json!({
            "coordinates": [start.to_lng_lat(), end.to_lng_lat()],
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectionsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
            })?;

        let route = first_route(&directions)?;
        debug!(
            %start,
            %end,
            found = route.is_some(),
            "fetched directions"
        );
        Ok(route)
    }
}

impl Directions for OrsClient {
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<RawRoute>, DirectionsError> {
        retry_transient("directions", self.max_retries, || self.fetch(start, end)).await
    }
}
