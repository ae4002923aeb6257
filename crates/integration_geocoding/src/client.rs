//! Open-Meteo geocoding client
//!
//! HTTP client for the Open-Meteo Geocoding API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{GeocodingResponse, GeocodingResult};

/// Geocoding client errors
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the geocoding service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the geocoding service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Open-Meteo Geocoding API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of candidates to request (default: 10)
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Response language (default: "en")
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_result_limit() -> u8 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            result_limit: default_result_limit(),
            language: default_language(),
        }
    }
}

/// Geocoding client trait for resolving place names
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for places matching a free-text name
    async fn search(&self, query: &str) -> Result<Vec<GeocodingResult>, GeocodingError>;
}

/// Open-Meteo geocoding HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocodingClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GeocodingError> {
        Self::new(GeocodingConfig::default())
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url)
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoGeocodingClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<Vec<GeocodingResult>, GeocodingError> {
        let url = self.search_url();
        debug!(url = %url, "Searching locations");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", query.to_string()),
                ("count", self.config.result_limit.to_string()),
                ("language", self.config.language.clone()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeocodingError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let results = body.into_results();
        debug!(candidates = results.len(), "Geocoding lookup complete");
        Ok(results)
    }
}
