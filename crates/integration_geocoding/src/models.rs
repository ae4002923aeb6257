//! Geocoding data models
//!
//! Raw response types for the Open-Meteo Geocoding API.

use serde::Deserialize;

/// One candidate place from the geocoding provider
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    /// Provider-side record id
    pub id: i64,
    /// Place name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Country name
    #[serde(default)]
    pub country: Option<String>,
    /// First-level administrative region (state), when reported
    #[serde(default)]
    pub admin1: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Raw API response
///
/// The provider omits the `results` key entirely when nothing matches;
/// treat that as an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    /// Candidate places in provider ranking order
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

impl GeocodingResponse {
    /// The candidates, empty when the provider reported none
    #[must_use]
    pub fn into_results(self) -> Vec<GeocodingResult> {
        self.results.unwrap_or_default()
    }
}
