//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::error::SearchError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::entities::Location;
use domain::value_objects::{CountryCode, GeoLocation};
use integration_geocoding::{
    GeocodingClient, GeocodingConfig, GeocodingError, GeocodingResult, OpenMeteoGeocodingClient,
};
use tracing::{debug, instrument, warn};

/// Adapter for location search using the Open-Meteo Geocoding API
pub struct GeocodingAdapter {
    client: OpenMeteoGeocodingClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"OpenMeteoGeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        Ok(Self {
            client: OpenMeteoGeocodingClient::new(config)?,
        })
    }

    /// Create an adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_defaults() -> Result<Self, GeocodingError> {
        Ok(Self {
            client: OpenMeteoGeocodingClient::with_defaults()?,
        })
    }

    /// Map a transport error into the search taxonomy
    fn map_error(err: GeocodingError) -> SearchError {
        SearchError::Provider(err.to_string())
    }

    /// Convert one provider candidate into a domain location
    ///
    /// Candidates with unusable coordinates or no country code are
    /// dropped with a diagnostic rather than failing the whole list;
    /// suggestion lookups degrade, they do not abort.
    fn map_candidate(candidate: GeocodingResult) -> Option<Location> {
        let coordinates = match GeoLocation::new(candidate.latitude, candidate.longitude) {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(name = %candidate.name, error = %err, "dropping candidate with bad coordinates");
                return None;
            }
        };

        let Some(raw_code) = candidate.country_code else {
            debug!(name = %candidate.name, "dropping candidate without country code");
            return None;
        };
        let country_code = match CountryCode::new(raw_code.as_str()) {
            Ok(code) => code,
            Err(err) => {
                warn!(name = %candidate.name, error = %err, "dropping candidate with bad country code");
                return None;
            }
        };

        Some(Location {
            name: candidate.name,
            coordinates,
            country: candidate.country.unwrap_or_default(),
            admin1: candidate.admin1,
            country_code,
        })
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Location>, SearchError> {
        let candidates = self
            .client
            .search(query)
            .await
            .map_err(Self::map_error)?;

        let locations: Vec<Location> = candidates
            .into_iter()
            .filter_map(Self::map_candidate)
            .collect();

        debug!(query, candidates = locations.len(), "geocoding adapter resolved candidates");
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, lat: f64, code: Option<&str>) -> GeocodingResult {
        GeocodingResult {
            id: 1,
            name: name.to_string(),
            latitude: lat,
            longitude: 13.4,
            country: Some("Germany".to_string()),
            admin1: Some("Berlin".to_string()),
            country_code: code.map(str::to_string),
        }
    }

    #[test]
    fn maps_complete_candidate() {
        let location =
            GeocodingAdapter::map_candidate(candidate("Berlin", 52.52, Some("DE")))
                .expect("should map");
        assert_eq!(location.name, "Berlin");
        assert_eq!(location.country_code.as_str(), "DE");
        assert_eq!(location.admin1.as_deref(), Some("Berlin"));
    }

    #[test]
    fn drops_candidate_with_invalid_coordinates() {
        assert!(GeocodingAdapter::map_candidate(candidate("Broken", 123.0, Some("DE"))).is_none());
    }

    #[test]
    fn drops_candidate_without_country_code() {
        assert!(GeocodingAdapter::map_candidate(candidate("Nowhere", 52.0, None)).is_none());
    }

    #[test]
    fn drops_candidate_with_malformed_country_code() {
        assert!(GeocodingAdapter::map_candidate(candidate("Odd", 52.0, Some("DEU"))).is_none());
    }

    #[test]
    fn map_error_is_provider_failure() {
        let err = GeocodingAdapter::map_error(GeocodingError::RateLimitExceeded);
        assert!(matches!(err, SearchError::Provider(_)));
    }

    #[test]
    fn adapter_creation() {
        assert!(GeocodingAdapter::with_defaults().is_ok());
    }
}
