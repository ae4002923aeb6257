//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::FetchError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::entities::{CurrentConditions, DailyForecastSeries, ForecastBundle, Location};
use domain::value_objects::{Humidity, WeatherCode};
use integration_weather::{
    ForecastSnapshot, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for forecast retrieval using the Open-Meteo API
pub struct WeatherAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        Ok(Self {
            client: OpenMeteoClient::new(config)?,
        })
    }

    /// Create an adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Ok(Self {
            client: OpenMeteoClient::with_defaults()?,
        })
    }

    /// Map a transport error into the fetch taxonomy
    fn map_error(err: WeatherError) -> FetchError {
        match err {
            WeatherError::ConnectionFailed(e) | WeatherError::RequestFailed(e) => {
                FetchError::Request(e)
            }
            WeatherError::ParseError(e) => FetchError::Malformed(e),
            WeatherError::InvalidCoordinates => FetchError::Request(err.to_string()),
            WeatherError::ServiceUnavailable(e) => FetchError::Unavailable(e),
            WeatherError::RateLimitExceeded => FetchError::RateLimited,
        }
    }

    /// Assemble the domain bundle from a normalized snapshot
    ///
    /// The bundle is built whole or not at all; a series that violates
    /// the parallel-length invariant fails the fetch.
    fn build_bundle(
        location: Location,
        snapshot: ForecastSnapshot,
    ) -> Result<ForecastBundle, FetchError> {
        let daily = DailyForecastSeries::new(
            snapshot.daily.dates,
            snapshot.daily.temperature_max,
            snapshot.daily.temperature_min,
            snapshot
                .daily
                .weather_codes
                .into_iter()
                .map(WeatherCode)
                .collect(),
            snapshot.daily.precipitation,
            snapshot.daily.precipitation_probability,
            snapshot.daily.wind_speed,
            snapshot.daily.uv_index,
        )
        .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let current = CurrentConditions {
            temperature: snapshot.current.temperature,
            weather_code: WeatherCode(snapshot.current.weather_code),
            wind_speed: snapshot.current.wind_speed,
            wind_direction: snapshot.current.wind_direction,
            humidity: Humidity::clamped(snapshot.current.humidity),
            pressure: snapshot.current.pressure,
            visibility_km: snapshot.current.visibility_km,
            uv_index: snapshot.current.uv_index,
            observed_at: snapshot.current.observed_at,
            precipitation: snapshot.current.precipitation,
            precipitation_probability: snapshot.current.precipitation_probability,
        };

        Ok(ForecastBundle {
            location,
            current,
            daily,
        })
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn fetch_forecast(&self, location: &Location) -> Result<ForecastBundle, FetchError> {
        let snapshot = self
            .client
            .fetch_forecast(
                location.coordinates.latitude(),
                location.coordinates.longitude(),
            )
            .await
            .map_err(Self::map_error)?;

        debug!(days = snapshot.daily.dates.len(), "forecast snapshot retrieved");
        Self::build_bundle(location.clone(), snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::value_objects::{CountryCode, GeoLocation};
    use integration_weather::{CurrentSnapshot, DailySnapshot};

    fn berlin() -> Location {
        Location {
            name: "Berlin".to_string(),
            coordinates: GeoLocation::berlin(),
            country: "Germany".to_string(),
            admin1: Some("Berlin".to_string()),
            country_code: CountryCode::germany(),
        }
    }

    fn snapshot(days: usize) -> ForecastSnapshot {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        ForecastSnapshot {
            latitude: 52.52,
            longitude: 13.405,
            current: CurrentSnapshot {
                observed_at: "2024-06-01T14:00:00".parse().expect("valid datetime"),
                temperature: 22,
                weather_code: 2,
                wind_speed: 11,
                wind_direction: 230,
                humidity: 58,
                pressure: 1014,
                visibility_km: 8,
                uv_index: 4,
                precipitation: 0.0,
                precipitation_probability: 10,
            },
            daily: DailySnapshot {
                dates: (0..days)
                    .map(|i| start + chrono::Days::new(i as u64))
                    .collect(),
                temperature_max: vec![22; days],
                temperature_min: vec![12; days],
                weather_codes: vec![2; days],
                precipitation: vec![0.0; days],
                precipitation_probability: vec![10; days],
                wind_speed: vec![15; days],
                uv_index: vec![5; days],
            },
        }
    }

    #[test]
    fn builds_bundle_from_snapshot() {
        let bundle =
            WeatherAdapter::build_bundle(berlin(), snapshot(7)).expect("should build");
        assert_eq!(bundle.daily.len(), 7);
        assert_eq!(bundle.current.temperature, 22);
        assert_eq!(bundle.current.weather_code, WeatherCode(2));
        assert_eq!(bundle.location.name, "Berlin");
    }

    #[test]
    fn empty_series_fails_the_fetch() {
        let result = WeatherAdapter::build_bundle(berlin(), snapshot(0));
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[test]
    fn mismatched_series_fails_the_fetch() {
        let mut broken = snapshot(7);
        broken.daily.wind_speed.pop();
        let result = WeatherAdapter::build_bundle(berlin(), broken);
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[test]
    fn map_error_variants() {
        assert!(matches!(
            WeatherAdapter::map_error(WeatherError::RequestFailed("timeout".to_string())),
            FetchError::Request(_)
        ));
        assert!(matches!(
            WeatherAdapter::map_error(WeatherError::ParseError("bad json".to_string())),
            FetchError::Malformed(_)
        ));
        assert!(matches!(
            WeatherAdapter::map_error(WeatherError::ServiceUnavailable("HTTP 503".to_string())),
            FetchError::Unavailable(_)
        ));
        assert!(matches!(
            WeatherAdapter::map_error(WeatherError::RateLimitExceeded),
            FetchError::RateLimited
        ));
    }

    #[test]
    fn adapter_creation() {
        assert!(WeatherAdapter::with_defaults().is_ok());
    }
}
