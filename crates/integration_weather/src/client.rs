//! Open-Meteo forecast client
//!
//! HTTP client for the Open-Meteo Weather API. A fetch succeeds or fails
//! as a single unit: any transport or parse problem fails the whole call
//! and no partial snapshot is ever produced.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiResponse, CurrentSnapshot, DailySnapshot, ForecastSnapshot};

/// The fixed set of "current" fields requested from the provider
const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m,wind_direction_10m,\
     relative_humidity_2m,surface_pressure,visibility,uv_index,precipitation";

/// The fixed set of "daily" fields requested from the provider
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code,\
     precipitation_sum,precipitation_probability_max,wind_speed_10m_max,uv_index_max";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
///
/// The timezone anchors the daily window for every looked-up location
/// regardless of the location's own zone; this is a deliberate
/// simplification preserved for compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (1-16, default: 7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// IANA timezone the window is anchored to (default: Europe/Berlin)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    7
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
            timezone: default_timezone(),
        }
    }
}

/// Weather client trait for fetching forecast data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch the normalized forecast for a coordinate pair
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSnapshot, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Round to the nearest integer
    #[allow(clippy::cast_possible_truncation)]
    fn round(value: f64) -> i32 {
        value.round() as i32
    }

    /// Parse a provider datetime string (`2024-06-01T14:00`, with or
    /// without seconds)
    fn parse_datetime(s: &str) -> Result<NaiveDateTime, WeatherError> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(dt);
        }
        Err(WeatherError::ParseError(format!(
            "Invalid datetime format: {s}"
        )))
    }

    /// Parse a provider date string (`2024-06-01`)
    fn parse_date(s: &str) -> Result<NaiveDate, WeatherError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| WeatherError::ParseError(format!("Invalid date: {e}")))
    }

    /// Normalize the current block, borrowing the precipitation
    /// probability from the first daily entry
    fn parse_current(
        data: &crate::models::CurrentData,
        daily: &DailySnapshot,
    ) -> Result<CurrentSnapshot, WeatherError> {
        Ok(CurrentSnapshot {
            observed_at: Self::parse_datetime(&data.time)?,
            temperature: Self::round(data.temperature_2m),
            weather_code: data.weather_code,
            wind_speed: Self::round(data.wind_speed_10m),
            wind_direction: data.wind_direction_10m,
            humidity: data.relative_humidity_2m,
            pressure: Self::round(data.surface_pressure),
            visibility_km: Self::round(data.visibility / 1000.0),
            uv_index: Self::round(data.uv_index),
            precipitation: data.precipitation.unwrap_or(0.0),
            precipitation_probability: daily
                .precipitation_probability
                .first()
                .copied()
                .unwrap_or(0),
        })
    }

    /// Normalize the daily block
    fn parse_daily(daily: &crate::models::DailyData) -> Result<DailySnapshot, WeatherError> {
        let len = daily.time.len();

        let field = |name: &str, actual: usize| -> Result<(), WeatherError> {
            if actual == len {
                Ok(())
            } else {
                Err(WeatherError::ParseError(format!(
                    "daily field {name} has {actual} entries, expected {len}"
                )))
            }
        };
        field("temperature_2m_max", daily.temperature_2m_max.len())?;
        field("temperature_2m_min", daily.temperature_2m_min.len())?;
        field("weather_code", daily.weather_code.len())?;
        field("precipitation_sum", daily.precipitation_sum.len())?;
        field("wind_speed_10m_max", daily.wind_speed_10m_max.len())?;
        field("uv_index_max", daily.uv_index_max.len())?;

        let dates = daily
            .time
            .iter()
            .map(|s| Self::parse_date(s))
            .collect::<Result<Vec<_>, _>>()?;

        let probabilities = (0..len)
            .map(|i| {
                daily
                    .precipitation_probability_max
                    .as_ref()
                    .and_then(|p| p.get(i).copied())
                    .unwrap_or(0)
            })
            .collect();

        Ok(DailySnapshot {
            dates,
            temperature_max: daily.temperature_2m_max.iter().copied().map(Self::round).collect(),
            temperature_min: daily.temperature_2m_min.iter().copied().map(Self::round).collect(),
            weather_codes: daily.weather_code.clone(),
            precipitation: daily.precipitation_sum.clone(),
            precipitation_probability: probabilities,
            wind_speed: daily.wind_speed_10m_max.iter().copied().map(Self::round).collect(),
            uv_index: daily.uv_index_max.iter().copied().map(Self::round).collect(),
        })
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSnapshot, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/forecast", self.config.base_url);
        let days = self.config.forecast_days.clamp(1, 16);
        debug!(url = %url, days, "Fetching weather forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", self.config.timezone.clone()),
                ("forecast_days", days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let current_data = api_response.current.as_ref().ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let daily_data = api_response.daily.as_ref().ok_or_else(|| {
            WeatherError::ParseError("No daily forecast data in response".to_string())
        })?;

        let daily = Self::parse_daily(daily_data)?;
        let current = Self::parse_current(current_data, &daily)?;

        Ok(ForecastSnapshot {
            latitude: api_response.latitude,
            longitude: api_response.longitude,
            current,
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentData, DailyData};

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.forecast_days, 7);
        assert_eq!(config.timezone, "Europe/Berlin");
    }

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(OpenMeteoClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(52.52, 13.41).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(-91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, 181.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_parse_datetime_without_seconds() {
        let dt = OpenMeteoClient::parse_datetime("2024-06-01T14:00").expect("should parse");
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 14:00");
    }

    #[test]
    fn test_parse_datetime_with_seconds() {
        let dt = OpenMeteoClient::parse_datetime("2024-06-01T14:00:30").expect("should parse");
        assert_eq!(
            dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-06-01 14:00:30"
        );
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(OpenMeteoClient::parse_datetime("invalid").is_err());
        assert!(OpenMeteoClient::parse_datetime("2024-06-01").is_err());
    }

    fn sample_daily() -> DailyData {
        DailyData {
            time: vec!["2024-06-01".to_string(), "2024-06-02".to_string()],
            temperature_2m_max: vec![21.6, 23.4],
            temperature_2m_min: vec![11.2, 12.8],
            weather_code: vec![2, 61],
            precipitation_sum: vec![0.0, 4.2],
            precipitation_probability_max: Some(vec![10, 80]),
            wind_speed_10m_max: vec![14.5, 19.3],
            uv_index_max: vec![4.6, 3.4],
        }
    }

    #[test]
    fn test_parse_daily_rounds_values() {
        let daily = OpenMeteoClient::parse_daily(&sample_daily()).expect("should parse");
        assert_eq!(daily.temperature_max, vec![22, 23]);
        assert_eq!(daily.temperature_min, vec![11, 13]);
        assert_eq!(daily.wind_speed, vec![15, 19]);
        assert_eq!(daily.uv_index, vec![5, 3]);
        assert_eq!(daily.precipitation_probability, vec![10, 80]);
        assert_eq!(
            daily.dates[0],
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
        );
    }

    #[test]
    fn test_parse_daily_missing_probabilities_default_to_zero() {
        let mut raw = sample_daily();
        raw.precipitation_probability_max = None;
        let daily = OpenMeteoClient::parse_daily(&raw).expect("should parse");
        assert_eq!(daily.precipitation_probability, vec![0, 0]);
    }

    #[test]
    fn test_parse_daily_rejects_mismatched_lengths() {
        let mut raw = sample_daily();
        raw.weather_code = vec![2];
        let err = OpenMeteoClient::parse_daily(&raw).expect_err("length mismatch");
        assert!(matches!(err, WeatherError::ParseError(_)));
        assert!(err.to_string().contains("weather_code"));
    }

    #[test]
    fn test_parse_current_normalizes_units() {
        let daily = OpenMeteoClient::parse_daily(&sample_daily()).expect("should parse");
        let data = CurrentData {
            time: "2024-06-01T14:00".to_string(),
            temperature_2m: 21.6,
            weather_code: 2,
            wind_speed_10m: 11.4,
            wind_direction_10m: 230,
            relative_humidity_2m: 58,
            surface_pressure: 1013.6,
            visibility: 8046.0,
            uv_index: 4.2,
            precipitation: None,
        };

        let current = OpenMeteoClient::parse_current(&data, &daily).expect("should parse");
        assert_eq!(current.temperature, 22);
        assert_eq!(current.wind_speed, 11);
        assert_eq!(current.pressure, 1014);
        assert_eq!(current.visibility_km, 8);
        assert_eq!(current.uv_index, 4);
        assert!((current.precipitation - 0.0).abs() < f64::EPSILON);
        // borrowed from day 0 of the daily series
        assert_eq!(current.precipitation_probability, 10);
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));

        let err = WeatherError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenMeteoClient::with_defaults().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = WeatherConfig {
            base_url: "https://custom.api.com".to_string(),
            timeout_secs: 60,
            forecast_days: 14,
            timezone: "Europe/Vienna".to_string(),
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        let deserialized: WeatherConfig = serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(deserialized.base_url, "https://custom.api.com");
        assert_eq!(deserialized.forecast_days, 14);
        assert_eq!(deserialized.timezone, "Europe/Vienna");
    }
}
