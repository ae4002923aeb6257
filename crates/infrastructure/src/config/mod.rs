//! Application configuration
//!
//! Aggregates the per-concern configuration sections; every value that
//! used to be an embedded literal (target country, timezone, debounce,
//! timeouts, result cap) is an explicit, defaulted field here. Loads from
//! an optional `config` file with `STADTWETTER_*` environment overrides.

use application::services::SearchConfig;
use integration_geocoding::GeocodingConfig;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search behavior (country filter, query minimum, debounce)
    #[serde(default)]
    pub search: SearchConfig,

    /// Geocoding service settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Forecast service settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// File keys come from `config.{toml,yaml,json}` in the working
    /// directory; environment variables use a double-underscore
    /// separator, e.g. `STADTWETTER_SEARCH__COUNTRY=AT` or
    /// `STADTWETTER_WEATHER__TIMEZONE=Europe/Vienna`.
    ///
    /// # Errors
    ///
    /// Returns an error when a source is malformed or a value fails to
    /// deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("STADTWETTER")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = AppConfig::default();
        assert_eq!(config.search.country.as_str(), "DE");
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(
            config.geocoding.base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.geocoding.result_limit, 10);
        assert_eq!(config.geocoding.language, "en");
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.weather.timezone, "Europe/Berlin");
        assert_eq!(config.weather.timeout_secs, 30);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let parsed: AppConfig = toml_like(
            r#"{
                "search": { "country": "AT" },
                "weather": { "forecast_days": 5 }
            }"#,
        );
        assert_eq!(parsed.search.country.as_str(), "AT");
        assert_eq!(parsed.search.min_query_len, 2);
        assert_eq!(parsed.weather.forecast_days, 5);
        assert_eq!(parsed.weather.timezone, "Europe/Berlin");
    }

    #[test]
    fn round_trips_through_serde() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).expect("should serialize");
        let parsed: AppConfig = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed.search.debounce_ms, config.search.debounce_ms);
        assert_eq!(parsed.weather.timezone, config.weather.timezone);
    }

    fn toml_like(json: &str) -> AppConfig {
        serde_json::from_str(json).expect("should deserialize")
    }
}
