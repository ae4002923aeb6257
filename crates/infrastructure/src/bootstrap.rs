//! Session wiring
//!
//! Composition root for a UI shell: builds the HTTP clients, wraps them
//! in adapters and hands back a ready `WeatherSession`.

use std::sync::Arc;

use application::services::{LocationSearchService, WeatherSession};
use thiserror::Error;

use crate::adapters::{GeocodingAdapter, WeatherAdapter};
use crate::config::AppConfig;
use crate::jitter::ThreadRngJitter;

/// Errors while assembling a session
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Geocoding client failed to initialize
    #[error("geocoding client init failed: {0}")]
    Geocoding(#[from] integration_geocoding::GeocodingError),

    /// Weather client failed to initialize
    #[error("weather client init failed: {0}")]
    Weather(#[from] integration_weather::WeatherError),
}

/// Build a `WeatherSession` from configuration
///
/// # Errors
///
/// Returns an error when either HTTP client cannot be initialized.
pub fn build_session(config: AppConfig) -> Result<WeatherSession, BootstrapError> {
    let geocoding = GeocodingAdapter::new(config.geocoding)?;
    let weather = WeatherAdapter::new(config.weather)?;

    let search = LocationSearchService::new(Arc::new(geocoding), config.search);
    Ok(WeatherSession::new(
        search,
        Arc::new(weather),
        Box::new(ThreadRngJitter::new()),
    ))
}
