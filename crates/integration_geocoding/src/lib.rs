//! Open-Meteo geocoding integration
//!
//! Client for the Open-Meteo Geocoding API
//! (<https://open-meteo.com/en/docs/geocoding-api>). Resolves free-text
//! place names to coordinates and metadata without requiring an API key.

pub mod client;
mod models;

pub use client::{GeocodingClient, GeocodingConfig, GeocodingError, OpenMeteoGeocodingClient};
pub use models::{GeocodingResponse, GeocodingResult};
