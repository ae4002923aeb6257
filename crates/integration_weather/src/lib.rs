//! Open-Meteo forecast integration
//!
//! Client for the Open-Meteo Weather API (<https://open-meteo.com>).
//! Fetches current conditions plus a fixed daily window and normalizes
//! units at the parse boundary, without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    ApiResponse, CurrentData, CurrentSnapshot, DailyData, DailySnapshot, ForecastSnapshot,
};
