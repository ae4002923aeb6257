//! Forecast data models
//!
//! Raw response types for the Open-Meteo Forecast API plus the normalized
//! snapshot the client hands out. Normalization happens once, at the parse
//! boundary: integral rounding for temperatures, wind, pressure and UV,
//! meters-to-kilometers for visibility, and zero defaults for missing
//! precipitation fields.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Raw current-conditions block, field names as sent by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentData {
    pub time: String,
    pub temperature_2m: f64,
    pub weather_code: u8,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: u16,
    pub relative_humidity_2m: u8,
    pub surface_pressure: f64,
    pub visibility: f64,
    pub uv_index: f64,
    /// The provider omits this under some conditions; missing means none
    #[serde(default)]
    pub precipitation: Option<f64>,
}

/// Raw daily block: parallel arrays, one entry per day
#[derive(Debug, Clone, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weather_code: Vec<u8>,
    pub precipitation_sum: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<u8>>,
    pub wind_speed_10m_max: Vec<f64>,
    pub uv_index_max: Vec<f64>,
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

/// Normalized current conditions
///
/// The precipitation probability is borrowed from the first daily entry;
/// the provider has no corresponding "current" field.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSnapshot {
    /// Observation time in the requested timezone
    pub observed_at: NaiveDateTime,
    /// Temperature in °C, rounded
    pub temperature: i32,
    /// WMO weather code
    pub weather_code: u8,
    /// Wind speed in km/h, rounded
    pub wind_speed: i32,
    /// Wind direction in degrees
    pub wind_direction: u16,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Surface pressure in hPa, rounded
    pub pressure: i32,
    /// Visibility in km (converted from meters, rounded)
    pub visibility_km: i32,
    /// UV index, rounded
    pub uv_index: i32,
    /// Precipitation in mm, 0 when the provider omits it
    pub precipitation: f64,
    /// Precipitation probability in percent, borrowed from day 0
    pub precipitation_probability: u8,
}

/// Normalized daily window as parallel per-field sequences
#[derive(Debug, Clone, PartialEq)]
pub struct DailySnapshot {
    /// Calendar days
    pub dates: Vec<NaiveDate>,
    /// Maximum temperatures in °C, rounded
    pub temperature_max: Vec<i32>,
    /// Minimum temperatures in °C, rounded
    pub temperature_min: Vec<i32>,
    /// WMO weather codes
    pub weather_codes: Vec<u8>,
    /// Precipitation sums in mm
    pub precipitation: Vec<f64>,
    /// Precipitation probabilities in percent, 0 where the provider
    /// reported none
    pub precipitation_probability: Vec<u8>,
    /// Maximum wind speeds in km/h, rounded
    pub wind_speed: Vec<i32>,
    /// Maximum UV indices, rounded
    pub uv_index: Vec<i32>,
}

/// A complete normalized fetch result
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    /// Latitude echoed by the provider
    pub latitude: f64,
    /// Longitude echoed by the provider
    pub longitude: f64,
    /// Normalized current conditions
    pub current: CurrentSnapshot,
    /// Normalized daily window
    pub daily: DailySnapshot,
}
