//! Forecast entities
//!
//! A successful fetch produces one `ForecastBundle` atomically; the next
//! successful fetch replaces it wholesale. Failed fetches never produce a
//! partial bundle.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::entities::Location;
use crate::errors::DomainError;
use crate::value_objects::{Humidity, WeatherCode};

/// Current conditions at a location, normalized at the fetch boundary
///
/// Temperatures, wind, pressure, visibility and UV are already rounded;
/// visibility is in kilometers. The precipitation probability is borrowed
/// from the first entry of the daily series because the provider has no
/// corresponding "current" field.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    /// Temperature in °C
    pub temperature: i32,
    /// Weather condition code
    pub weather_code: WeatherCode,
    /// Wind speed in km/h
    pub wind_speed: i32,
    /// Wind direction in degrees (0-360)
    pub wind_direction: u16,
    /// Relative humidity
    pub humidity: Humidity,
    /// Surface pressure in hPa
    pub pressure: i32,
    /// Visibility in km
    pub visibility_km: i32,
    /// UV index
    pub uv_index: i32,
    /// Observation time in the forecast timezone
    pub observed_at: NaiveDateTime,
    /// Precipitation amount in mm (0 when the provider omits it)
    pub precipitation: f64,
    /// Precipitation probability in percent, borrowed from day 0
    pub precipitation_probability: u8,
}

/// One day of the forecast series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyEntry {
    /// Calendar day
    pub date: NaiveDate,
    /// Maximum temperature in °C
    pub temperature_max: i32,
    /// Minimum temperature in °C
    pub temperature_min: i32,
    /// Weather condition code
    pub weather_code: WeatherCode,
    /// Precipitation sum in mm
    pub precipitation: f64,
    /// Precipitation probability in percent
    pub precipitation_probability: u8,
    /// Maximum wind speed in km/h
    pub wind_speed: i32,
    /// Maximum UV index
    pub uv_index: i32,
}

/// The daily forecast window as parallel per-field sequences
///
/// Invariant: every sequence has the same, non-zero length, and index i
/// describes the same calendar day in all of them. The constructor is the
/// only way to build a series, so the invariant holds for every instance.
#[derive(Debug, Clone, Serialize)]
pub struct DailyForecastSeries {
    dates: Vec<NaiveDate>,
    temperature_max: Vec<i32>,
    temperature_min: Vec<i32>,
    weather_codes: Vec<WeatherCode>,
    precipitation: Vec<f64>,
    precipitation_probability: Vec<u8>,
    wind_speed: Vec<i32>,
    uv_index: Vec<i32>,
}

impl DailyForecastSeries {
    /// Build a series from parallel sequences
    ///
    /// # Errors
    ///
    /// Returns a validation error when the sequences differ in length or
    /// the series is empty. Both the probability borrow for current
    /// conditions and beyond-horizon synthesis need at least one real day.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dates: Vec<NaiveDate>,
        temperature_max: Vec<i32>,
        temperature_min: Vec<i32>,
        weather_codes: Vec<WeatherCode>,
        precipitation: Vec<f64>,
        precipitation_probability: Vec<u8>,
        wind_speed: Vec<i32>,
        uv_index: Vec<i32>,
    ) -> Result<Self, DomainError> {
        let len = dates.len();
        if len == 0 {
            return Err(DomainError::ValidationError(
                "daily forecast series must not be empty".to_string(),
            ));
        }

        let lengths = [
            temperature_max.len(),
            temperature_min.len(),
            weather_codes.len(),
            precipitation.len(),
            precipitation_probability.len(),
            wind_speed.len(),
            uv_index.len(),
        ];
        if lengths.iter().any(|&l| l != len) {
            return Err(DomainError::ValidationError(format!(
                "daily forecast sequences must all have length {len}, got {lengths:?}"
            )));
        }

        Ok(Self {
            dates,
            temperature_max,
            temperature_min,
            weather_codes,
            precipitation,
            precipitation_probability,
            wind_speed,
            uv_index,
        })
    }

    /// Number of real forecast days
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// A series is never empty; kept for API completeness
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The first (anchor, "today") date of the window
    #[must_use]
    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// The day at `index`, when inside the real window
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<DailyEntry> {
        if index >= self.len() {
            return None;
        }
        Some(DailyEntry {
            date: self.dates[index],
            temperature_max: self.temperature_max[index],
            temperature_min: self.temperature_min[index],
            weather_code: self.weather_codes[index],
            precipitation: self.precipitation[index],
            precipitation_probability: self.precipitation_probability[index],
            wind_speed: self.wind_speed[index],
            uv_index: self.uv_index[index],
        })
    }

    /// The last real day, the anchor for beyond-horizon synthesis
    #[must_use]
    pub fn last_entry(&self) -> DailyEntry {
        // len() >= 1 by construction
        let last = self.len() - 1;
        DailyEntry {
            date: self.dates[last],
            temperature_max: self.temperature_max[last],
            temperature_min: self.temperature_min[last],
            weather_code: self.weather_codes[last],
            precipitation: self.precipitation[last],
            precipitation_probability: self.precipitation_probability[last],
            wind_speed: self.wind_speed[last],
            uv_index: self.uv_index[last],
        }
    }
}

/// Everything a successful fetch produces, created and replaced atomically
#[derive(Debug, Clone, Serialize)]
pub struct ForecastBundle {
    /// The location the forecast was fetched for
    pub location: Location,
    /// Current conditions
    pub current: CurrentConditions,
    /// 7-day daily series
    pub daily: DailyForecastSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn series_of(days: usize) -> DailyForecastSeries {
        let start = date("2024-06-01");
        DailyForecastSeries::new(
            (0..days)
                .map(|i| start + chrono::Days::new(i as u64))
                .collect(),
            (0..days).map(|i| 20 + i as i32).collect(),
            (0..days).map(|i| 10 + i as i32).collect(),
            vec![WeatherCode(2); days],
            vec![0.4; days],
            vec![35; days],
            vec![12; days],
            vec![5; days],
        )
        .expect("valid series")
    }

    #[test]
    fn rejects_empty_series() {
        let result = DailyForecastSeries::new(
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = DailyForecastSeries::new(
            vec![date("2024-06-01"), date("2024-06-02")],
            vec![20, 21],
            vec![10], // one short
            vec![WeatherCode(0), WeatherCode(1)],
            vec![0.0, 0.0],
            vec![10, 20],
            vec![5, 6],
            vec![3, 4],
        );
        assert!(result.is_err());
        let err = result.expect_err("mismatch").to_string();
        assert!(err.contains("length"));
    }

    #[test]
    fn entry_inside_window() {
        let series = series_of(7);
        let day2 = series.entry(2).expect("inside window");
        assert_eq!(day2.date, date("2024-06-03"));
        assert_eq!(day2.temperature_max, 22);
        assert_eq!(day2.temperature_min, 12);
    }

    #[test]
    fn entry_outside_window_is_none() {
        let series = series_of(7);
        assert!(series.entry(7).is_none());
        assert!(series.entry(100).is_none());
    }

    #[test]
    fn last_entry_is_final_day() {
        let series = series_of(7);
        assert_eq!(series.last_entry().date, date("2024-06-07"));
        assert_eq!(series.last_entry().temperature_max, 26);
    }

    #[test]
    fn first_date_is_anchor() {
        let series = series_of(3);
        assert_eq!(series.first_date(), date("2024-06-01"));
    }
}
