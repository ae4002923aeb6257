//! WMO weather code lookup table
//!
//! Fixed mapping from the integer weather codes reported by the forecast
//! provider to a human description and an icon identifier. The table is
//! reproduced exactly for output compatibility; codes outside it resolve
//! to the generic `Unknown` entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WMO weather interpretation code as reported by the forecast provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub u8);

/// Description and icon identifier for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionEntry {
    /// Human-readable description
    pub description: &'static str,
    /// Icon identifier
    pub icon: &'static str,
}

const fn entry(description: &'static str, icon: &'static str) -> ConditionEntry {
    ConditionEntry { description, icon }
}

/// Fallback entry for codes not present in the table
const UNKNOWN: ConditionEntry = entry("Unknown", "cloud");

impl WeatherCode {
    /// Look up the description/icon entry for this code
    #[must_use]
    pub const fn condition(self) -> ConditionEntry {
        match self.0 {
            0 => entry("Clear sky", "sun"),
            1 => entry("Mainly clear", "sun"),
            2 => entry("Partly cloudy", "cloud-sun"),
            3 => entry("Overcast", "cloud"),
            45 => entry("Fog", "smog"),
            48 => entry("Depositing rime fog", "smog"),
            51 => entry("Light drizzle", "cloud-rain"),
            53 => entry("Moderate drizzle", "cloud-rain"),
            55 => entry("Dense drizzle", "cloud-rain"),
            56 => entry("Light freezing drizzle", "snowflake"),
            57 => entry("Dense freezing drizzle", "snowflake"),
            61 => entry("Slight rain", "cloud-rain"),
            63 => entry("Moderate rain", "cloud-rain"),
            65 => entry("Heavy rain", "cloud-showers-heavy"),
            66 => entry("Light freezing rain", "snowflake"),
            67 => entry("Heavy freezing rain", "snowflake"),
            71 => entry("Slight snow fall", "snowflake"),
            73 => entry("Moderate snow fall", "snowflake"),
            75 => entry("Heavy snow fall", "snowflake"),
            77 => entry("Snow grains", "snowflake"),
            80 => entry("Slight rain showers", "cloud-sun-rain"),
            81 => entry("Moderate rain showers", "cloud-rain"),
            82 => entry("Violent rain showers", "cloud-bolt"),
            85 => entry("Slight snow showers", "snowflake"),
            86 => entry("Heavy snow showers", "snowflake"),
            95 => entry("Thunderstorm", "cloud-bolt"),
            96 => entry("Thunderstorm with slight hail", "cloud-bolt"),
            99 => entry("Thunderstorm with heavy hail", "cloud-bolt"),
            _ => UNKNOWN,
        }
    }

    /// Get the human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        self.condition().description
    }

    /// Get the icon identifier
    #[must_use]
    pub const fn icon(self) -> &'static str {
        self.condition().icon
    }

    /// Whether this code has an entry in the table
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(
            self.0,
            4..=44 | 46 | 47 | 49 | 50 | 52 | 54 | 58..=60 | 62 | 64 | 68..=70 | 72 | 74 | 76
                | 78 | 79 | 83 | 84 | 87..=94 | 97 | 98 | 100..
        )
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<u8> for WeatherCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}
