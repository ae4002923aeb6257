//! Resolved location entity

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{CountryCode, GeoLocation};

/// A place resolved from a free-text query
///
/// Identity is the coordinate pair: two candidates at the same coordinates
/// describe the same place even if their labels differ. Immutable once
/// resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Place name as reported by the geocoding provider
    pub name: String,
    /// Coordinates (the location's identity)
    pub coordinates: GeoLocation,
    /// Country name
    pub country: String,
    /// First-level administrative region (state), when reported
    pub admin1: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: CountryCode,
}

impl Location {
    /// Whether this location lies in the given country
    #[must_use]
    pub fn is_in(&self, country: &CountryCode) -> bool {
        self.country_code == *country
    }

    /// Suggestion label: "name, admin1, country" (admin1 omitted when absent)
    #[must_use]
    pub fn label(&self) -> String {
        match &self.admin1 {
            Some(admin1) => format!("{}, {}, {}", self.name, admin1, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
