//! Timezone value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A timezone identifier (IANA timezone name)
///
/// The forecast window is anchored to a single fixed timezone for every
/// looked-up city regardless of the city's own zone; this is a deliberate
/// simplification carried for compatibility, not a bug.
///
/// Note: the name is not validated against the IANA database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timezone(String);

impl Timezone {
    /// Create a new timezone
    #[must_use]
    pub fn new(tz: impl Into<String>) -> Self {
        Self(tz.into())
    }

    /// Get the timezone string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTC timezone
    #[must_use]
    pub fn utc() -> Self {
        Self("UTC".to_string())
    }

    /// Europe/Berlin timezone, the forecast anchor for German cities
    #[must_use]
    pub fn berlin() -> Self {
        Self("Europe/Berlin".to_string())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::berlin()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Timezone {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Timezone {
    fn from(s: String) -> Self {
        Self(s)
    }
}
