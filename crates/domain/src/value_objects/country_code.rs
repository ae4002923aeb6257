//! Country code value object
//!
//! The search filter restricting geocoding candidates to one country is
//! configuration, not a literal, so it gets a validated type.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::CountryCode;
//!
//! let code = CountryCode::new("de").unwrap();
//! assert_eq!(code.as_str(), "DE");
//!
//! assert!(CountryCode::new("DEU").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated ISO 3166-1 alpha-2 country code, normalized to uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode {
    value: String,
}

impl CountryCode {
    /// Create a new country code, validating the format
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly two ASCII letters.
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let value = code.into().trim().to_uppercase();

        if value.len() != 2 || !value.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidCountryCode(value));
        }

        Ok(Self { value })
    }

    /// Germany, the default search filter
    #[must_use]
    pub fn germany() -> Self {
        Self {
            value: "DE".to_string(),
        }
    }

    /// Get the code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::germany()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CountryCode {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
