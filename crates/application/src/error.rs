//! Application-level errors
//!
//! Two-tier taxonomy: `SearchError` covers geocoding failures and empty
//! result sets, `FetchError` covers forecast retrieval. Either reduces to
//! a single user-facing message string; no structured codes reach the UI.
//!
//! Policy: search failures are soft (the suggestion list degrades to
//! empty, the application stays usable); fetch failures are fatal to the
//! current view (prior weather state is discarded and a blocking message
//! shown, recoverable by searching again).

use thiserror::Error;

/// Errors while resolving a free-text query to locations
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query is below the minimum active-search length
    #[error("query too short: need at least {min} characters")]
    QueryTooShort {
        /// Configured minimum query length
        min: usize,
    },

    /// The geocoding provider failed (network, bad response)
    #[error("geocoding provider failed: {0}")]
    Provider(String),

    /// The provider answered, but no candidate survived the country filter
    #[error("no locations found for \"{query}\"")]
    NoMatches {
        /// The query that produced no candidates
        query: String,
    },
}

impl SearchError {
    /// The single user-facing message for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::QueryTooShort { min } => {
                format!("Please enter at least {min} characters")
            }
            Self::Provider(_) => "Failed to search locations".to_string(),
            Self::NoMatches { .. } => "No locations found for your search".to_string(),
        }
    }
}

/// Errors while fetching a forecast
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed
    #[error("weather request failed: {0}")]
    Request(String),

    /// The provider answered with something we could not parse
    #[error("malformed weather response: {0}")]
    Malformed(String),

    /// The provider is temporarily down
    #[error("weather service unavailable: {0}")]
    Unavailable(String),

    /// The provider is throttling us
    #[error("weather service rate limit exceeded")]
    RateLimited,
}

impl FetchError {
    /// The single user-facing message for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        "Failed to fetch weather data".to_string()
    }

    /// Whether retrying the same fetch could plausibly succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited)
    }
}
