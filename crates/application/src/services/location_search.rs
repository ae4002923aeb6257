//! Location search use cases
//!
//! Resolves free-text queries through the geocoding port and restricts
//! candidates to one configured country. Live-typing suggestions fail
//! soft (empty list); the explicit search action fails loud.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use domain::entities::Location;
use domain::value_objects::CountryCode;

use crate::error::SearchError;
use crate::ports::GeocodingPort;

/// Search behavior configuration
///
/// Everything here used to be an embedded literal in the original UI;
/// it is explicit configuration so the target country or timing can
/// change without source edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Only candidates from this country survive filtering
    #[serde(default)]
    pub country: CountryCode,

    /// Queries shorter than this never trigger a lookup
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Delay before a live-typing query actually fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_min_query_len() -> usize {
    2
}

const fn default_debounce_ms() -> u64 {
    300
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            country: CountryCode::default(),
            min_query_len: default_min_query_len(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    /// The debounce delay as a `Duration`
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Resolves queries to country-filtered location candidates
pub struct LocationSearchService {
    geocoding: Arc<dyn GeocodingPort>,
    config: SearchConfig,
}

impl LocationSearchService {
    /// Create a new service over a geocoding port
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>, config: SearchConfig) -> Self {
        Self { geocoding, config }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Candidates for a live-typing suggestion list
    ///
    /// Below the minimum query length this is an empty, non-error result
    /// with no network call. Provider failures degrade to an empty list:
    /// the UI shows its "no results" affordance and stays usable.
    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Vec<Location> {
        if query.chars().count() < self.config.min_query_len {
            return Vec::new();
        }

        match self.geocoding.search(query).await {
            Ok(candidates) => {
                let hits = self.filter_country(candidates);
                debug!(query, hits = hits.len(), "suggestion lookup complete");
                hits
            }
            Err(err) => {
                warn!(error = %err, query, "suggestion lookup failed, degrading to empty list");
                Vec::new()
            }
        }
    }

    /// The explicit search action: resolve to the first candidate
    ///
    /// # Errors
    ///
    /// `QueryTooShort` below the minimum length, `Provider` when the
    /// geocoding call fails, `NoMatches` when no candidate survives the
    /// country filter.
    #[instrument(skip(self))]
    pub async fn resolve_first(&self, query: &str) -> Result<Location, SearchError> {
        if query.chars().count() < self.config.min_query_len {
            return Err(SearchError::QueryTooShort {
                min: self.config.min_query_len,
            });
        }

        let candidates = self.geocoding.search(query).await?;
        self.filter_country(candidates)
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NoMatches {
                query: query.to_string(),
            })
    }

    fn filter_country(&self, candidates: Vec<Location>) -> Vec<Location> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.is_in(&self.config.country))
            .collect()
    }
}

impl std::fmt::Debug for LocationSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationSearchService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
