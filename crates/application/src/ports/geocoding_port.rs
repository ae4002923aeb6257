//! Geocoding service port
//!
//! Defines the interface for resolving free-text place names.

use async_trait::async_trait;
use domain::entities::Location;
#[cfg(test)]
use mockall::automock;

use crate::error::SearchError;

/// Port for geocoding operations
///
/// Implementations return the provider's candidates in provider order;
/// country filtering is the caller's concern.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text query to an ordered list of candidates
    async fn search(&self, query: &str) -> Result<Vec<Location>, SearchError>;
}
