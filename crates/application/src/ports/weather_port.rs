//! Weather service port
//!
//! Defines the interface for forecast retrieval.

use async_trait::async_trait;
use domain::entities::{ForecastBundle, Location};
#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;

/// Port for forecast retrieval
///
/// A fetch succeeds or fails as a single unit: implementations never
/// return a partial bundle.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current conditions plus the daily window for a location
    async fn fetch_forecast(&self, location: &Location) -> Result<ForecastBundle, FetchError>;
}
