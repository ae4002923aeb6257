//! Infrastructure layer - Adapters and wiring
//!
//! Implements the application ports on top of the integration clients,
//! supplies the production randomness source, and owns configuration
//! loading and telemetry setup.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod jitter;
pub mod telemetry;

pub use adapters::{GeocodingAdapter, WeatherAdapter};
pub use bootstrap::{build_session, BootstrapError};
pub use config::AppConfig;
pub use jitter::ThreadRngJitter;
pub use telemetry::init_telemetry;
