//! Application layer - Use cases and orchestration
//!
//! Contains the port definitions the services depend on, the search and
//! session services, and the user-facing error taxonomy. The rendering
//! layer is an external collaborator: it drives `WeatherSession` and
//! renders its snapshots.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{FetchError, SearchError};
pub use ports::*;
pub use services::*;
