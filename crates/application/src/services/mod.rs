//! Application services - Use case implementations

mod debounce;
mod location_search;
mod weather_session;

pub use debounce::{Debouncer, RequestSequence};
pub use location_search::{LocationSearchService, SearchConfig};
pub use weather_session::{SessionSnapshot, WeatherSession, WeatherSnapshot};
