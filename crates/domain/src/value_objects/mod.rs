//! Value Objects - Immutable, identity-less domain primitives

mod country_code;
mod geo_location;
mod humidity;
mod timezone;
mod weather_code;

pub use country_code::CountryCode;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use humidity::{Humidity, InvalidHumidity};
pub use timezone::Timezone;
pub use weather_code::{ConditionEntry, WeatherCode};
