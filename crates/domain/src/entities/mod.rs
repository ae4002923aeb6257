//! Entities - Domain objects with identity and lifecycle

mod forecast;
mod forecast_view;
mod location;

pub use forecast::{CurrentConditions, DailyEntry, DailyForecastSeries, ForecastBundle};
pub use forecast_view::{
    DayView, ForecastView, HourlyEntry, JitterSource, SelectedDay, EXTENDED_CALENDAR_DAYS,
    FORECAST_WINDOW_DAYS,
};
pub use location::Location;
