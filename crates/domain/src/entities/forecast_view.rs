//! Forecast window selection
//!
//! Maps a user-chosen day index or calendar date onto concrete day data,
//! synthesizing days past the fetched horizon. This is the one stateful
//! piece of session logic: selected index plus calendar-overlay flag.

use chrono::{Days, NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::entities::{DailyEntry, ForecastBundle};
use crate::value_objects::{ConditionEntry, Humidity, WeatherCode};

/// Number of tiles in the visible forecast window
pub const FORECAST_WINDOW_DAYS: usize = 7;

/// Number of selectable dates offered by the calendar overlay
pub const EXTENDED_CALENDAR_DAYS: usize = 30;

/// Bounds of the synthetic-day temperature offset, inclusive
const TEMPERATURE_JITTER_MIN: i32 = -3;
const TEMPERATURE_JITTER_MAX: i32 = 3;

/// Baseline and spread for the non-today humidity approximation
const HUMIDITY_BASELINE: i32 = 65;
const HUMIDITY_SPREAD: i32 = 19;

/// Source of bounded integer offsets for synthesized data
///
/// Production uses a thread-local RNG; tests plug in a fixed source.
/// Synthetic days re-draw their offsets on every render, so repeated
/// views of the same synthetic day are not guaranteed identical.
pub trait JitterSource {
    /// Draw an offset in the inclusive range [lo, hi]
    fn offset_in(&mut self, lo: i32, hi: i32) -> i32;
}

/// One rendered day, real or synthesized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    /// Absolute day index (0 = today)
    pub index: usize,
    /// Calendar day
    pub date: NaiveDate,
    /// Maximum temperature in °C
    pub temperature_max: i32,
    /// Minimum temperature in °C
    pub temperature_min: i32,
    /// Weather condition code
    pub weather_code: WeatherCode,
    /// Precipitation sum in mm
    pub precipitation: f64,
    /// Precipitation probability in percent
    pub precipitation_probability: u8,
    /// Wind speed in km/h
    pub wind_speed: i32,
    /// UV index
    pub uv_index: i32,
    /// Whether this day lies past the fetched horizon
    pub synthetic: bool,
}

impl DayView {
    /// Headline temperature shown for the day: the rounded max/min mean
    #[must_use]
    pub fn headline_temperature(&self) -> i32 {
        (f64::from(self.temperature_max + self.temperature_min) / 2.0).round() as i32
    }

    /// Tile label: "Today", "Tomorrow", or the abbreviated weekday
    #[must_use]
    pub fn label(&self) -> String {
        match self.index {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            _ => self.date.format("%a").to_string(),
        }
    }

    /// Description/icon entry for the day's weather code
    #[must_use]
    pub fn condition(&self) -> ConditionEntry {
        self.weather_code.condition()
    }
}

/// One row of the four-slot hourly preview
///
/// Temperatures are interpolated from known max/min/current values, not
/// fetched; this is a display approximation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyEntry {
    /// Time-of-day label, e.g. "3 PM"
    pub label: String,
    /// Approximated temperature in °C
    pub temperature: i32,
    /// Weather condition code
    pub weather_code: WeatherCode,
}

/// The fully resolved view of the selected day
#[derive(Debug, Clone, Serialize)]
pub struct SelectedDay {
    /// The day's data
    pub day: DayView,
    /// Real humidity for today; baseline + bounded jitter otherwise
    pub humidity: Humidity,
    /// Four representative times of day
    pub hourly: Vec<HourlyEntry>,
}

/// Forecast-window state machine over a loaded bundle
///
/// Three UI-relevant states: no forecast loaded (no view exists), day
/// selected, and calendar overlay open. Loading a forecast always starts
/// at index 0; calendar toggling never changes the selection; selecting a
/// date may change the selection and always closes the calendar.
#[derive(Debug, Clone)]
pub struct ForecastView {
    bundle: ForecastBundle,
    selected_index: usize,
    calendar_open: bool,
}

impl ForecastView {
    /// Wrap a freshly fetched bundle, selecting today
    #[must_use]
    pub fn new(bundle: ForecastBundle) -> Self {
        Self {
            bundle,
            selected_index: 0,
            calendar_open: false,
        }
    }

    /// The underlying forecast bundle
    #[must_use]
    pub fn bundle(&self) -> &ForecastBundle {
        &self.bundle
    }

    /// Currently selected day index
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Whether the calendar overlay is open
    #[must_use]
    pub fn calendar_open(&self) -> bool {
        self.calendar_open
    }

    /// Select a forecast tile directly
    ///
    /// Tiles carry absolute indices from the sliding window, so repeated
    /// forward clicks can push the selection past the fetched horizon.
    pub fn select_day(&mut self, index: usize) {
        self.selected_index = index;
    }

    /// Open or close the calendar overlay; orthogonal to day selection
    pub fn toggle_calendar(&mut self) {
        self.calendar_open = !self.calendar_open;
    }

    /// Apply a calendar date pick
    ///
    /// Dates within the real 7-day window move the selection; dates
    /// outside it are selectable for affordance but leave the displayed
    /// day unchanged. The calendar closes either way. Returns whether the
    /// selection changed.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        let diff = (date - self.bundle.daily.first_date()).num_days();
        let changed = (0..FORECAST_WINDOW_DAYS as i64).contains(&diff);
        if changed {
            self.selected_index = diff as usize;
        }
        self.calendar_open = false;
        changed
    }

    /// The selectable calendar range: 30 consecutive dates from day 0
    #[must_use]
    pub fn extended_dates(&self) -> Vec<NaiveDate> {
        let start = self.bundle.daily.first_date();
        (0..EXTENDED_CALENDAR_DAYS as u64)
            .map(|i| start + Days::new(i))
            .collect()
    }

    /// Resolve a day index to concrete data
    ///
    /// Indices inside the fetched series return the real entry. Past the
    /// horizon, the last real day is carried forward: the date advances by
    /// the overshoot, weather code, precipitation, probability, wind and
    /// UV stay as-is, and max/min temperature get independent offsets in
    /// [-3, +3]. Synthesized data is recomputed on every call.
    #[must_use]
    pub fn day_view(&self, index: usize, jitter: &mut dyn JitterSource) -> DayView {
        let daily = &self.bundle.daily;
        match daily.entry(index) {
            Some(entry) => Self::real_day(index, entry),
            None => {
                let last = daily.last_entry();
                let overshoot = (index - daily.len() + 1) as u64;
                DayView {
                    index,
                    date: last.date + Days::new(overshoot),
                    temperature_max: last.temperature_max
                        + jitter.offset_in(TEMPERATURE_JITTER_MIN, TEMPERATURE_JITTER_MAX),
                    temperature_min: last.temperature_min
                        + jitter.offset_in(TEMPERATURE_JITTER_MIN, TEMPERATURE_JITTER_MAX),
                    weather_code: last.weather_code,
                    precipitation: last.precipitation,
                    precipitation_probability: last.precipitation_probability,
                    wind_speed: last.wind_speed,
                    uv_index: last.uv_index,
                    synthetic: true,
                }
            }
        }
    }

    /// The visible 7-tile window starting at the selected index
    #[must_use]
    pub fn window(&self, jitter: &mut dyn JitterSource) -> Vec<DayView> {
        (self.selected_index..self.selected_index + FORECAST_WINDOW_DAYS)
            .map(|index| self.day_view(index, jitter))
            .collect()
    }

    /// Resolve the selected day with humidity and the hourly preview
    ///
    /// `now` is the wall-clock time used to label today's hourly slots.
    #[must_use]
    pub fn selected_day(&self, now: NaiveDateTime, jitter: &mut dyn JitterSource) -> SelectedDay {
        let day = self.day_view(self.selected_index, jitter);

        let humidity = if self.selected_index == 0 {
            self.bundle.current.humidity
        } else {
            // The provider has no daily humidity series; approximate.
            let approx = (HUMIDITY_BASELINE + jitter.offset_in(0, HUMIDITY_SPREAD)).clamp(0, 100);
            Humidity::clamped(approx as u8)
        };

        let hourly = self.hourly_preview(now, &day);

        SelectedDay {
            day,
            humidity,
            hourly,
        }
    }

    /// Four representative times of day for the selected day
    ///
    /// Today: now, +3h, +6h, +9h with offsets from the current
    /// temperature. Other days: fixed 9 AM / 12 PM / 3 PM / 6 PM slots
    /// interpolated from the day's max/min.
    fn hourly_preview(&self, now: NaiveDateTime, day: &DayView) -> Vec<HourlyEntry> {
        if day.index == 0 {
            let current = &self.bundle.current;
            let offsets = [0, 1, 2, -1];
            offsets
                .iter()
                .enumerate()
                .map(|(slot, offset)| HourlyEntry {
                    label: (now + TimeDelta::hours(3 * slot as i64))
                        .format("%-l %p")
                        .to_string(),
                    temperature: current.temperature + offset,
                    weather_code: current.weather_code,
                })
                .collect()
        } else {
            let labels = ["9 AM", "12 PM", "3 PM", "6 PM"];
            let temperatures = [
                day.temperature_min + 5,
                day.temperature_max - 1,
                day.temperature_max,
                day.temperature_max - 3,
            ];
            labels
                .iter()
                .zip(temperatures)
                .map(|(label, temperature)| HourlyEntry {
                    label: (*label).to_string(),
                    temperature,
                    weather_code: day.weather_code,
                })
                .collect()
        }
    }

    fn real_day(index: usize, entry: DailyEntry) -> DayView {
        DayView {
            index,
            date: entry.date,
            temperature_max: entry.temperature_max,
            temperature_min: entry.temperature_min,
            weather_code: entry.weather_code,
            precipitation: entry.precipitation,
            precipitation_probability: entry.precipitation_probability,
            wind_speed: entry.wind_speed,
            uv_index: entry.uv_index,
            synthetic: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CurrentConditions, DailyForecastSeries, Location};
    use crate::value_objects::{CountryCode, GeoLocation};
    use chrono::NaiveDate;

    /// Always returns the lower bound; draws are recorded for assertions
    struct FixedJitter {
        draws: Vec<(i32, i32)>,
        value: i32,
    }

    impl FixedJitter {
        fn returning(value: i32) -> Self {
            Self {
                draws: Vec::new(),
                value,
            }
        }
    }

    impl JitterSource for FixedJitter {
        fn offset_in(&mut self, lo: i32, hi: i32) -> i32 {
            self.draws.push((lo, hi));
            self.value.clamp(lo, hi)
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn bundle() -> ForecastBundle {
        let start = date("2024-06-01");
        let days = 7;
        let daily = DailyForecastSeries::new(
            (0..days)
                .map(|i| start + Days::new(i as u64))
                .collect(),
            (0..days).map(|i| 20 + i as i32).collect(),
            (0..days).map(|i| 10 + i as i32).collect(),
            vec![WeatherCode(61); days as usize],
            vec![1.2; days as usize],
            vec![40; days as usize],
            vec![14; days as usize],
            vec![6; days as usize],
        )
        .expect("valid series");

        ForecastBundle {
            location: Location {
                name: "Berlin".to_string(),
                coordinates: GeoLocation::berlin(),
                country: "Germany".to_string(),
                admin1: Some("Berlin".to_string()),
                country_code: CountryCode::germany(),
            },
            current: CurrentConditions {
                temperature: 21,
                weather_code: WeatherCode(2),
                wind_speed: 12,
                wind_direction: 200,
                humidity: Humidity::clamped(58),
                pressure: 1014,
                visibility_km: 8,
                uv_index: 4,
                observed_at: "2024-06-01T14:00:00".parse().expect("valid datetime"),
                precipitation: 0.0,
                precipitation_probability: 40,
            },
            daily,
        }
    }

    #[test]
    fn new_view_selects_today_with_calendar_closed() {
        let view = ForecastView::new(bundle());
        assert_eq!(view.selected_index(), 0);
        assert!(!view.calendar_open());
    }

    #[test]
    fn select_day_moves_index() {
        let mut view = ForecastView::new(bundle());
        view.select_day(4);
        assert_eq!(view.selected_index(), 4);
    }

    #[test]
    fn toggle_calendar_is_orthogonal_to_selection() {
        let mut view = ForecastView::new(bundle());
        view.select_day(3);
        view.toggle_calendar();
        assert!(view.calendar_open());
        assert_eq!(view.selected_index(), 3);
        view.toggle_calendar();
        assert!(!view.calendar_open());
    }

    #[test]
    fn date_inside_window_selects_index() {
        let mut view = ForecastView::new(bundle());
        view.toggle_calendar();
        assert!(view.select_date(date("2024-06-03")));
        assert_eq!(view.selected_index(), 2);
        assert!(!view.calendar_open());
    }

    #[test]
    fn date_outside_window_leaves_selection_unchanged() {
        let mut view = ForecastView::new(bundle());
        view.select_day(3);
        view.toggle_calendar();

        // diff = 9, outside [0, 7)
        assert!(!view.select_date(date("2024-06-10")));
        assert_eq!(view.selected_index(), 3);
        // the calendar still closes
        assert!(!view.calendar_open());
    }

    #[test]
    fn date_before_window_leaves_selection_unchanged() {
        let mut view = ForecastView::new(bundle());
        view.select_day(2);
        assert!(!view.select_date(date("2024-05-28")));
        assert_eq!(view.selected_index(), 2);
    }

    #[test]
    fn extended_dates_span_thirty_days() {
        let view = ForecastView::new(bundle());
        let dates = view.extended_dates();
        assert_eq!(dates.len(), EXTENDED_CALENDAR_DAYS);
        assert_eq!(dates[0], date("2024-06-01"));
        assert_eq!(dates[29], date("2024-06-30"));
    }

    #[test]
    fn day_view_inside_series_is_real() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(0);
        let day = view.day_view(2, &mut jitter);
        assert!(!day.synthetic);
        assert_eq!(day.date, date("2024-06-03"));
        assert_eq!(day.temperature_max, 22);
        assert!(jitter.draws.is_empty(), "real days draw no jitter");
    }

    #[test]
    fn day_view_past_horizon_is_synthesized() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(2);
        let day = view.day_view(9, &mut jitter);

        assert!(day.synthetic);
        // last real date 2024-06-07 advanced by 9 - 7 + 1 = 3 days
        assert_eq!(day.date, date("2024-06-10"));
        // carried forward unchanged from the last real day
        assert_eq!(day.weather_code, WeatherCode(61));
        assert!((day.precipitation - 1.2).abs() < f64::EPSILON);
        assert_eq!(day.precipitation_probability, 40);
        assert_eq!(day.wind_speed, 14);
        assert_eq!(day.uv_index, 6);
        // jittered off the last real max/min (26/16)
        assert_eq!(day.temperature_max, 28);
        assert_eq!(day.temperature_min, 18);
        assert_eq!(jitter.draws, vec![(-3, 3), (-3, 3)]);
    }

    #[test]
    fn first_synthetic_day_follows_last_real_date() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(0);
        let day = view.day_view(7, &mut jitter);
        assert_eq!(day.date, date("2024-06-08"));
    }

    #[test]
    fn window_is_seven_tiles_from_selection() {
        let mut view = ForecastView::new(bundle());
        view.select_day(3);
        let mut jitter = FixedJitter::returning(0);
        let window = view.window(&mut jitter);

        assert_eq!(window.len(), FORECAST_WINDOW_DAYS);
        assert_eq!(window[0].index, 3);
        assert_eq!(window[6].index, 9);
        // indices 3..=6 are real, 7..=9 synthesized
        assert!(window[..4].iter().all(|d| !d.synthetic));
        assert!(window[4..].iter().all(|d| d.synthetic));
    }

    #[test]
    fn selected_day_today_uses_real_humidity() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(0);
        let now = "2024-06-01T14:00:00".parse().expect("valid datetime");
        let selected = view.selected_day(now, &mut jitter);
        assert_eq!(selected.humidity.value(), 58);
    }

    #[test]
    fn selected_day_other_days_approximate_humidity() {
        let mut view = ForecastView::new(bundle());
        view.select_day(2);
        let now = "2024-06-01T14:00:00".parse().expect("valid datetime");

        let mut low = FixedJitter::returning(0);
        assert_eq!(view.selected_day(now, &mut low).humidity.value(), 65);

        let mut high = FixedJitter::returning(19);
        assert_eq!(view.selected_day(now, &mut high).humidity.value(), 84);
    }

    #[test]
    fn hourly_today_steps_from_now() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(0);
        let now = "2024-06-01T14:00:00".parse().expect("valid datetime");
        let selected = view.selected_day(now, &mut jitter);

        let labels: Vec<&str> = selected.hourly.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["2 PM", "5 PM", "8 PM", "11 PM"]);

        let temps: Vec<i32> = selected.hourly.iter().map(|h| h.temperature).collect();
        assert_eq!(temps, vec![21, 22, 23, 20]);

        assert!(selected
            .hourly
            .iter()
            .all(|h| h.weather_code == WeatherCode(2)));
    }

    #[test]
    fn hourly_other_days_use_fixed_slots() {
        let mut view = ForecastView::new(bundle());
        view.select_day(2);
        let mut jitter = FixedJitter::returning(0);
        let now = "2024-06-01T14:00:00".parse().expect("valid datetime");
        let selected = view.selected_day(now, &mut jitter);

        let labels: Vec<&str> = selected.hourly.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["9 AM", "12 PM", "3 PM", "6 PM"]);

        // day 2: max 22, min 12 -> [min+5, max-1, max, max-3]
        let temps: Vec<i32> = selected.hourly.iter().map(|h| h.temperature).collect();
        assert_eq!(temps, vec![17, 21, 22, 19]);
    }

    #[test]
    fn headline_temperature_is_rounded_mean() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(0);
        // day 0: max 20, min 10
        assert_eq!(view.day_view(0, &mut jitter).headline_temperature(), 15);
        // day 1: max 21, min 11 -> 16.0 exact
        assert_eq!(view.day_view(1, &mut jitter).headline_temperature(), 16);
    }

    #[test]
    fn labels_today_tomorrow_weekday() {
        let view = ForecastView::new(bundle());
        let mut jitter = FixedJitter::returning(0);
        assert_eq!(view.day_view(0, &mut jitter).label(), "Today");
        assert_eq!(view.day_view(1, &mut jitter).label(), "Tomorrow");
        // 2024-06-03 is a Monday
        assert_eq!(view.day_view(2, &mut jitter).label(), "Mon");
    }
}
