//! Per-session weather lookup orchestration
//!
//! `WeatherSession` is the interface boundary the rendering layer drives:
//! it owns the live query, the suggestion list, the loaded forecast view
//! and the error/loading flags, and exposes an observable snapshot per
//! render. All state is per-session; a successful fetch replaces the
//! whole forecast, a failed one clears it.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use domain::entities::{
    CurrentConditions, DayView, ForecastView, JitterSource, Location, SelectedDay,
};

use crate::ports::WeatherPort;
use crate::services::debounce::{Debouncer, RequestSequence};
use crate::services::location_search::LocationSearchService;

/// Observable session state for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Current input text
    pub query: String,
    /// Country-filtered suggestion candidates
    pub suggestions: Vec<Location>,
    /// Whether the suggestion list (or its "no results" affordance) shows
    pub show_suggestions: bool,
    /// Whether a suggestion lookup is running
    pub searching: bool,
    /// Whether a forecast fetch is running
    pub loading: bool,
    /// Blocking user-facing error message, if any
    pub error: Option<String>,
    /// The loaded forecast, absent until a fetch succeeds
    pub weather: Option<WeatherSnapshot>,
}

/// The loaded-forecast portion of a snapshot
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    /// The location the forecast belongs to
    pub location: Location,
    /// Normalized current conditions
    pub current: CurrentConditions,
    /// The resolved selected day (humidity, hourly preview included)
    pub selected: SelectedDay,
    /// The visible 7-tile window starting at the selected index
    pub window: Vec<DayView>,
    /// Whether the calendar overlay is open
    pub calendar_open: bool,
    /// The 30-date selectable calendar range
    pub calendar_dates: Vec<NaiveDate>,
}

#[derive(Debug, Default)]
struct SessionState {
    query: String,
    suggestions: Vec<Location>,
    show_suggestions: bool,
    searching: bool,
    loading: bool,
    error: Option<String>,
    view: Option<ForecastView>,
}

struct SessionInner {
    search: LocationSearchService,
    weather: Arc<dyn WeatherPort>,
    jitter: Mutex<Box<dyn JitterSource + Send>>,
    debouncer: Debouncer,
    suggest_seq: RequestSequence,
    fetch_seq: RequestSequence,
    state: Mutex<SessionState>,
}

/// Session facade over search, fetch and window selection
#[derive(Clone)]
pub struct WeatherSession {
    inner: Arc<SessionInner>,
}

impl WeatherSession {
    /// Create a session over the given services
    #[must_use]
    pub fn new(
        search: LocationSearchService,
        weather: Arc<dyn WeatherPort>,
        jitter: Box<dyn JitterSource + Send>,
    ) -> Self {
        let debouncer = Debouncer::new(search.config().debounce_delay());
        Self {
            inner: Arc::new(SessionInner {
                search,
                weather,
                jitter: Mutex::new(jitter),
                debouncer,
                suggest_seq: RequestSequence::new(),
                fetch_seq: RequestSequence::new(),
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Live-typing hook: update the query and debounce a suggestion lookup
    ///
    /// Queries below the minimum length clear the suggestion state
    /// immediately and cancel any pending lookup timer; nothing hits the
    /// network.
    pub fn input_changed(&self, query: &str) {
        let below_minimum = {
            let mut state = self.inner.state.lock();
            state.query = query.to_string();
            let below = query.chars().count() < self.inner.search.config().min_query_len;
            if below {
                state.suggestions.clear();
                state.show_suggestions = false;
                state.searching = false;
            }
            below
        };

        if below_minimum {
            self.inner.debouncer.cancel();
            // An in-flight lookup must not repopulate the cleared list.
            self.inner.suggest_seq.begin();
            return;
        }

        let session = self.clone();
        let query = query.to_string();
        self.inner.debouncer.schedule(async move {
            session.run_suggestion_lookup(query).await;
        });
    }

    /// Select one of the current suggestions and load its forecast
    #[instrument(skip(self))]
    pub async fn select_suggestion(&self, index: usize) {
        let location = {
            let mut state = self.inner.state.lock();
            let Some(location) = state.suggestions.get(index).cloned() else {
                debug!(index, "ignoring selection outside suggestion list");
                return;
            };
            state.show_suggestions = false;
            state.suggestions.clear();
            state.query = location.name.clone();
            location
        };
        self.inner.debouncer.cancel();
        self.inner.suggest_seq.begin();

        self.load_forecast(location).await;
    }

    /// The explicit search action: resolve the query and load the first hit
    #[instrument(skip(self))]
    pub async fn submit(&self) {
        self.inner.debouncer.cancel();
        self.inner.suggest_seq.begin();
        let query = {
            let mut state = self.inner.state.lock();
            state.show_suggestions = false;
            state.searching = false;
            state.query.clone()
        };

        match self.inner.search.resolve_first(&query).await {
            Ok(location) => self.load_forecast(location).await,
            Err(err) => {
                warn!(error = %err, query, "explicit search failed");
                let mut state = self.inner.state.lock();
                state.error = Some(err.user_message());
                state.view = None;
                state.loading = false;
            }
        }
    }

    /// Select a forecast tile by absolute day index
    pub fn select_day(&self, index: usize) {
        if let Some(view) = self.inner.state.lock().view.as_mut() {
            view.select_day(index);
        }
    }

    /// Open or close the calendar overlay
    pub fn toggle_calendar(&self) {
        if let Some(view) = self.inner.state.lock().view.as_mut() {
            view.toggle_calendar();
        }
    }

    /// Apply a calendar date pick; returns whether the selection moved
    pub fn select_date(&self, date: NaiveDate) -> bool {
        self.inner
            .state
            .lock()
            .view
            .as_mut()
            .is_some_and(|view| view.select_date(date))
    }

    /// Observable state for a renderer, labeled with the current wall clock
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_at(Local::now().naive_local())
    }

    /// Observable state labeled with an explicit "now"
    ///
    /// Synthetic days and the non-today humidity re-draw their jitter on
    /// every snapshot; two snapshots of the same state may differ there.
    #[must_use]
    pub fn snapshot_at(&self, now: NaiveDateTime) -> SessionSnapshot {
        let state = self.inner.state.lock();
        let mut jitter = self.inner.jitter.lock();

        let weather = state.view.as_ref().map(|view| WeatherSnapshot {
            location: view.bundle().location.clone(),
            current: view.bundle().current.clone(),
            selected: view.selected_day(now, jitter.as_mut()),
            window: view.window(jitter.as_mut()),
            calendar_open: view.calendar_open(),
            calendar_dates: view.extended_dates(),
        });

        SessionSnapshot {
            query: state.query.clone(),
            suggestions: state.suggestions.clone(),
            show_suggestions: state.show_suggestions,
            searching: state.searching,
            loading: state.loading,
            error: state.error.clone(),
            weather,
        }
    }

    async fn run_suggestion_lookup(&self, query: String) {
        let ticket = self.inner.suggest_seq.begin();
        self.inner.state.lock().searching = true;

        let results = self.inner.search.suggest(&query).await;

        let mut state = self.inner.state.lock();
        if !self.inner.suggest_seq.is_current(ticket) {
            // A newer lookup owns the searching flag and the list now.
            debug!(query, "discarding stale suggestion response");
            return;
        }
        state.suggestions = results;
        state.show_suggestions = true;
        state.searching = false;
    }

    async fn load_forecast(&self, location: Location) {
        let ticket = self.inner.fetch_seq.begin();
        {
            let mut state = self.inner.state.lock();
            state.loading = true;
            state.error = None;
        }

        let result = self.inner.weather.fetch_forecast(&location).await;

        let mut state = self.inner.state.lock();
        if !self.inner.fetch_seq.is_current(ticket) {
            debug!("discarding stale forecast response");
            return;
        }
        state.loading = false;
        match result {
            Ok(bundle) => {
                debug!(location = %bundle.location, "forecast loaded");
                state.view = Some(ForecastView::new(bundle));
                state.error = None;
            }
            Err(err) => {
                warn!(error = %err, "forecast fetch failed");
                state.view = None;
                state.error = Some(err.user_message());
            }
        }
    }
}

impl std::fmt::Debug for WeatherSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("WeatherSession")
            .field("query", &state.query)
            .field("loaded", &state.view.is_some())
            .field("loading", &state.loading)
            .finish_non_exhaustive()
    }
}
