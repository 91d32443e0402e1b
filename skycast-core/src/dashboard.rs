//! Fetch orchestration around the dashboard state.
//!
//! The controller owns the state and a boxed provider. Every search follows
//! the same path: empty input raises a notice without touching the network;
//! otherwise a started event asserts the loading flag, the single HTTP call
//! runs, and a completion event clears the flag on every exit path.

use chrono::NaiveDate;
use tracing::{error, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::model::{ForecastDay, ForecastWindow, LocationQuery, Units, WeatherBundle};
use crate::provider::WeatherProvider;
use crate::state::{DashboardState, Event, Notice, visible_days};
use crate::theme::{ConditionTheme, DEFAULT_THEME, theme_for_label};

pub struct Dashboard {
    state: DashboardState,
    provider: Box<dyn WeatherProvider>,
    exclude_today: bool,
    next_seq: u64,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>, config: &Config) -> Self {
        Self {
            state: DashboardState::new(config.units, config.forecast_window),
            provider,
            exclude_today: config.exclude_today,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn set_units(&mut self, units: Units) {
        if self.state.units != units {
            self.state.apply(Event::UnitsToggled);
        }
    }

    pub fn set_window(&mut self, window: ForecastWindow) {
        if self.state.window != window {
            self.state.apply(Event::WindowToggled);
        }
    }

    pub fn toggle_units(&mut self) {
        self.state.apply(Event::UnitsToggled);
    }

    pub fn toggle_window(&mut self) {
        self.state.apply(Event::WindowToggled);
    }

    /// Search-box submission: validates, then fetches.
    pub async fn submit_search(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.state.apply(Event::NoticeRaised(Notice::EmptySearch));
            return;
        }
        self.state.apply(Event::QueryEdited(trimmed.to_string()));
        self.fetch(LocationQuery::City(trimmed.to_string())).await;
    }

    /// Dispatch one fetch for a resolved query. An empty query is a no-op:
    /// no HTTP call, loading untouched.
    pub async fn fetch(&mut self, query: LocationQuery) {
        if query.is_empty() {
            return;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.state.apply(Event::FetchStarted { seq, query: query.clone() });

        match self.provider.fetch_bundle(&query).await {
            Ok(bundle) => self.state.apply(Event::FetchSucceeded { seq, bundle }),
            Err(err) => {
                let notice = Notice::from(&err);
                match err {
                    FetchError::NotFound { .. } => warn!(%query, "{err}"),
                    _ => error!(%query, "{err}"),
                }
                self.state.apply(Event::FetchFailed { seq, notice });
            }
        }
    }

    /// Re-fetch the last dispatched query, e.g. from the watch loop.
    pub async fn refresh(&mut self) {
        if let Some(query) = self.state.location.clone() {
            self.fetch(query).await;
        }
    }

    /// Read-and-dismiss: notices are transient toasts, shown once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        let notice = self.state.notice;
        if notice.is_some() {
            self.state.apply(Event::NoticeDismissed);
        }
        notice
    }

    pub fn live_bundle(&self) -> Option<&WeatherBundle> {
        self.state.bundle.as_ref()
    }

    /// The daily forecast rows for the current window and exclusion policy.
    pub fn visible_forecast(&self, today: NaiveDate) -> Vec<&ForecastDay> {
        match &self.state.bundle {
            Some(bundle) => {
                visible_days(&bundle.days, today, self.state.window, self.exclude_today)
            }
            None => Vec::new(),
        }
    }

    /// Presentation theme keyed off the live condition label.
    pub fn current_theme(&self) -> ConditionTheme {
        self.state
            .bundle
            .as_ref()
            .map(|b| theme_for_label(&b.current.condition))
            .unwrap_or(DEFAULT_THEME)
    }
}
