//! Dashboard state and its reducer.
//!
//! All UI state lives in one struct and is mutated only by applying events,
//! never through ambient globals. Fetch completions carry the sequence number
//! stamped at start; a completion older than the newest accepted one is
//! discarded, so overlapping in-flight requests resolve deterministically.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::error::FetchError;
use crate::model::{ForecastDay, ForecastWindow, HourEntry, LocationQuery, Units, WeatherBundle};

/// Transient user-visible notices. Shown once, dismissed on read; they never
/// block a subsequent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptySearch,
    CityNotFound,
    ProviderUnavailable,
}

impl Notice {
    pub const fn message(self) -> &'static str {
        match self {
            Notice::EmptySearch => "Please search for a city",
            Notice::CityNotFound => "City not found",
            Notice::ProviderUnavailable => "Weather service unavailable, try again",
        }
    }
}

impl From<&FetchError> for Notice {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::NotFound { .. } => Notice::CityNotFound,
            FetchError::Network(_) | FetchError::Decode(_) | FetchError::MissingApiKey { .. } => {
                Notice::ProviderUnavailable
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    QueryEdited(String),
    UnitsToggled,
    WindowToggled,
    FetchStarted { seq: u64, query: LocationQuery },
    FetchSucceeded { seq: u64, bundle: WeatherBundle },
    FetchFailed { seq: u64, notice: Notice },
    NoticeRaised(Notice),
    NoticeDismissed,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    /// City text currently in the search box.
    pub query: String,
    /// Query term of the most recently dispatched fetch.
    pub location: Option<LocationQuery>,
    pub units: Units,
    pub window: ForecastWindow,
    pub loading: bool,
    pub notice: Option<Notice>,
    /// The single live response; replaced wholesale on success, cleared on
    /// failure, never partially mixed.
    pub bundle: Option<WeatherBundle>,

    latest_started: u64,
    latest_accepted: u64,
}

impl DashboardState {
    pub fn new(units: Units, window: ForecastWindow) -> Self {
        Self {
            query: String::new(),
            location: None,
            units,
            window,
            loading: false,
            notice: None,
            bundle: None,
            latest_started: 0,
            latest_accepted: 0,
        }
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::QueryEdited(query) => self.query = query,
            Event::UnitsToggled => self.units = self.units.toggled(),
            Event::WindowToggled => self.window = self.window.toggled(),
            Event::NoticeRaised(notice) => self.notice = Some(notice),
            Event::NoticeDismissed => self.notice = None,
            Event::FetchStarted { seq, query } => {
                self.latest_started = self.latest_started.max(seq);
                self.location = Some(query);
                self.loading = true;
                self.notice = None;
            }
            Event::FetchSucceeded { seq, bundle } => {
                if seq < self.latest_accepted {
                    return; // stale response, a newer one already won
                }
                self.latest_accepted = seq;
                self.bundle = Some(bundle);
                self.notice = None;
                self.loading = seq < self.latest_started;
            }
            Event::FetchFailed { seq, notice } => {
                if seq < self.latest_accepted {
                    return;
                }
                self.latest_accepted = seq;
                self.bundle = None;
                self.notice = Some(notice);
                self.loading = seq < self.latest_started;
            }
        }
    }
}

/// Daily list windowing: optionally drop today's entry, then truncate to the
/// window's day count.
pub fn visible_days<'a>(
    days: &'a [ForecastDay],
    today: NaiveDate,
    window: ForecastWindow,
    exclude_today: bool,
) -> Vec<&'a ForecastDay> {
    days.iter()
        .filter(|d| !(exclude_today && d.date == today))
        .take(window.days())
        .collect()
}

/// Index of the hourly entry matching the current local hour, if any. Used by
/// the renderer to center the hourly strip; purely presentational.
pub fn current_hour_index(hours: &[HourEntry], now: NaiveDateTime) -> Option<usize> {
    hours.iter().position(|h| h.time.hour() == now.hour())
}
