use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::format::kelvin_to_celsius;

/// Temperature display units, toggled from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Celsius,
    Fahrenheit,
}

impl Units {
    pub fn toggled(self) -> Self {
        match self {
            Units::Celsius => Units::Fahrenheit,
            Units::Fahrenheit => Units::Celsius,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Units::Celsius => "°c",
            Units::Fahrenheit => "°f",
        }
    }
}

/// How many future days the daily forecast list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastWindow {
    /// 4-day list.
    Short,
    /// 9-day list.
    Long,
}

impl ForecastWindow {
    pub const fn days(self) -> usize {
        match self {
            ForecastWindow::Short => 4,
            ForecastWindow::Long => 9,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ForecastWindow::Short => ForecastWindow::Long,
            ForecastWindow::Long => ForecastWindow::Short,
        }
    }
}

/// A temperature carried in both display units so the toggle never refetches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Temperature {
    /// Both values as delivered by the provider.
    pub const fn from_pair(celsius: f64, fahrenheit: f64) -> Self {
        Self { celsius, fahrenheit }
    }

    pub fn from_celsius(celsius: f64) -> Self {
        Self { celsius, fahrenheit: celsius * 9.0 / 5.0 + 32.0 }
    }

    /// For the provider variant that reports Kelvin.
    pub fn from_kelvin(kelvin: f64) -> Self {
        Self::from_celsius(kelvin_to_celsius(kelvin))
    }

    pub fn in_units(&self, units: Units) -> f64 {
        match units {
            Units::Celsius => self.celsius,
            Units::Fahrenheit => self.fahrenheit,
        }
    }
}

/// The single query term handed to a weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationQuery {
    Coordinates { lat: f64, lon: f64 },
    City(String),
}

impl LocationQuery {
    /// An empty city query is a no-op upstream: no fetch is dispatched for it.
    pub fn is_empty(&self) -> bool {
        match self {
            LocationQuery::Coordinates { .. } => false,
            LocationQuery::City(name) => name.trim().is_empty(),
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
            LocationQuery::City(name) => f.write_str(name),
        }
    }
}

/// Current conditions as delivered by the provider.
///
/// Immutable once received; a new successful fetch replaces it wholesale and
/// a failed fetch clears it. Never partially overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Provider condition label, e.g. "Clear" or "Rain".
    pub condition: String,
    pub temperature: Temperature,
    pub feels_like: Temperature,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub wind_degree: u16,
    /// 16-point compass label, e.g. "WSW".
    pub wind_dir: String,
    pub location_name: String,
    pub region: String,
    pub country: String,
}

/// One hourly forecast entry, ordered by time within its parent day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    pub time: NaiveDateTime,
    pub temperature: Temperature,
    pub condition: String,
}

/// One calendar day's forecast aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp: Temperature,
    pub max_temp: Temperature,
    pub condition: String,
    pub rain_chance_pct: u8,
    pub snow_chance_pct: u8,
    /// Sunrise/sunset as provider-formatted local times, e.g. "06:15 AM".
    pub sunrise: String,
    pub sunset: String,
    pub hours: Vec<HourEntry>,
}

/// Everything one successful fetch returns: current conditions plus forecast
/// days. The current-only provider variant leaves `days` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub provider: String,
    pub current: WeatherSnapshot,
    pub days: Vec<ForecastDay>,
}
